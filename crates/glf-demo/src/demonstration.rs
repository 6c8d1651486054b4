//! Fly-through camera with a draggable sun.
//!
//! Controls:
//!
//! - left drag rotates the camera, right drag rotates the sun
//! - `W`/`S` forward and back, `A`/`D` left and right, `Space`/`C` up and down
//!
//! Rotations are pitch/yaw pairs in degrees. Movement is expressed in camera
//! space and carried into world space on every [`Demonstration::step`].

use crate::{DemoConfig, InputEvent, Key, MouseButton};
use glf_math::{
    normal, perspective, to_radians, translation, xrotation, yrotation, Mat3, Mat4, Vec2, Vec3,
    Vec4,
};
use tracing::{debug, trace};

/// Pitch is clamped to this many degrees up or down.
const PITCH_LIMIT: f32 = 90.0;

/// Yaw is wrapped into this many degrees either side of zero.
const YAW_LIMIT: f32 = 180.0;

/// Initial sun rotation: straight overhead.
const SUN_ROTATION: Vec2 = Vec2::new(-90.0, 0.0);

/// Camera and light state driven by pointer and keyboard input.
///
/// # Example
///
/// ```rust
/// use glf_demo::{DemoConfig, Demonstration, InputEvent, Key};
///
/// let mut demo = Demonstration::new(DemoConfig::default());
/// let press = InputEvent::Key { key: Key::W, down: true, repeat: false };
///
/// assert!(demo.frame([press]));
/// assert!(demo.camera_position().z < 0.0);
/// assert!(!demo.frame([InputEvent::Quit]));
/// ```
#[derive(Debug, Clone)]
pub struct Demonstration {
    config: DemoConfig,
    running: bool,

    cam_position: Vec3,
    cam_velocity: Vec3,
    cam_rotation: Vec2,
    sun_rotation: Vec2,

    drag_cam: bool,
    drag_sun: bool,
    prev_cam_rotation: Vec2,
    prev_sun_rotation: Vec2,
    prev_pointer: [i32; 2],
    curr_pointer: [i32; 2],
}

impl Default for Demonstration {
    fn default() -> Self {
        Self::new(DemoConfig::default())
    }
}

impl Demonstration {
    /// Creates a running demonstration with the camera at the origin.
    pub fn new(config: DemoConfig) -> Self {
        debug!(width = config.width, height = config.height, "demonstration started");
        Self {
            config,
            running: true,
            cam_position: Vec3::ZERO,
            cam_velocity: Vec3::ZERO,
            cam_rotation: Vec2::ZERO,
            sun_rotation: SUN_ROTATION,
            drag_cam: false,
            drag_sun: false,
            prev_cam_rotation: Vec2::ZERO,
            prev_sun_rotation: SUN_ROTATION,
            prev_pointer: [0; 2],
            curr_pointer: [0; 2],
        }
    }

    /// Current settings.
    pub fn config(&self) -> &DemoConfig {
        &self.config
    }

    /// `false` once a [`InputEvent::Quit`] has been handled.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Camera position in world space.
    pub fn camera_position(&self) -> Vec3 {
        self.cam_position
    }

    /// Moves the camera.
    pub fn set_camera_position(&mut self, position: Vec3) {
        self.cam_position = position;
    }

    /// Camera velocity in camera space, one unit per held key.
    pub fn camera_velocity(&self) -> Vec3 {
        self.cam_velocity
    }

    /// Camera pitch and yaw in degrees.
    pub fn camera_rotation(&self) -> Vec2 {
        self.cam_rotation
    }

    /// Sun pitch and yaw in degrees.
    pub fn sun_rotation(&self) -> Vec2 {
        self.sun_rotation
    }

    /// Dispatches one event. Key auto-repeats are dropped.
    pub fn handle(&mut self, event: InputEvent) {
        trace!(?event, "input");
        match event {
            InputEvent::Button { button, down } => self.button(button, down),
            InputEvent::Motion { x, y } => self.motion(x, y),
            InputEvent::Key { key, down, repeat } => {
                if !repeat {
                    self.key(key, down);
                }
            }
            InputEvent::Quit => self.running = false,
        }
    }

    /// Starts or ends a drag. The rotation and pointer position at the
    /// start become the drag origin.
    pub fn button(&mut self, button: MouseButton, down: bool) {
        match button {
            MouseButton::Left => {
                self.drag_cam = down;
                self.prev_cam_rotation = self.cam_rotation;
            }
            MouseButton::Right => {
                self.drag_sun = down;
                self.prev_sun_rotation = self.sun_rotation;
            }
            MouseButton::Middle => {}
        }
        self.prev_pointer = self.curr_pointer;
    }

    /// Tracks the pointer and applies any active drag.
    ///
    /// Both deltas are scaled by the viewport height so a drag covers the
    /// same angle regardless of aspect ratio.
    pub fn motion(&mut self, x: i32, y: i32) {
        let height = self.config.height.max(1) as f32;
        let delta = Vec2::new(
            (y as f32 - self.prev_pointer[1] as f32) / height,
            (x as f32 - self.prev_pointer[0] as f32) / height,
        );

        if self.drag_cam {
            self.cam_rotation = self.dragged(self.prev_cam_rotation, delta);
        }
        if self.drag_sun {
            self.sun_rotation = self.dragged(self.prev_sun_rotation, delta);
        }
        self.curr_pointer = [x, y];
    }

    fn dragged(&self, origin: Vec2, delta: Vec2) -> Vec2 {
        let pitch = origin.x + self.config.pitch_range * delta.x;
        let yaw = origin.y + self.config.yaw_range * delta.y;
        Vec2::new(pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT), wrap_yaw(yaw))
    }

    /// Applies a key press or release to the camera velocity. Releasing a
    /// key exactly undoes its press.
    pub fn key(&mut self, key: Key, down: bool) {
        let d = if down { 1.0 } else { -1.0 };
        let v = &mut self.cam_velocity;
        match key {
            Key::A => v.x -= d,
            Key::D => v.x += d,
            Key::C => v.y -= d,
            Key::Space => v.y += d,
            Key::W => v.z -= d,
            Key::S => v.z += d,
            Key::Other(_) => {}
        }
    }

    /// Advances the camera by one step along its current orientation.
    pub fn step(&mut self) {
        let to_world = self
            .view()
            .inverse()
            .map(|inv| normal(&inv))
            .unwrap_or_default();
        self.cam_position = self.cam_position + to_world * self.cam_velocity * self.config.speed;
    }

    /// Handles a batch of events, then steps once. Returns whether the
    /// demonstration is still running.
    pub fn frame(&mut self, events: impl IntoIterator<Item = InputEvent>) -> bool {
        for event in events {
            self.handle(event);
        }
        self.step();
        self.running
    }

    /// Updates the viewport size used for aspect ratio and drag scaling.
    pub fn resize(&mut self, width: u32, height: u32) {
        debug!(width, height, "viewport resized");
        self.config.width = width;
        self.config.height = height;
    }

    /// Perspective projection with the configured clip distances.
    pub fn projection(&self) -> Mat4 {
        self.projection_with(self.config.near, self.config.far)
    }

    /// Perspective projection with explicit clip distances.
    pub fn projection_with(&self, near: f32, far: f32) -> Mat4 {
        perspective(
            to_radians(self.config.fov_degrees),
            self.config.aspect(),
            near,
            far,
        )
    }

    /// World-to-camera transform.
    pub fn view(&self) -> Mat4 {
        xrotation(to_radians(self.cam_rotation.x))
            * yrotation(to_radians(self.cam_rotation.y))
            * translation(-self.cam_position)
    }

    /// Direction toward the sun as a `w = 0` vector.
    pub fn light(&self) -> Vec4 {
        xrotation(to_radians(self.sun_rotation.x))
            * yrotation(to_radians(self.sun_rotation.y))
            * Vec4::new(0.0, 0.0, 1.0, 0.0)
    }

    /// Normal matrix for the current view.
    pub fn view_normal(&self) -> Mat3 {
        normal(&self.view())
    }
}

/// Wraps into [-180, 180], keeping 180 rather than folding it to -180.
fn wrap_yaw(yaw: f32) -> f32 {
    let wrapped = (yaw + YAW_LIMIT).rem_euclid(2.0 * YAW_LIMIT) - YAW_LIMIT;
    if wrapped == -YAW_LIMIT && yaw > 0.0 {
        YAW_LIMIT
    } else {
        wrapped
    }
}
