//! Demonstration settings.

/// Default vertical field of view in degrees.
pub const DEFAULT_FOV: f32 = 60.0;

/// Default viewport size.
pub const DEFAULT_VIEWPORT: [u32; 2] = [800, 600];

/// Viewport and camera settings for a [`Demonstration`](crate::Demonstration).
///
/// # Example
///
/// ```rust
/// use glf_demo::DemoConfig;
///
/// let config = DemoConfig {
///     width: 1280,
///     height: 720,
///     ..Default::default()
/// };
/// assert_eq!(config.fov_degrees, 60.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DemoConfig {
    /// Viewport width in pixels.
    pub width: u32,
    /// Viewport height in pixels.
    pub height: u32,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    /// Near clip distance.
    pub near: f32,
    /// Far clip distance.
    pub far: f32,
    /// Camera travel per step at unit velocity.
    pub speed: f32,
    /// Pitch change in degrees for a drag across the viewport height.
    pub pitch_range: f32,
    /// Yaw change in degrees for a drag across the viewport height.
    pub yaw_range: f32,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_VIEWPORT[0],
            height: DEFAULT_VIEWPORT[1],
            fov_degrees: DEFAULT_FOV,
            near: 0.1,
            far: 100.0,
            speed: 1.0 / 30.0,
            pitch_range: 90.0,
            yaw_range: 180.0,
        }
    }
}

impl DemoConfig {
    /// Viewport width over height. A zero height counts as one pixel.
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}
