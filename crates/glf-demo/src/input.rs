//! Window-system neutral input events.
//!
//! Applications translate their toolkit's events (SDL, winit, DOM) into
//! [`InputEvent`] and feed them to the demonstration.

/// Mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Drags the camera.
    Left,
    /// Drags the sun.
    Right,
    /// Unused.
    Middle,
}

/// Keys the demonstration reacts to, by physical position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Move left.
    A,
    /// Move right.
    D,
    /// Move down.
    C,
    /// Move up.
    Space,
    /// Move forward.
    W,
    /// Move back.
    S,
    /// Any other key, by scancode.
    Other(u32),
}

/// A single input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Mouse button press or release.
    Button {
        /// Which button.
        button: MouseButton,
        /// `true` on press.
        down: bool,
    },
    /// Pointer moved to window coordinates `(x, y)`.
    Motion {
        /// Horizontal position in pixels.
        x: i32,
        /// Vertical position in pixels, growing downward.
        y: i32,
    },
    /// Key press or release.
    Key {
        /// Which key.
        key: Key,
        /// `true` on press.
        down: bool,
        /// Auto-repeat; such events are ignored.
        repeat: bool,
    },
    /// Window close request.
    Quit,
}
