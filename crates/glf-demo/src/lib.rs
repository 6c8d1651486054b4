//! # glf-demo
//!
//! The interactive part of a small GL demonstration, without the window.
//!
//! [`Demonstration`] turns pointer drags and WASD-style keys into a camera
//! view matrix, a projection matrix, and a sun direction. The host
//! application owns the window and the GL context: it converts its events to
//! [`InputEvent`], calls [`Demonstration::frame`] once per frame, and uploads
//! the resulting matrices.
//!
//! ```rust
//! use glf_demo::{Demonstration, DemoConfig, InputEvent, MouseButton};
//!
//! let mut demo = Demonstration::new(DemoConfig::default());
//! let events = [
//!     InputEvent::Button { button: MouseButton::Left, down: true },
//!     InputEvent::Motion { x: 0, y: 300 },
//! ];
//! demo.frame(events);
//!
//! let model_view = demo.view();
//! let projection = demo.projection();
//! assert!((projection * model_view).is_finite());
//! ```
//!
//! # Feature Flags
//!
//! - `serde` - `Serialize`/`Deserialize` for [`DemoConfig`]

#![warn(missing_docs)]

mod config;
mod demonstration;
mod input;

pub use config::{DemoConfig, DEFAULT_FOV, DEFAULT_VIEWPORT};
pub use demonstration::Demonstration;
pub use input::{InputEvent, Key, MouseButton};
