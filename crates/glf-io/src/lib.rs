//! # glf-io
//!
//! Texture file support for small GL applications.
//!
//! Only the uncompressed true-color TGA variant is handled: 24-bit BGR or
//! 32-bit BGRA pixels, rows stored bottom-to-top. That layout uploads
//! directly with `glTexImage2D(..., GL_BGR(A), GL_UNSIGNED_BYTE, ...)`.
//!
//! # Usage
//!
//! ```rust,no_run
//! use glf_io::tga;
//!
//! let image = tga::read("crate.tga")?;
//! println!("{}x{} @ {} bytes/pixel", image.width, image.height, image.depth);
//! tga::write("copy.tga", &image)?;
//! # Ok::<(), glf_io::IoError>(())
//! ```

#![warn(missing_docs)]

mod error;
pub mod tga;
mod traits;

pub use error::{IoError, IoResult};
pub use tga::{read_tga, write_tga, TgaImage};
pub use traits::{FormatReader, FormatWriter};
