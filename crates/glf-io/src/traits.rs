//! Reader and writer traits for image formats.

use crate::IoResult;
use std::path::Path;

/// A format reader configured by an options struct.
///
/// # Example
///
/// ```rust
/// use glf_io::tga::TgaReader;
/// use glf_io::FormatReader;
///
/// let reader = TgaReader::default();
/// assert_eq!(reader.extensions(), &["tga"]);
/// ```
pub trait FormatReader<O: Default>: Sized {
    /// Decoded image type.
    type Image;

    /// Human readable format name.
    fn format_name(&self) -> &'static str;

    /// Lowercase file extensions, without the dot.
    fn extensions(&self) -> &'static [&'static str];

    /// Quick header sniff. `false` means the data is certainly not readable.
    fn can_read(&self, header: &[u8]) -> bool;

    /// Reads an image from a file path.
    fn read<P: AsRef<Path>>(&self, path: P) -> IoResult<Self::Image>;

    /// Reads an image from memory.
    fn read_from_memory(&self, data: &[u8]) -> IoResult<Self::Image>;

    /// Creates a reader with the given options.
    fn with_options(options: O) -> Self;
}

/// A format writer configured by an options struct.
pub trait FormatWriter<O: Default>: Sized {
    /// Image type accepted by the writer.
    type Image;

    /// Human readable format name.
    fn format_name(&self) -> &'static str;

    /// Lowercase file extensions, without the dot.
    fn extensions(&self) -> &'static [&'static str];

    /// Writes an image to a file path.
    fn write<P: AsRef<Path>>(&self, path: P, image: &Self::Image) -> IoResult<()>;

    /// Writes an image to memory.
    fn write_to_memory(&self, image: &Self::Image) -> IoResult<Vec<u8>>;

    /// Creates a writer with the given options.
    fn with_options(options: O) -> Self;
}
