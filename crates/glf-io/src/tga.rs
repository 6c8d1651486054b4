//! Truevision TGA format support.
//!
//! Reads and writes uncompressed true-color images (image type 2) with
//! 24-bit BGR or 32-bit BGRA pixels. Pixels are kept in file order: blue
//! first, rows from the bottom of the image up.
//!
//! # Layout
//!
//! ```text
//! offset  size  field
//!      0     1  ID length
//!      1     1  color map type
//!      2     1  image type (2 = uncompressed true-color)
//!      3     5  color map fields
//!      8     4  x / y origin (u16 LE each)
//!     12     4  width / height (u16 LE each)
//!     16     1  pixel depth in bits
//!     17     1  descriptor (bits 0-3 alpha bits, bit 5 top-left origin)
//! ```
//!
//! Color-mapped, grayscale, and run-length encoded images are rejected.

use crate::{FormatReader, FormatWriter, IoError, IoResult};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor, Read, Write};
use std::path::Path;
use tracing::debug;

const HEADER_LEN: usize = 18;

const TYPE_COLOR_MAPPED: u8 = 1;
const TYPE_TRUE_COLOR: u8 = 2;
const TYPE_GRAYSCALE: u8 = 3;
const TYPE_RLE_COLOR_MAPPED: u8 = 9;
const TYPE_RLE_TRUE_COLOR: u8 = 10;
const TYPE_RLE_GRAYSCALE: u8 = 11;

const DESC_ALPHA_MASK: u8 = 0x0F;
const DESC_RIGHT_TO_LEFT: u8 = 0x10;
const DESC_TOP_TO_BOTTOM: u8 = 0x20;

// === Image ===

/// An uncompressed true-color image.
///
/// `data` holds `width * height * depth` bytes in BGR or BGRA order, with
/// the bottom row first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TgaImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Bytes per pixel, 3 or 4.
    pub depth: u32,
    /// Pixel bytes.
    pub data: Vec<u8>,
}

impl TgaImage {
    /// Creates an image, checking depth and buffer size.
    ///
    /// # Example
    ///
    /// ```rust
    /// use glf_io::TgaImage;
    ///
    /// let image = TgaImage::new(2, 1, 3, vec![255, 0, 0, 0, 0, 255])?;
    /// assert_eq!(image.pixel(1, 0), Some(&[0, 0, 255][..]));
    /// # Ok::<(), glf_io::IoError>(())
    /// ```
    pub fn new(width: u32, height: u32, depth: u32, data: Vec<u8>) -> IoResult<Self> {
        let image = Self {
            width,
            height,
            depth,
            data,
        };
        image.validate()?;
        Ok(image)
    }

    /// Expected pixel buffer length in bytes.
    pub fn byte_len(&self) -> usize {
        self.width as usize * self.height as usize * self.depth as usize
    }

    /// Whether the image carries an alpha channel.
    pub fn has_alpha(&self) -> bool {
        self.depth == 4
    }

    /// BGR(A) bytes of the pixel at column `x`, row `y` counted from the
    /// bottom. `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let depth = self.depth as usize;
        let start = (y as usize * self.width as usize + x as usize) * depth;
        self.data.get(start..start + depth)
    }

    /// Converts to tightly packed RGBA bytes, keeping the bottom-up row
    /// order. Images without alpha get an opaque alpha channel.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let depth = self.depth as usize;
        let mut out = Vec::with_capacity(self.width as usize * self.height as usize * 4);
        for px in self.data.chunks_exact(depth) {
            let alpha = if depth == 4 { px[3] } else { 255 };
            out.extend_from_slice(&[px[2], px[1], px[0], alpha]);
        }
        out
    }

    fn validate(&self) -> IoResult<()> {
        if self.depth != 3 && self.depth != 4 {
            return Err(IoError::UnsupportedBitDepth(format!(
                "{} bits per pixel (expected 24 or 32)",
                self.depth * 8
            )));
        }
        if self.width == 0 || self.height == 0 {
            return Err(IoError::InvalidFile(format!(
                "empty image {}x{}",
                self.width, self.height
            )));
        }
        if self.width > u16::MAX as u32 || self.height > u16::MAX as u32 {
            return Err(IoError::DimensionMismatch {
                expected: format!("at most {0}x{0}", u16::MAX),
                actual: format!("{}x{}", self.width, self.height),
            });
        }
        if self.data.len() != self.byte_len() {
            return Err(IoError::DimensionMismatch {
                expected: format!("{} bytes", self.byte_len()),
                actual: format!("{} bytes", self.data.len()),
            });
        }
        Ok(())
    }
}

// === Options ===

/// Row order of pixel data in a written file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Origin {
    /// First row in the file is the bottom of the image.
    #[default]
    BottomLeft,
    /// First row in the file is the top of the image (descriptor bit 5).
    TopLeft,
}

/// TGA reader options.
///
/// # Example
///
/// ```rust
/// use glf_io::tga::{TgaReader, TgaReaderOptions};
/// use glf_io::FormatReader;
///
/// let reader = TgaReader::with_options(TgaReaderOptions {
///     max_pixels: Some(4096 * 4096),
/// });
/// ```
#[derive(Debug, Clone, Default)]
pub struct TgaReaderOptions {
    /// Largest `width * height` accepted before pixel storage is allocated.
    /// Default: no limit.
    pub max_pixels: Option<u64>,
}

/// TGA writer options.
///
/// # Example
///
/// ```rust
/// use glf_io::tga::{Origin, TgaWriterOptions};
///
/// let options = TgaWriterOptions {
///     origin: Origin::TopLeft,
/// };
/// ```
#[derive(Debug, Clone, Default)]
pub struct TgaWriterOptions {
    /// Row order written to the file. Default: bottom-left.
    pub origin: Origin,
}

// === Header ===

#[derive(Debug, Clone, PartialEq, Eq)]
struct TgaHeader {
    id_length: u8,
    colormap_type: u8,
    image_type: u8,
    colormap_length: u16,
    colormap_entry_bits: u8,
    width: u16,
    height: u16,
    pixel_bits: u8,
    descriptor: u8,
}

impl TgaHeader {
    fn read<R: Read>(reader: &mut R) -> IoResult<Self> {
        let mut raw = [0u8; HEADER_LEN];
        reader
            .read_exact(&mut raw)
            .map_err(|_| IoError::InvalidFile("truncated TGA header".into()))?;

        let mut c = Cursor::new(&raw[..]);
        let id_length = c.read_u8()?;
        let colormap_type = c.read_u8()?;
        let image_type = c.read_u8()?;
        let _colormap_first = c.read_u16::<LittleEndian>()?;
        let colormap_length = c.read_u16::<LittleEndian>()?;
        let colormap_entry_bits = c.read_u8()?;
        let _x_origin = c.read_u16::<LittleEndian>()?;
        let _y_origin = c.read_u16::<LittleEndian>()?;
        let width = c.read_u16::<LittleEndian>()?;
        let height = c.read_u16::<LittleEndian>()?;
        let pixel_bits = c.read_u8()?;
        let descriptor = c.read_u8()?;

        Ok(Self {
            id_length,
            colormap_type,
            image_type,
            colormap_length,
            colormap_entry_bits,
            width,
            height,
            pixel_bits,
            descriptor,
        })
    }

    fn write<W: Write>(&self, writer: &mut W) -> IoResult<()> {
        writer.write_u8(self.id_length)?;
        writer.write_u8(self.colormap_type)?;
        writer.write_u8(self.image_type)?;
        writer.write_u16::<LittleEndian>(0)?;
        writer.write_u16::<LittleEndian>(self.colormap_length)?;
        writer.write_u8(self.colormap_entry_bits)?;
        writer.write_u16::<LittleEndian>(0)?;
        writer.write_u16::<LittleEndian>(0)?;
        writer.write_u16::<LittleEndian>(self.width)?;
        writer.write_u16::<LittleEndian>(self.height)?;
        writer.write_u8(self.pixel_bits)?;
        writer.write_u8(self.descriptor)?;
        Ok(())
    }

    /// Bytes between the header and the pixel data.
    fn skip_len(&self) -> usize {
        let colormap = if self.colormap_type != 0 {
            self.colormap_length as usize * (self.colormap_entry_bits as usize).div_ceil(8)
        } else {
            0
        };
        self.id_length as usize + colormap
    }

    fn check_supported(&self) -> IoResult<()> {
        match self.image_type {
            TYPE_TRUE_COLOR => {}
            TYPE_COLOR_MAPPED | TYPE_RLE_COLOR_MAPPED => {
                return Err(IoError::UnsupportedFormat("color-mapped TGA".into()));
            }
            TYPE_GRAYSCALE | TYPE_RLE_GRAYSCALE => {
                return Err(IoError::UnsupportedFormat("grayscale TGA".into()));
            }
            TYPE_RLE_TRUE_COLOR => {
                return Err(IoError::UnsupportedFormat("run-length encoded TGA".into()));
            }
            other => {
                return Err(IoError::UnsupportedFormat(format!("TGA image type {other}")));
            }
        }

        if self.pixel_bits != 24 && self.pixel_bits != 32 {
            return Err(IoError::UnsupportedBitDepth(format!(
                "{} bits per pixel (expected 24 or 32)",
                self.pixel_bits
            )));
        }

        if self.descriptor & DESC_RIGHT_TO_LEFT != 0 {
            return Err(IoError::UnsupportedFormat("right-to-left pixel order".into()));
        }

        if self.width == 0 || self.height == 0 {
            return Err(IoError::InvalidFile(format!(
                "empty image {}x{}",
                self.width, self.height
            )));
        }

        Ok(())
    }
}

/// Reverses the row order of a packed pixel buffer in place.
fn flip_rows(data: &mut [u8], row_len: usize) {
    let rows = data.len() / row_len;
    for y in 0..rows / 2 {
        let (top, bottom) = data.split_at_mut((rows - 1 - y) * row_len);
        top[y * row_len..(y + 1) * row_len].swap_with_slice(&mut bottom[..row_len]);
    }
}

// === TgaReader ===

/// TGA format reader.
#[derive(Debug, Clone, Default)]
pub struct TgaReader {
    options: TgaReaderOptions,
}

impl TgaReader {
    /// Creates a reader with default options.
    pub fn new() -> Self {
        Self::default()
    }

    fn read_from<R: Read>(&self, reader: &mut R) -> IoResult<TgaImage> {
        let header = TgaHeader::read(reader)?;
        header.check_supported()?;

        let skip = header.skip_len() as u64;
        if skip > 0 {
            let skipped = std::io::copy(&mut reader.by_ref().take(skip), &mut std::io::sink())?;
            if skipped != skip {
                return Err(IoError::InvalidFile("truncated TGA image ID".into()));
            }
        }

        let width = header.width as u32;
        let height = header.height as u32;
        let depth = header.pixel_bits as u32 / 8;
        if let Some(max) = self.options.max_pixels {
            let pixels = width as u64 * height as u64;
            if pixels > max {
                return Err(IoError::InvalidFile(format!(
                    "{width}x{height} exceeds the {max} pixel limit"
                )));
            }
        }
        let len = width as usize * height as usize * depth as usize;

        let mut data = vec![0u8; len];
        reader.read_exact(&mut data).map_err(|_| {
            IoError::InvalidFile(format!("truncated pixel data, expected {len} bytes"))
        })?;

        if header.descriptor & DESC_TOP_TO_BOTTOM != 0 {
            flip_rows(&mut data, width as usize * depth as usize);
        }

        debug!(
            width,
            height,
            depth,
            alpha_bits = header.descriptor & DESC_ALPHA_MASK,
            "decoded TGA"
        );

        Ok(TgaImage {
            width,
            height,
            depth,
            data,
        })
    }
}

impl FormatReader<TgaReaderOptions> for TgaReader {
    type Image = TgaImage;

    fn format_name(&self) -> &'static str {
        "TGA"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["tga"]
    }

    fn can_read(&self, header: &[u8]) -> bool {
        header.len() >= HEADER_LEN
            && header[2] == TYPE_TRUE_COLOR
            && matches!(header[16], 24 | 32)
    }

    fn read<P: AsRef<Path>>(&self, path: P) -> IoResult<TgaImage> {
        let file = File::open(path.as_ref())?;
        let mut reader = BufReader::new(file);
        self.read_from(&mut reader)
    }

    fn read_from_memory(&self, data: &[u8]) -> IoResult<TgaImage> {
        let mut cursor = Cursor::new(data);
        self.read_from(&mut cursor)
    }

    fn with_options(options: TgaReaderOptions) -> Self {
        Self { options }
    }
}

// === TgaWriter ===

/// TGA format writer.
///
/// # Example
///
/// ```rust,ignore
/// use glf_io::tga::{Origin, TgaWriter, TgaWriterOptions};
/// use glf_io::FormatWriter;
///
/// let writer = TgaWriter::with_options(TgaWriterOptions {
///     origin: Origin::TopLeft,
/// });
/// writer.write("screenshot.tga", &image)?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct TgaWriter {
    options: TgaWriterOptions,
}

impl TgaWriter {
    /// Creates a writer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    fn write_to<W: Write>(&self, writer: &mut W, image: &TgaImage) -> IoResult<()> {
        image.validate()?;

        let mut descriptor = if image.has_alpha() { 8 } else { 0 };
        if self.options.origin == Origin::TopLeft {
            descriptor |= DESC_TOP_TO_BOTTOM;
        }

        let header = TgaHeader {
            id_length: 0,
            colormap_type: 0,
            image_type: TYPE_TRUE_COLOR,
            colormap_length: 0,
            colormap_entry_bits: 0,
            width: image.width as u16,
            height: image.height as u16,
            pixel_bits: (image.depth * 8) as u8,
            descriptor,
        };
        header.write(writer)?;

        match self.options.origin {
            Origin::BottomLeft => writer.write_all(&image.data)?,
            Origin::TopLeft => {
                let row_len = (image.width * image.depth) as usize;
                for row in image.data.chunks_exact(row_len).rev() {
                    writer.write_all(row)?;
                }
            }
        }

        debug!(
            width = image.width,
            height = image.height,
            depth = image.depth,
            "encoded TGA"
        );
        Ok(())
    }
}

impl FormatWriter<TgaWriterOptions> for TgaWriter {
    type Image = TgaImage;

    fn format_name(&self) -> &'static str {
        "TGA"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["tga"]
    }

    fn write<P: AsRef<Path>>(&self, path: P, image: &TgaImage) -> IoResult<()> {
        let file = File::create(path.as_ref())?;
        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer, image)?;
        writer.flush()?;
        Ok(())
    }

    fn write_to_memory(&self, image: &TgaImage) -> IoResult<Vec<u8>> {
        let mut buffer = Vec::with_capacity(HEADER_LEN + image.data.len());
        self.write_to(&mut buffer, image)?;
        Ok(buffer)
    }

    fn with_options(options: TgaWriterOptions) -> Self {
        Self { options }
    }
}

// === Convenience Functions ===

/// Reads a TGA file with default options.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<TgaImage> {
    TgaReader::default().read(path)
}

/// Decodes TGA bytes with default options.
pub fn read_from_memory(data: &[u8]) -> IoResult<TgaImage> {
    TgaReader::default().read_from_memory(data)
}

/// Writes a bottom-up TGA file.
pub fn write<P: AsRef<Path>>(path: P, image: &TgaImage) -> IoResult<()> {
    TgaWriter::default().write(path, image)
}

/// Encodes a bottom-up TGA file in memory.
pub fn write_to_memory(image: &TgaImage) -> IoResult<Vec<u8>> {
    TgaWriter::default().write_to_memory(image)
}

/// Reads a TGA file into `(pixels, width, height, bytes_per_pixel)`.
///
/// # Example
///
/// ```rust,no_run
/// let (pixels, width, height, depth) = glf_io::read_tga("crate.tga")?;
/// assert_eq!(pixels.len(), (width * height * depth) as usize);
/// # Ok::<(), glf_io::IoError>(())
/// ```
pub fn read_tga<P: AsRef<Path>>(path: P) -> IoResult<(Vec<u8>, u32, u32, u32)> {
    let image = read(path)?;
    Ok((image.data, image.width, image.height, image.depth))
}

/// Writes BGR(A) pixels, bottom row first, as a TGA file.
pub fn write_tga<P: AsRef<Path>>(
    path: P,
    width: u32,
    height: u32,
    depth: u32,
    pixels: &[u8],
) -> IoResult<()> {
    let image = TgaImage::new(width, height, depth, pixels.to_vec())?;
    write(path, &image)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32, depth: u32) -> TgaImage {
        let mut data = Vec::new();
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&[x as u8, y as u8, (x + y) as u8]);
                if depth == 4 {
                    data.push(200);
                }
            }
        }
        TgaImage::new(width, height, depth, data).unwrap()
    }

    fn raw_header(image_type: u8, bits: u8, descriptor: u8, w: u16, h: u16) -> Vec<u8> {
        let mut v = vec![0, 0, image_type, 0, 0, 0, 0, 0, 0, 0, 0, 0];
        v.extend_from_slice(&w.to_le_bytes());
        v.extend_from_slice(&h.to_le_bytes());
        v.push(bits);
        v.push(descriptor);
        v
    }

    #[test]
    fn test_header_layout() {
        let image = gradient(300, 2, 4);
        let bytes = write_to_memory(&image).unwrap();

        assert_eq!(bytes.len(), HEADER_LEN + 300 * 2 * 4);
        assert_eq!(bytes[2], 2);
        assert_eq!(&bytes[12..14], &300u16.to_le_bytes());
        assert_eq!(&bytes[14..16], &2u16.to_le_bytes());
        assert_eq!(bytes[16], 32);
        assert_eq!(bytes[17], 8);
    }

    #[test]
    fn test_memory_roundtrip() {
        for depth in [3, 4] {
            let image = gradient(5, 3, depth);
            let bytes = write_to_memory(&image).unwrap();
            assert_eq!(read_from_memory(&bytes).unwrap(), image);
        }
    }

    #[test]
    fn test_top_left_origin() {
        let image = gradient(4, 3, 3);
        let writer = TgaWriter::with_options(TgaWriterOptions {
            origin: Origin::TopLeft,
        });
        let bytes = writer.write_to_memory(&image).unwrap();

        assert_eq!(bytes[17] & DESC_TOP_TO_BOTTOM, DESC_TOP_TO_BOTTOM);
        // First stored row is the top row of the image.
        assert_eq!(&bytes[HEADER_LEN..HEADER_LEN + 3], image.pixel(0, 2).unwrap());
        // Reading flips it back to bottom-up.
        assert_eq!(read_from_memory(&bytes).unwrap(), image);
    }

    #[test]
    fn test_pixel_limit() {
        let bytes = write_to_memory(&gradient(5, 3, 3)).unwrap();

        let strict = TgaReader::with_options(TgaReaderOptions {
            max_pixels: Some(14),
        });
        assert!(matches!(
            strict.read_from_memory(&bytes),
            Err(IoError::InvalidFile(_))
        ));

        // Limit is checked before the pixel data, so a header alone is enough.
        let header_only = raw_header(TYPE_TRUE_COLOR, 32, 0, u16::MAX, u16::MAX);
        assert!(matches!(
            strict.read_from_memory(&header_only),
            Err(IoError::InvalidFile(msg)) if msg.contains("pixel limit")
        ));

        let exact = TgaReader::with_options(TgaReaderOptions {
            max_pixels: Some(15),
        });
        assert_eq!(exact.read_from_memory(&bytes).unwrap().width, 5);
    }

    #[test]
    fn test_image_id_skipped() {
        let mut bytes = raw_header(TYPE_TRUE_COLOR, 24, 0, 1, 1);
        bytes[0] = 4;
        bytes.extend_from_slice(b"glf!");
        bytes.extend_from_slice(&[1, 2, 3]);

        let image = read_from_memory(&bytes).unwrap();
        assert_eq!(image.data, [1, 2, 3]);
    }

    #[test]
    fn test_rejects_unsupported_types() {
        for image_type in [TYPE_COLOR_MAPPED, TYPE_GRAYSCALE, TYPE_RLE_TRUE_COLOR, 0] {
            let bytes = raw_header(image_type, 24, 0, 1, 1);
            assert!(matches!(
                read_from_memory(&bytes),
                Err(IoError::UnsupportedFormat(_))
            ));
        }
    }

    #[test]
    fn test_rejects_bit_depths() {
        for bits in [8, 15, 16] {
            let mut bytes = raw_header(TYPE_TRUE_COLOR, bits, 0, 1, 1);
            bytes.extend_from_slice(&[0; 4]);
            assert!(matches!(
                read_from_memory(&bytes),
                Err(IoError::UnsupportedBitDepth(_))
            ));
        }
    }

    #[test]
    fn test_truncated() {
        assert!(matches!(read_from_memory(&[0; 10]), Err(IoError::InvalidFile(_))));

        let mut bytes = raw_header(TYPE_TRUE_COLOR, 24, 0, 2, 2);
        bytes.extend_from_slice(&[0; 5]);
        assert!(matches!(read_from_memory(&bytes), Err(IoError::InvalidFile(_))));
    }

    #[test]
    fn test_buffer_mismatch() {
        let err = TgaImage::new(2, 2, 3, vec![0; 11]).unwrap_err();
        assert!(matches!(err, IoError::DimensionMismatch { .. }));
        assert!(matches!(
            TgaImage::new(2, 2, 2, vec![0; 8]),
            Err(IoError::UnsupportedBitDepth(_))
        ));
        assert!(matches!(
            TgaImage::new(70_000, 1, 3, vec![0; 210_000]),
            Err(IoError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_pixel_and_rgba() {
        let image = TgaImage::new(2, 1, 3, vec![10, 20, 30, 40, 50, 60]).unwrap();
        assert_eq!(image.pixel(1, 0), Some(&[40, 50, 60][..]));
        assert_eq!(image.pixel(2, 0), None);
        assert_eq!(image.to_rgba8(), [30, 20, 10, 255, 60, 50, 40, 255]);
    }

    #[test]
    fn test_flip_rows() {
        let mut data = [1, 1, 2, 2, 3, 3];
        flip_rows(&mut data, 2);
        assert_eq!(data, [3, 3, 2, 2, 1, 1]);
    }

    #[test]
    fn test_can_read() {
        let reader = TgaReader::new();
        assert!(reader.can_read(&raw_header(TYPE_TRUE_COLOR, 32, 8, 1, 1)));
        assert!(!reader.can_read(&raw_header(TYPE_RLE_TRUE_COLOR, 32, 8, 1, 1)));
        assert!(!reader.can_read(&[0; 4]));
    }
}
