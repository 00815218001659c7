//! dokumon-io - Decode and encode pixel buffers
//!
//! The transform engine owns no file format. This crate is the adapter the
//! capture and display sides use to turn encoded images into
//! [`PixelBuffer`]s and back.
//!
//! Supported formats (cargo features, both on by default):
//!
//! - `png-format`: PNG read/write
//! - `jpeg`: JPEG read/write

mod error;
pub mod format;
#[cfg(feature = "jpeg")]
pub mod jpeg;
#[cfg(feature = "png-format")]
pub mod png;

pub use error::{IoError, IoResult};
pub use format::{ImageFormat, detect_format, detect_format_from_bytes};

use dokumon_core::PixelBuffer;
use log::debug;
use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor, Write};
use std::path::Path;

/// Read an image file, detecting the format from its header.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<PixelBuffer> {
    let path = path.as_ref();
    let format = detect_format(path)?;
    debug!("read_image: {} as {:?}", path.display(), format);
    let reader = BufReader::new(File::open(path)?);
    read_image_format(reader, format)
}

/// Decode an image held in memory, detecting the format from its header.
pub fn read_image_mem(data: &[u8]) -> IoResult<PixelBuffer> {
    let format = detect_format_from_bytes(data)?;
    read_image_format(Cursor::new(data), format)
}

fn read_image_format<R>(reader: R, format: ImageFormat) -> IoResult<PixelBuffer>
where
    R: std::io::BufRead + std::io::Seek,
{
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::read_png(reader),
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::read_jpeg(reader),
        #[allow(unreachable_patterns)]
        other => {
            let _ = reader;
            Err(IoError::UnsupportedFormat(format!(
                "{:?} support not enabled",
                other
            )))
        }
    }
}

/// Write an image file in the given format.
pub fn write_image<P: AsRef<Path>>(
    pix: &PixelBuffer,
    path: P,
    format: ImageFormat,
) -> IoResult<()> {
    let path = path.as_ref();
    debug!("write_image: {} as {:?}", path.display(), format);
    let mut writer = BufWriter::new(File::create(path)?);
    write_image_format(pix, &mut writer, format)?;
    writer.flush()?;
    Ok(())
}

/// Encode an image into memory.
pub fn write_image_mem(pix: &PixelBuffer, format: ImageFormat) -> IoResult<Vec<u8>> {
    let mut buffer = Vec::new();
    write_image_format(pix, &mut buffer, format)?;
    Ok(buffer)
}

fn write_image_format<W: Write>(pix: &PixelBuffer, writer: W, format: ImageFormat) -> IoResult<()> {
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::write_png(pix, writer),
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::write_jpeg(pix, writer),
        #[allow(unreachable_patterns)]
        other => {
            let _ = (pix, writer);
            Err(IoError::UnsupportedFormat(format!(
                "{:?} support not enabled",
                other
            )))
        }
    }
}
