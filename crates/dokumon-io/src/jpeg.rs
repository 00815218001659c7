//! JPEG image format support
//!
//! Reads with `jpeg-decoder` (8-bit grayscale and RGB) and writes with
//! `jpeg-encoder`. JPEG carries no alpha: decoded pixels are opaque and the
//! alpha channel is dropped on encode.

use crate::{IoError, IoResult};
use dokumon_core::{PixelBuffer, PixelBufferMut, color};
use jpeg_decoder::PixelFormat;
use std::io::{Read, Write};

/// Default quality used by [`write_jpeg`]
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Read a JPEG image from a reader.
///
/// # Arguments
/// * `reader` - A reader positioned at the JPEG SOI marker (`FF D8`)
pub fn read_jpeg<R: Read>(reader: R) -> IoResult<PixelBuffer> {
    let mut decoder = jpeg_decoder::Decoder::new(reader);
    let data = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(format!("JPEG decode error: {}", e)))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("JPEG header missing".to_string()))?;

    let samples = match info.pixel_format {
        PixelFormat::L8 => 1,
        PixelFormat::RGB24 => 3,
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported JPEG pixel format: {:?}",
                other
            )));
        }
    };

    let width = u32::from(info.width);
    let height = u32::from(info.height);
    let expected = width as usize * height as usize * samples;
    if data.len() < expected {
        return Err(IoError::InvalidData(format!(
            "JPEG data too short: expected {} bytes, got {}",
            expected,
            data.len()
        )));
    }

    let mut pix = PixelBufferMut::new(width, height)?;
    let row_bytes = width as usize * samples;
    pix.for_each_row_mut(|y, row| {
        let row_start = y as usize * row_bytes;
        for (x, dst) in row.iter_mut().enumerate() {
            let idx = row_start + x * samples;
            *dst = if samples == 1 {
                color::compose_rgb(data[idx], data[idx], data[idx])
            } else {
                color::compose_rgb(data[idx], data[idx + 1], data[idx + 2])
            };
        }
    });

    Ok(pix.into())
}

/// Write a JPEG image at [`DEFAULT_JPEG_QUALITY`].
pub fn write_jpeg<W: Write>(pix: &PixelBuffer, writer: W) -> IoResult<()> {
    write_jpeg_with_quality(pix, writer, DEFAULT_JPEG_QUALITY)
}

/// Write a JPEG image with an explicit quality (1..=100).
pub fn write_jpeg_with_quality<W: Write>(
    pix: &PixelBuffer,
    mut writer: W,
    quality: u8,
) -> IoResult<()> {
    let width = u16::try_from(pix.width()).map_err(|_| {
        IoError::EncodeError(format!("JPEG width {} exceeds 65535", pix.width()))
    })?;
    let height = u16::try_from(pix.height()).map_err(|_| {
        IoError::EncodeError(format!("JPEG height {} exceeds 65535", pix.height()))
    })?;

    let mut jpeg_buf = Vec::new();
    let encoder = jpeg_encoder::Encoder::new(&mut jpeg_buf, quality.clamp(1, 100));
    encoder
        .encode(
            &pix.to_rgba_bytes(),
            width,
            height,
            jpeg_encoder::ColorType::Rgba,
        )
        .map_err(|e| IoError::EncodeError(format!("JPEG encode error: {}", e)))?;
    writer.write_all(&jpeg_buf)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_jpeg_roundtrip_uniform() {
        let pix = PixelBuffer::new_filled(16, 16, color::compose_rgba(120, 60, 200, 10)).unwrap();

        let mut buffer = Vec::new();
        write_jpeg(&pix, &mut buffer).unwrap();
        assert_eq!(&buffer[..3], &[0xFF, 0xD8, 0xFF]);

        let pix2 = read_jpeg(Cursor::new(buffer)).unwrap();
        assert!(pix2.sizes_equal(&pix));
        // Lossy, and alpha is not stored
        let (r, g, b, a) = pix2.get_rgba(8, 8).unwrap();
        assert!(r.abs_diff(120) <= 4 && g.abs_diff(60) <= 4 && b.abs_diff(200) <= 4);
        assert_eq!(a, 255);
    }

    #[test]
    fn test_jpeg_read_garbage() {
        let result = read_jpeg(Cursor::new(vec![0u8; 16]));
        assert!(matches!(result, Err(IoError::DecodeError(_))));
    }
}
