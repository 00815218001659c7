//! PNG image format support
//!
//! Every PNG flavor (gray, gray+alpha, RGB, RGBA, palette, 1..16 bits) is
//! expanded to 8-bit channels and stored as RGBA. Output is always 8-bit
//! RGBA so alpha survives a round trip.

use crate::{IoError, IoResult};
use dokumon_core::{PixelBuffer, PixelBufferMut, color};
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};
use std::io::{BufRead, Seek, Write};

/// Read a PNG image
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<PixelBuffer> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::EXPAND | Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let (color_type, bit_depth) = reader.output_color_type();
    if bit_depth != BitDepth::Eight {
        return Err(IoError::UnsupportedFormat(format!(
            "unsupported PNG output depth: {:?}",
            bit_depth
        )));
    }
    let samples = match color_type {
        ColorType::Grayscale => 1,
        ColorType::GrayscaleAlpha => 2,
        ColorType::Rgb => 3,
        ColorType::Rgba => 4,
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "unexpanded PNG color type: {:?}",
                other
            )));
        }
    };

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let width = output_info.width;
    let height = output_info.height;
    let bytes_per_row = output_info.line_size;
    let data = &buf[..output_info.buffer_size()];

    let mut pix = PixelBufferMut::new(width, height)?;
    pix.for_each_row_mut(|y, row| {
        let row_start = y as usize * bytes_per_row;
        for (x, dst) in row.iter_mut().enumerate() {
            let idx = row_start + x * samples;
            let s = &data[idx..idx + samples];
            *dst = match samples {
                1 => color::compose_rgb(s[0], s[0], s[0]),
                2 => color::compose_rgba(s[0], s[0], s[0], s[1]),
                3 => color::compose_rgb(s[0], s[1], s[2]),
                _ => color::compose_rgba(s[0], s[1], s[2], s[3]),
            };
        }
    });

    Ok(pix.into())
}

/// Write a PNG image as 8-bit RGBA
pub fn write_png<W: Write>(pix: &PixelBuffer, writer: W) -> IoResult<()> {
    let mut encoder = Encoder::new(writer, pix.width(), pix.height());
    encoder.set_color(ColorType::Rgba);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;

    writer
        .write_image_data(&pix.to_rgba_bytes())
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;

    writer
        .finish()
        .map_err(|e| IoError::EncodeError(format!("PNG finish error: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_png_roundtrip_rgba() {
        let mut pix = PixelBufferMut::new(5, 4).unwrap();
        for y in 0..4 {
            for x in 0..5 {
                pix.set_rgba(x, y, (x * 50) as u8, (y * 60) as u8, 7, (x * 40 + 50) as u8)
                    .unwrap();
            }
        }
        let pix: PixelBuffer = pix.into();

        let mut buffer = Vec::new();
        write_png(&pix, &mut buffer).unwrap();

        let pix2 = read_png(Cursor::new(buffer)).unwrap();
        assert_eq!(pix2, pix);
    }

    #[test]
    fn test_png_read_grayscale() {
        let mut buffer = Vec::new();
        {
            let mut encoder = Encoder::new(&mut buffer, 3, 1);
            encoder.set_color(ColorType::Grayscale);
            encoder.set_depth(BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(&[0, 128, 255]).unwrap();
            writer.finish().unwrap();
        }

        let pix = read_png(Cursor::new(buffer)).unwrap();
        assert_eq!(pix.get_rgba(0, 0), Some((0, 0, 0, 255)));
        assert_eq!(pix.get_rgba(1, 0), Some((128, 128, 128, 255)));
        assert_eq!(pix.get_rgba(2, 0), Some((255, 255, 255, 255)));
    }

    #[test]
    fn test_png_read_garbage() {
        let result = read_png(Cursor::new(b"not a png".to_vec()));
        assert!(matches!(result, Err(IoError::DecodeError(_))));
    }
}
