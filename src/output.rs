//! Image encoding: binary P6 PPM and PNG

use crate::error::Error;
use crate::render::PixelBuffer;
use image::{Rgb, RgbImage};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Write the buffer to `path`, picking the encoder from the extension
pub fn write_image(path: &Path, buffer: &PixelBuffer) -> Result<(), Error> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("ppm") => write_ppm(path, buffer),
        Some("png") => write_png(path, buffer),
        other => Err(Error::UnsupportedImageFormat {
            extension: other.unwrap_or("").to_string(),
        }),
    }
}

/// Scale a [0,1] channel to 8 bits
fn scale_channel(value: f64) -> u8 {
    (255.0 * value.clamp(0.0, 1.0)).round() as u8
}

/// The complete P6 encoding: `P6\n<w> <h>\n255\n` then interleaved RGB.
/// The header must match byte for byte for standard raster viewers.
fn ppm_bytes(buffer: &PixelBuffer) -> Vec<u8> {
    let mut bytes = format!("P6\n{} {}\n255\n", buffer.width(), buffer.height()).into_bytes();
    bytes.reserve(buffer.pixels().len() * 3);
    for color in buffer.pixels() {
        bytes.push(scale_channel(color[0]));
        bytes.push(scale_channel(color[1]));
        bytes.push(scale_channel(color[2]));
    }
    bytes
}

fn write_ppm(path: &Path, buffer: &PixelBuffer) -> Result<(), Error> {
    let mut file = File::create(path)?;
    file.write_all(&ppm_bytes(buffer))?;
    Ok(())
}

fn write_png(path: &Path, buffer: &PixelBuffer) -> Result<(), Error> {
    let mut img = RgbImage::new(buffer.width() as u32, buffer.height() as u32);
    for y in 0..buffer.height() {
        for x in 0..buffer.width() {
            let color = buffer.pixel(x, y);
            img.put_pixel(
                x as u32,
                y as u32,
                Rgb([
                    scale_channel(color[0]),
                    scale_channel(color[1]),
                    scale_channel(color[2]),
                ]),
            );
        }
    }
    img.save(path)?;
    Ok(())
}
