//! Frame load/save for the formats the CLI speaks. Raw sensor decoding
//! (DNG metadata, CFA patterns) is owned by external collaborators; this
//! module only moves single-channel intensity data in and out.

use std::path::Path;

use image::{DynamicImage, GrayImage, ImageFormat, Luma};
use ndarray::Array2;

use crate::error::{BurstError, Result};
use crate::frame::Frame;

/// Load a grayscale frame, widening to 16-bit samples.
pub fn load_frame(path: &Path) -> Result<Frame> {
    let img = image::open(path)?;
    let bit_depth = match &img {
        DynamicImage::ImageLuma16(_)
        | DynamicImage::ImageLumaA16(_)
        | DynamicImage::ImageRgb16(_)
        | DynamicImage::ImageRgba16(_) => 16,
        _ => 8,
    };

    let gray = img.to_luma16();
    let (w, h) = gray.dimensions();
    let mut data = Array2::<u16>::zeros((h as usize, w as usize));
    for (x, y, Luma([v])) in gray.enumerate_pixels() {
        data[[y as usize, x as usize]] = *v;
    }

    Ok(Frame::new(data, bit_depth))
}

/// Save a frame as 16-bit grayscale PNG.
pub fn save_png16(frame: &Frame, path: &Path) -> Result<()> {
    let h = frame.height();
    let w = frame.width();

    let mut pixels: Vec<u16> = Vec::with_capacity(h * w);
    for row in 0..h {
        for col in 0..w {
            pixels.push(frame.data[[row, col]]);
        }
    }

    let img = image::ImageBuffer::<Luma<u16>, Vec<u16>>::from_raw(w as u32, h as u32, pixels)
        .expect("buffer size matches dimensions");
    img.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// Save a frame as 16-bit grayscale TIFF.
pub fn save_tiff(frame: &Frame, path: &Path) -> Result<()> {
    let h = frame.height();
    let w = frame.width();

    let mut pixels: Vec<u16> = Vec::with_capacity(h * w);
    for row in 0..h {
        for col in 0..w {
            pixels.push(frame.data[[row, col]]);
        }
    }

    let img = image::ImageBuffer::<Luma<u16>, Vec<u16>>::from_raw(w as u32, h as u32, pixels)
        .expect("buffer size matches dimensions");
    img.save_with_format(path, ImageFormat::Tiff)?;
    Ok(())
}

/// Save an 8-bit preview by dropping the low byte of each sample.
pub fn save_preview(frame: &Frame, path: &Path) -> Result<()> {
    let h = frame.height();
    let w = frame.width();

    let mut img = GrayImage::new(w as u32, h as u32);
    for row in 0..h {
        for col in 0..w {
            img.put_pixel(col as u32, row as u32, Luma([(frame.data[[row, col]] >> 8) as u8]));
        }
    }

    img.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// Save a frame, choosing the format from the file extension.
pub fn save_frame(frame: &Frame, path: &Path) -> Result<()> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("png") => save_png16(frame, path),
        Some("tiff" | "tif") => save_tiff(frame, path),
        Some(other) => Err(BurstError::UnsupportedFormat(other.to_string())),
        None => save_png16(frame, path),
    }
}
