//! Icon loading: decode PNG, scale, convert to premultiplied BGRA

use std::path::Path;

use image::RgbaImage;
use image::imageops::{self, FilterType};

use crate::error::AssetError;
use crate::layout::Size;

/// Top-down premultiplied BGRA pixels (GDI AlphaBlend layout)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconPixels {
    pub size: Size,
    pub bgra: Vec<u8>,
}

/// Decode and scale an icon file to `size`
pub fn load(path: &Path, size: Size) -> Result<IconPixels, AssetError> {
    if !path.is_file() {
        return Err(AssetError::IconMissing {
            path: path.to_path_buf(),
        });
    }
    let decoded = image::open(path).map_err(|source| AssetError::IconDecode {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(from_rgba(&decoded.to_rgba8(), size))
}

/// Scale (if needed) and convert
pub fn from_rgba(image: &RgbaImage, size: Size) -> IconPixels {
    let (w, h) = (size.width.max(1) as u32, size.height.max(1) as u32);
    let scaled;
    let image = if image.dimensions() == (w, h) {
        image
    } else {
        scaled = imageops::resize(image, w, h, FilterType::Lanczos3);
        &scaled
    };

    let mut bgra = Vec::with_capacity((w * h * 4) as usize);
    for pixel in image.pixels() {
        let [r, g, b, a] = pixel.0;
        bgra.extend_from_slice(&[premultiply(b, a), premultiply(g, a), premultiply(r, a), a]);
    }

    IconPixels {
        size: Size::new(w as i32, h as i32),
        bgra,
    }
}

fn premultiply(channel: u8, alpha: u8) -> u8 {
    ((channel as u32 * alpha as u32 + 127) / 255) as u8
}
