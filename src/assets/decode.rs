use std::path::Path;
use std::sync::Arc;

use anyhow::Context;

use crate::foundation::error::{CardError, CardResult};

#[derive(Clone, Debug, PartialEq)]
/// Decoded raster image in premultiplied RGBA8 form.
pub struct DecodedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl DecodedImage {
    /// Wrap already-premultiplied RGBA8 bytes.
    pub fn from_premul_rgba8(width: u32, height: u32, bytes: Vec<u8>) -> CardResult<Self> {
        let expected = (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4);
        if bytes.len() != expected {
            return Err(CardError::validation(format!(
                "image byte len {} does not match {width}x{height} RGBA8",
                bytes.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(bytes),
        })
    }

    /// Single-color image, handy for tests and placeholders.
    pub fn solid(width: u32, height: u32, premul: [u8; 4]) -> Self {
        let n = (width as usize) * (height as usize);
        let mut bytes = Vec::with_capacity(n * 4);
        for _ in 0..n {
            bytes.extend_from_slice(&premul);
        }
        Self {
            width,
            height,
            rgba8_premul: Arc::new(bytes),
        }
    }

    /// `true` when either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Decode encoded image bytes (PNG, JPEG, ...) and convert to premultiplied RGBA8.
pub fn decode_image(bytes: &[u8]) -> CardResult<DecodedImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(DecodedImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

/// Read and decode an image file.
pub fn load_image(path: impl AsRef<Path>) -> CardResult<DecodedImage> {
    let path = path.as_ref();
    let bytes =
        std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    let img = decode_image(&bytes)?;
    tracing::debug!(
        path = %path.display(),
        width = img.width,
        height = img.height,
        "decoded background image"
    );
    Ok(img)
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

pub(crate) fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((*c as u16 * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
