use std::io::Cursor;
use std::path::Path;

use anyhow::Context;

use crate::foundation::error::{CardError, CardResult};
use crate::render::frame::FrameRGBA;

/// Encode a straight-alpha frame as PNG bytes.
pub fn encode_png(frame: &FrameRGBA) -> CardResult<Vec<u8>> {
    let img = straight_image(frame)?;
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .context("encode png")?;
    Ok(buf)
}

/// Write a straight-alpha frame to `path` as PNG, creating parent directories.
#[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn write_png(frame: &FrameRGBA, path: impl AsRef<Path>) -> CardResult<()> {
    let path = path.as_ref();
    let img = straight_image(frame)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    img.save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", path.display()))?;
    tracing::debug!(width = frame.width, height = frame.height, "png written");
    Ok(())
}

fn straight_image(frame: &FrameRGBA) -> CardResult<image::RgbaImage> {
    let mut data = frame.data.clone();
    if frame.premultiplied {
        crate::assets::decode::unpremultiply_rgba8_in_place(&mut data);
    }
    image::RgbaImage::from_raw(frame.width, frame.height, data)
        .ok_or_else(|| CardError::render("frame byte len does not match its dimensions"))
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
