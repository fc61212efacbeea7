//! Image decoding and font loading.

/// Raster image decoding into premultiplied RGBA8.
pub mod decode;
/// Font files and Parley text shaping.
pub mod fonts;
