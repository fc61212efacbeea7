//! Profile card renders a fixed-layout "self-introduction" card: a background image (cover-fit,
//! zoomable and pannable) overlaid with rounded, semi-transparent panels that each show a
//! labeled text field.
//!
//! # Pipeline overview
//!
//! 1. **Describe**: a [`Card`] document (JSON) or hand-built [`ItemMap`], [`LayoutRegistry`] and
//!    [`BackgroundState`]
//! 2. **Compose**: [`CardRenderer::render`] draws onto any [`Surface`] and returns a
//!    [`RenderReport`]
//! 3. **Rasterize**: [`CpuSurface::finish`] yields a straight-alpha [`FrameRGBA`]
//! 4. **Export**: [`encode_png`] / [`write_png`]
//!
//! [`RecordingSurface`] captures the same drawing as a display list, which is how layout and
//! wrapping are inspected without fonts or pixels.
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Full redraw**: rendering keeps no state between calls; identical inputs draw identically.
//! - **Slot isolation**: one failing slot never aborts the others.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod encode;
mod foundation;
mod layout;
mod render;
mod scene;

pub use assets::decode::{DecodedImage, decode_image, load_image};
pub use assets::fonts::{FontSet, FontWeight};
pub use encode::png::{encode_png, write_png};
pub use foundation::core::{
    Affine, BezPath, CANVAS_HEIGHT, CANVAS_WIDTH, Canvas, Point, Rect, Rgba8, Size, Vec2,
};
pub use foundation::error::{CardError, CardResult};
pub use layout::registry::{LayoutRegistry, LayoutSlot, STANDARD_Y_OFFSET};
pub use render::background::{cover_rect, cover_size, draw_background};
pub use render::compositor::{CardRenderer, RenderReport, SlotFailure, render_card};
pub use render::cpu::CpuSurface;
pub use render::frame::FrameRGBA;
pub use render::pipeline::render_frame;
pub use render::recording::{AdvanceMetrics, DrawCmd, RecordingSurface};
pub use render::surface::{
    GradientStop, Surface, TextAlign, TextBaseline, TextStyle, rounded_rect_path,
};
pub use render::text::{PositionedLine, position_lines, try_wrap_text, wrap_text};
pub use render::theme::{Theme, ThemePreset};
pub use scene::card::{BackgroundDef, Card, CardItem, FontsDef, normalize_rel_path};
pub use scene::model::{
    BackgroundState, BackgroundTransform, DEFAULT_TITLE_COLOR, DEFAULT_TITLE_FONT_SIZE,
    DEFAULT_VALUE_COLOR, DEFAULT_VALUE_FONT_SIZE, Item, ItemMap, MAX_ZOOM, MIN_ZOOM,
};
