use crate::assets::fonts::FontSet;
use crate::foundation::error::CardResult;
use crate::layout::registry::LayoutRegistry;
use crate::render::compositor::{CardRenderer, RenderReport};
use crate::render::cpu::CpuSurface;
use crate::render::frame::FrameRGBA;
use crate::scene::model::{BackgroundState, ItemMap};

/// Render a whole card to pixels on a fresh [`CpuSurface`].
///
/// Pipeline:
/// 1. [`CpuSurface::new`] sized to the layout canvas, with `fonts` attached
/// 2. [`CardRenderer::render`]
/// 3. [`CpuSurface::finish`]
///
/// Returns a [`FrameRGBA`] with **straight** alpha and the per-slot [`RenderReport`]. Slot
/// failures land in the report; only surface setup and rasterization errors are returned as
/// `Err`.
#[tracing::instrument(skip_all)]
pub fn render_frame(
    renderer: &CardRenderer,
    fonts: &FontSet,
    background: &BackgroundState,
    layout: &LayoutRegistry,
    items: &ItemMap,
) -> CardResult<(FrameRGBA, RenderReport)> {
    let mut surface = CpuSurface::new(layout.canvas())?.with_fonts(fonts)?;
    let report = renderer.render(&mut surface, background, layout, items);
    let frame = surface.finish()?;
    tracing::debug!(
        drawn = report.drawn.len(),
        skipped = report.skipped.len(),
        failed = report.failed.len(),
        "card rendered"
    );
    Ok((frame, report))
}
