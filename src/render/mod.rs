//! Drawing: the surface abstraction, its backends and the card compositor.

/// Cover-fit background and placeholder gradient.
pub mod background;
/// Slot-by-slot card composition.
pub mod compositor;
/// `vello_cpu` raster backend.
pub mod cpu;
/// Rendered pixel frames.
pub mod frame;
/// One-shot card to pixels.
pub mod pipeline;
/// Display-list recording backend.
pub mod recording;
/// Drawing surface trait and shape helpers.
pub mod surface;
/// Greedy per-character wrapping.
pub mod text;
/// Drawing constants and presets.
pub mod theme;
