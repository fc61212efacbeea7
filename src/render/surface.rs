use serde::Serialize;

use crate::assets::decode::DecodedImage;
use crate::assets::fonts::FontWeight;
use crate::foundation::core::{BezPath, Canvas, Point, Rect, Rgba8};
use crate::foundation::error::CardResult;

/// Font settings for one text draw.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TextStyle {
    /// Font size in px.
    pub size_px: f64,
    /// Face weight.
    pub weight: FontWeight,
    /// Fill color.
    pub color: Rgba8,
}

/// Horizontal placement of text relative to its anchor point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    /// Anchor is the left edge.
    Left,
    /// Anchor is the horizontal center.
    Center,
}

/// Vertical placement of text relative to its anchor point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextBaseline {
    /// Anchor is the top of the line box.
    Top,
    /// Anchor is the middle of the line box.
    Middle,
}

/// A color stop of a linear gradient.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct GradientStop {
    /// Position along the gradient axis in `[0, 1]`.
    pub offset: f64,
    /// Color at `offset`.
    pub color: Rgba8,
}

/// Minimal 2D drawing capability the card renderer needs.
///
/// Clips nest: every `push_clip` must be matched by a `pop_clip`. Drawing outside the surface
/// bounds is silently discarded.
pub trait Surface {
    /// Surface dimensions.
    fn canvas(&self) -> Canvas;

    /// Discard all previous drawing and clips; the surface becomes fully transparent.
    fn clear(&mut self) -> CardResult<()>;

    /// Fill `rect` with a solid color (alpha-blended).
    fn fill_rect(&mut self, rect: Rect, color: Rgba8) -> CardResult<()>;

    /// Fill `rect` with a linear gradient running from `start` to `end`.
    fn fill_linear_gradient(
        &mut self,
        rect: Rect,
        start: Point,
        end: Point,
        stops: &[GradientStop],
    ) -> CardResult<()>;

    /// Restrict subsequent drawing to the inside of `path`.
    fn push_clip(&mut self, path: &BezPath) -> CardResult<()>;

    /// Remove the most recent clip.
    fn pop_clip(&mut self) -> CardResult<()>;

    /// Draw `image` scaled into `dest`.
    fn draw_image(&mut self, image: &DecodedImage, dest: Rect) -> CardResult<()>;

    /// Advance width of `text` drawn with `style`.
    fn measure_text(&mut self, text: &str, style: &TextStyle) -> CardResult<f64>;

    /// Draw a single line of `text` positioned at `anchor`.
    fn fill_text(
        &mut self,
        text: &str,
        anchor: Point,
        style: &TextStyle,
        align: TextAlign,
        baseline: TextBaseline,
    ) -> CardResult<()>;
}

/// Rounded rectangle outline built from lines and quadratic corners.
///
/// The radius is clamped to half the shorter side.
pub fn rounded_rect_path(rect: Rect, radius: f64) -> BezPath {
    let (x, y, w, h) = (rect.x0, rect.y0, rect.width(), rect.height());
    let r = radius.max(0.0).min(w / 2.0).min(h / 2.0);

    let mut p = BezPath::new();
    p.move_to((x + r, y));
    p.line_to((x + w - r, y));
    p.quad_to((x + w, y), (x + w, y + r));
    p.line_to((x + w, y + h - r));
    p.quad_to((x + w, y + h), (x + w - r, y + h));
    p.line_to((x + r, y + h));
    p.quad_to((x, y + h), (x, y + h - r));
    p.line_to((x, y + r));
    p.quad_to((x, y), (x + r, y));
    p.close_path();
    p
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
