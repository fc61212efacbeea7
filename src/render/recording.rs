use kurbo::Shape;
use serde::Serialize;

use crate::assets::decode::DecodedImage;
use crate::foundation::core::{BezPath, Canvas, Point, Rect, Rgba8};
use crate::foundation::error::{CardError, CardResult};
use crate::render::surface::{GradientStop, Surface, TextAlign, TextBaseline, TextStyle};

/// One recorded drawing command.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCmd {
    /// Solid fill.
    FillRect {
        /// Filled area.
        rect: Rect,
        /// Fill color.
        color: Rgba8,
    },
    /// Linear gradient fill.
    FillGradient {
        /// Filled area.
        rect: Rect,
        /// Gradient start point.
        start: Point,
        /// Gradient end point.
        end: Point,
        /// Color stops.
        stops: Vec<GradientStop>,
    },
    /// Clip pushed; `bounds` is the clip path's bounding box.
    PushClip {
        /// Bounding box of the clip path.
        bounds: Rect,
    },
    /// Clip popped.
    PopClip,
    /// Image blit.
    DrawImage {
        /// Source width.
        width: u32,
        /// Source height.
        height: u32,
        /// Destination rectangle.
        dest: Rect,
    },
    /// Single line of text.
    FillText {
        /// Line content.
        text: String,
        /// Anchor point.
        anchor: Point,
        /// Font settings.
        style: TextStyle,
        /// Horizontal placement.
        align: TextAlign,
        /// Vertical placement.
        baseline: TextBaseline,
    },
}

/// How a [`RecordingSurface`] measures text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AdvanceMetrics {
    /// Every character is this many em wide (scaled by the font size).
    Em(f64),
    /// Every character is this many pixels wide regardless of font size.
    Fixed(f64),
}

/// A [`Surface`] that records commands instead of rasterizing.
///
/// Text is measured with a constant per-character advance, so layouts are reproducible without
/// font files.
#[derive(Clone, Debug)]
pub struct RecordingSurface {
    canvas: Canvas,
    metrics: AdvanceMetrics,
    clip_depth: usize,
    commands: Vec<DrawCmd>,
}

impl RecordingSurface {
    /// Record onto `canvas` using `metrics` for text measurement.
    pub fn new(canvas: Canvas, metrics: AdvanceMetrics) -> Self {
        Self {
            canvas,
            metrics,
            clip_depth: 0,
            commands: Vec::new(),
        }
    }

    /// Commands recorded so far.
    pub fn commands(&self) -> &[DrawCmd] {
        &self.commands
    }

    /// Consume the recorder.
    pub fn into_commands(self) -> Vec<DrawCmd> {
        self.commands
    }

    /// Current clip nesting depth.
    pub fn clip_depth(&self) -> usize {
        self.clip_depth
    }

    /// Text lines drawn, in order.
    pub fn texts(&self) -> Vec<(&str, Point)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCmd::FillText { text, anchor, .. } => Some((text.as_str(), *anchor)),
                _ => None,
            })
            .collect()
    }

    fn check_size(style: &TextStyle) -> CardResult<()> {
        if !style.size_px.is_finite() || style.size_px <= 0.0 {
            return Err(CardError::validation("text size_px must be finite and > 0"));
        }
        Ok(())
    }
}

impl Surface for RecordingSurface {
    fn canvas(&self) -> Canvas {
        self.canvas
    }

    fn clear(&mut self) -> CardResult<()> {
        self.commands.clear();
        self.clip_depth = 0;
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba8) -> CardResult<()> {
        self.commands.push(DrawCmd::FillRect { rect, color });
        Ok(())
    }

    fn fill_linear_gradient(
        &mut self,
        rect: Rect,
        start: Point,
        end: Point,
        stops: &[GradientStop],
    ) -> CardResult<()> {
        self.commands.push(DrawCmd::FillGradient {
            rect,
            start,
            end,
            stops: stops.to_vec(),
        });
        Ok(())
    }

    fn push_clip(&mut self, path: &BezPath) -> CardResult<()> {
        self.clip_depth += 1;
        self.commands.push(DrawCmd::PushClip {
            bounds: path.bounding_box(),
        });
        Ok(())
    }

    fn pop_clip(&mut self) -> CardResult<()> {
        if self.clip_depth == 0 {
            return Err(CardError::render("pop_clip without matching push_clip"));
        }
        self.clip_depth -= 1;
        self.commands.push(DrawCmd::PopClip);
        Ok(())
    }

    fn draw_image(&mut self, image: &DecodedImage, dest: Rect) -> CardResult<()> {
        self.commands.push(DrawCmd::DrawImage {
            width: image.width,
            height: image.height,
            dest,
        });
        Ok(())
    }

    fn measure_text(&mut self, text: &str, style: &TextStyle) -> CardResult<f64> {
        Self::check_size(style)?;
        let advance = match self.metrics {
            AdvanceMetrics::Em(em) => em * style.size_px,
            AdvanceMetrics::Fixed(px) => px,
        };
        Ok(text.chars().count() as f64 * advance)
    }

    fn fill_text(
        &mut self,
        text: &str,
        anchor: Point,
        style: &TextStyle,
        align: TextAlign,
        baseline: TextBaseline,
    ) -> CardResult<()> {
        Self::check_size(style)?;
        self.commands.push(DrawCmd::FillText {
            text: text.to_string(),
            anchor,
            style: *style,
            align,
            baseline,
        });
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/recording.rs"]
mod tests;
