//! Card composition: background, then one rounded, clipped panel per laid-out item.

use serde::Serialize;

use crate::foundation::core::{Point, Rect};
use crate::foundation::error::{CardError, CardResult};
use crate::layout::registry::LayoutRegistry;
use crate::render::background::draw_background;
use crate::render::surface::{Surface, TextAlign, TextBaseline, TextStyle, rounded_rect_path};
use crate::render::text::{position_lines, try_wrap_text};
use crate::render::theme::Theme;
use crate::scene::model::{BackgroundState, Item, ItemMap};

/// A slot that failed to draw. Other slots are unaffected.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SlotFailure {
    /// Slot id.
    pub id: String,
    /// Rendered error message.
    pub error: String,
}

/// Outcome of one [`CardRenderer::render`] call.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RenderReport {
    /// Slot ids drawn successfully, in render order.
    pub drawn: Vec<String>,
    /// Item ids without a layout slot.
    pub skipped: Vec<String>,
    /// Slots whose drawing failed.
    pub failed: Vec<SlotFailure>,
    /// Error raised while painting the background, if any.
    pub background_error: Option<String>,
}

impl RenderReport {
    /// `true` when the background and every laid-out slot drew without error.
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty() && self.background_error.is_none()
    }
}

/// Renderer for the whole card, parameterized by a [`Theme`].
///
/// Rendering is a full redraw with no state carried between calls; identical inputs produce
/// identical output.
#[derive(Clone, Debug, Default)]
pub struct CardRenderer {
    theme: Theme,
}

impl CardRenderer {
    /// Renderer using `theme`.
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    /// Active theme.
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Clear `surface`, then paint the background and every item that has a layout slot, in item
    /// order.
    ///
    /// Items without a slot are skipped. A slot that fails is reported and does not stop the
    /// remaining slots.
    #[tracing::instrument(skip_all, fields(items = items.len(), slots = layout.len()))]
    pub fn render(
        &self,
        surface: &mut dyn Surface,
        background: &BackgroundState,
        layout: &LayoutRegistry,
        items: &ItemMap,
    ) -> RenderReport {
        let mut report = RenderReport::default();

        if let Err(e) = surface
            .clear()
            .and_then(|()| draw_background(surface, background, &self.theme))
        {
            tracing::warn!(error = %e, "background failed");
            report.background_error = Some(e.to_string());
        }

        for (id, item) in items.iter() {
            let Some(rect) = layout.lookup(id) else {
                tracing::debug!(id, "no layout slot, skipping");
                report.skipped.push(id.to_string());
                continue;
            };
            match self.draw_slot(surface, rect, item) {
                Ok(()) => report.drawn.push(id.to_string()),
                Err(e) => {
                    tracing::warn!(id, error = %e, "slot failed");
                    report.failed.push(SlotFailure {
                        id: id.to_string(),
                        error: e.to_string(),
                    });
                }
            }
        }

        report
    }

    fn draw_slot(&self, surface: &mut dyn Surface, rect: Rect, item: &Item) -> CardResult<()> {
        surface.push_clip(&rounded_rect_path(rect, self.theme.corner_radius))?;
        let drawn = if item.is_title {
            self.draw_title(surface, rect, item)
        } else {
            self.draw_field(surface, rect, item)
        };
        // The clip is released even when drawing failed.
        let popped = surface.pop_clip();
        drawn.and(popped)
    }

    fn draw_title(&self, surface: &mut dyn Surface, rect: Rect, item: &Item) -> CardResult<()> {
        let t = &self.theme;
        surface.fill_rect(rect, t.title_panel)?;

        let style = value_style(item, t.title_weight)?;
        let center = rect.center();
        // Single line: long titles overflow into the clip.
        surface.fill_text(
            &item.value,
            Point::new(center.x, center.y + t.title_nudge_y),
            &style,
            TextAlign::Center,
            TextBaseline::Middle,
        )
    }

    fn draw_field(&self, surface: &mut dyn Surface, rect: Rect, item: &Item) -> CardResult<()> {
        let t = &self.theme;
        let header_bottom = (rect.y0 + t.header_height).min(rect.y1);
        surface.fill_rect(
            Rect::new(rect.x0, rect.y0, rect.x1, rect.y0 + t.header_height),
            t.header_fill,
        )?;
        surface.fill_rect(
            Rect::new(rect.x0, header_bottom, rect.x1, rect.y1),
            t.body_fill,
        )?;

        let label_style = TextStyle {
            size_px: t.label_font_size,
            weight: t.label_weight,
            color: t.label_color,
        };
        surface.fill_text(
            &item.label,
            Point::new(
                rect.x0 + t.label_inset_x,
                rect.y0 + t.header_height / 2.0 + t.label_nudge_y,
            ),
            &label_style,
            TextAlign::Left,
            TextBaseline::Middle,
        )?;

        let style = value_style(item, t.body_weight)?;
        let x = rect.x0 + t.body_inset_x;
        let top = rect.y0 + t.header_height + t.body_inset_top;
        let max_width = rect.width() - 2.0 * t.body_inset_x;

        // Lines below the slot are still drawn; the clip hides them.
        let lines = try_wrap_text(&item.value, max_width, |s| surface.measure_text(s, &style))?;
        for line in position_lines(lines, top, t.line_height(item.font_size)) {
            surface.fill_text(
                &line.text,
                Point::new(x, line.y),
                &style,
                TextAlign::Left,
                TextBaseline::Top,
            )?;
        }
        Ok(())
    }
}

fn value_style(item: &Item, weight: crate::assets::fonts::FontWeight) -> CardResult<TextStyle> {
    if !item.font_size.is_finite() || item.font_size <= 0.0 {
        return Err(CardError::validation(format!(
            "font size must be finite and > 0, got {}",
            item.font_size
        )));
    }
    Ok(TextStyle {
        size_px: item.font_size,
        weight,
        color: item.color,
    })
}

/// Render with a default-themed [`CardRenderer`].
pub fn render_card(
    surface: &mut dyn Surface,
    background: &BackgroundState,
    layout: &LayoutRegistry,
    items: &ItemMap,
) -> RenderReport {
    CardRenderer::default().render(surface, background, layout, items)
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
