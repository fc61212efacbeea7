use serde::{Deserialize, Serialize};

use crate::assets::fonts::FontWeight;
use crate::foundation::core::Rgba8;

/// Named theme presets selectable from card documents.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemePreset {
    /// Lighter panels that let the background show through.
    #[default]
    Translucent,
    /// Denser panels for busy backgrounds.
    Opaque,
}

/// Every constant of the slot drawing routine.
///
/// One renderer covers all card styles; styles differ only in these values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    /// Corner radius of the per-slot clip.
    pub corner_radius: f64,

    /// Fill behind a title slot.
    pub title_panel: Rgba8,
    /// Weight of title text.
    pub title_weight: FontWeight,
    /// Downward nudge of the title's vertical center.
    pub title_nudge_y: f64,

    /// Height of the label band of a standard slot.
    pub header_height: f64,
    /// Fill of the label band.
    pub header_fill: Rgba8,
    /// Fill of the body band.
    pub body_fill: Rgba8,

    /// Label font size in px.
    pub label_font_size: f64,
    /// Label color.
    pub label_color: Rgba8,
    /// Label weight.
    pub label_weight: FontWeight,
    /// Label left inset.
    pub label_inset_x: f64,
    /// Downward nudge of the label's vertical center.
    pub label_nudge_y: f64,

    /// Body text left inset; the wrap width is `w - 2 * body_inset_x`.
    pub body_inset_x: f64,
    /// Gap between the label band and the first body line.
    pub body_inset_top: f64,
    /// Weight of body text.
    pub body_weight: FontWeight,
    /// Line height as a multiple of the value font size.
    pub line_height_factor: f64,

    /// Top-left stop of the placeholder gradient.
    pub placeholder_start: Rgba8,
    /// Bottom-right stop of the placeholder gradient.
    pub placeholder_end: Rgba8,
    /// Hint drawn over the placeholder gradient, if any.
    pub placeholder_hint: Option<String>,
    /// Hint color.
    pub placeholder_hint_color: Rgba8,
    /// Hint font size in px.
    pub placeholder_hint_font_size: f64,
}

impl Theme {
    /// Default look: 60% white panels and a 40% black label band.
    pub fn translucent() -> Self {
        Self {
            corner_radius: 6.0,
            title_panel: Rgba8::rgba(255, 255, 255, 0.6),
            title_weight: FontWeight::Bold,
            title_nudge_y: 2.0,
            header_height: 26.0,
            header_fill: Rgba8::rgba(0, 0, 0, 0.4),
            body_fill: Rgba8::rgba(255, 255, 255, 0.6),
            label_font_size: 13.0,
            label_color: Rgba8::WHITE,
            label_weight: FontWeight::Regular,
            label_inset_x: 10.0,
            label_nudge_y: 1.0,
            body_inset_x: 12.0,
            body_inset_top: 10.0,
            body_weight: FontWeight::Bold,
            line_height_factor: 1.4,
            placeholder_start: Rgba8::rgb(0xa1, 0x8c, 0xd1),
            placeholder_end: Rgba8::rgb(0xfb, 0xc2, 0xeb),
            placeholder_hint: Some("背景画像をアップロードしてください".to_string()),
            placeholder_hint_color: Rgba8::rgba(255, 255, 255, 0.3),
            placeholder_hint_font_size: 40.0,
        }
    }

    /// Denser panels: 85% white and a 50% black label band.
    pub fn opaque() -> Self {
        Self {
            title_panel: Rgba8::rgba(255, 255, 255, 0.85),
            header_fill: Rgba8::rgba(0, 0, 0, 0.5),
            body_fill: Rgba8::rgba(255, 255, 255, 0.85),
            ..Self::translucent()
        }
    }

    /// Theme for a preset.
    pub fn from_preset(preset: ThemePreset) -> Self {
        match preset {
            ThemePreset::Translucent => Self::translucent(),
            ThemePreset::Opaque => Self::opaque(),
        }
    }

    /// Line height for a value font size.
    pub fn line_height(&self, font_size: f64) -> f64 {
        font_size * self.line_height_factor
    }

    /// Drop the placeholder hint text.
    pub fn without_placeholder_hint(mut self) -> Self {
        self.placeholder_hint = None;
        self
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::translucent()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/theme.rs"]
mod tests;
