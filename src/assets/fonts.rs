use std::path::Path;
use std::sync::Arc;

use anyhow::Context;

use crate::foundation::core::Rgba8;
use crate::foundation::error::{CardError, CardResult};

/// Font weight used by the card text roles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontWeight {
    /// Regular weight (labels, placeholder hints on some themes).
    #[default]
    Regular,
    /// Bold weight (titles and body values).
    Bold,
}

/// Raw font files for the two weights the card uses.
///
/// Loading fonts is the caller's job and must finish before the first render; without a bold face
/// the regular face is used for bold text.
#[derive(Clone, Debug)]
pub struct FontSet {
    regular: Arc<Vec<u8>>,
    bold: Option<Arc<Vec<u8>>>,
}

impl FontSet {
    /// Build from in-memory TTF/OTF bytes.
    pub fn from_bytes(regular: Vec<u8>, bold: Option<Vec<u8>>) -> CardResult<Self> {
        if regular.is_empty() {
            return Err(CardError::font("regular font data is empty"));
        }
        Ok(Self {
            regular: Arc::new(regular),
            bold: bold.filter(|b| !b.is_empty()).map(Arc::new),
        })
    }

    /// Read font files from disk.
    pub fn load(regular: impl AsRef<Path>, bold: Option<&Path>) -> CardResult<Self> {
        let regular = regular.as_ref();
        let regular_bytes =
            std::fs::read(regular).with_context(|| format!("read font '{}'", regular.display()))?;
        let bold_bytes = match bold {
            Some(p) => {
                Some(std::fs::read(p).with_context(|| format!("read font '{}'", p.display()))?)
            }
            None => None,
        };
        tracing::debug!(
            regular = %regular.display(),
            bold = ?bold,
            "loaded fonts"
        );
        Self::from_bytes(regular_bytes, bold_bytes)
    }

    /// Font bytes for `weight`, falling back to regular.
    pub fn bytes_for(&self, weight: FontWeight) -> &Arc<Vec<u8>> {
        match (weight, &self.bold) {
            (FontWeight::Bold, Some(b)) => b,
            _ => &self.regular,
        }
    }

    /// `true` when a dedicated bold face was supplied.
    pub fn has_bold(&self) -> bool {
        self.bold.is_some()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub(crate) struct TextBrushRgba8 {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

impl From<Rgba8> for TextBrushRgba8 {
    fn from(c: Rgba8) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

/// Stateful helper that shapes single lines with Parley against a registered [`FontSet`].
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    regular_family: String,
    bold_family: String,
}

impl TextLayoutEngine {
    /// Register both faces of `fonts` with fresh Parley contexts.
    pub(crate) fn new(fonts: &FontSet) -> CardResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let regular_family = register_family(&mut font_ctx, fonts.bytes_for(FontWeight::Regular))?;
        let bold_family = if fonts.has_bold() {
            register_family(&mut font_ctx, fonts.bytes_for(FontWeight::Bold))?
        } else {
            regular_family.clone()
        };
        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            regular_family,
            bold_family,
        })
    }

    /// Shape `text` as one unbroken line.
    pub(crate) fn layout_line(
        &mut self,
        text: &str,
        size_px: f32,
        weight: FontWeight,
        brush: TextBrushRgba8,
    ) -> CardResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(CardError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let family = match weight {
            FontWeight::Regular => self.regular_family.clone(),
            FontWeight::Bold => self.bold_family.clone(),
        };

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));
        if weight == FontWeight::Bold {
            builder.push_default(parley::style::StyleProperty::FontWeight(
                parley::style::FontWeight::BOLD,
            ));
        }

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }

    /// Advance width of `text` including trailing whitespace.
    pub(crate) fn measure(&mut self, text: &str, size_px: f32, weight: FontWeight) -> CardResult<f64> {
        if text.is_empty() {
            return Ok(0.0);
        }
        let layout = self.layout_line(text, size_px, weight, TextBrushRgba8::default())?;
        Ok(f64::from(layout.full_width()))
    }
}

fn register_family(font_ctx: &mut parley::FontContext, bytes: &Arc<Vec<u8>>) -> CardResult<String> {
    let families = font_ctx
        .collection
        .register_fonts(parley::fontique::Blob::from(bytes.as_ref().clone()), None);
    let family_id = families
        .first()
        .map(|(id, _)| *id)
        .ok_or_else(|| CardError::font("no font families registered from font bytes"))?;
    let name = font_ctx
        .collection
        .family_name(family_id)
        .ok_or_else(|| CardError::font("registered font family has no name"))?
        .to_string();
    Ok(name)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fonts.rs"]
mod tests;
