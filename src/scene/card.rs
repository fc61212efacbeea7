use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::assets::decode::load_image;
use crate::assets::fonts::FontSet;
use crate::foundation::core::{Canvas, Rgba8};
use crate::foundation::error::{CardError, CardResult};
use crate::layout::registry::{LayoutRegistry, LayoutSlot};
use crate::render::theme::{Theme, ThemePreset};
use crate::scene::model::{
    BackgroundState, BackgroundTransform, DEFAULT_TITLE_COLOR, DEFAULT_TITLE_FONT_SIZE,
    DEFAULT_VALUE_COLOR, DEFAULT_VALUE_FONT_SIZE, Item, ItemMap,
};

/// JSON card document: everything one render needs.
///
/// Asset paths (background image, fonts) are relative to the document's directory.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Card {
    /// Optional background image with zoom and pan.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<BackgroundDef>,
    /// Items in render order.
    pub items: Vec<CardItem>,
    /// Custom layout; the standard table is used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<Vec<LayoutSlot>>,
    /// Theme preset.
    #[serde(default)]
    pub theme: ThemePreset,
    /// Font files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fonts: Option<FontsDef>,
    #[serde(skip)]
    base_dir: PathBuf,
}

/// Background section of a [`Card`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BackgroundDef {
    /// Relative image path.
    pub source: String,
    /// Zoom in percent.
    #[serde(default = "default_zoom")]
    pub zoom: f64,
    /// Horizontal pan in canvas pixels.
    #[serde(default)]
    pub offset_x: f64,
    /// Vertical pan in canvas pixels.
    #[serde(default)]
    pub offset_y: f64,
}

fn default_zoom() -> f64 {
    100.0
}

/// Font section of a [`Card`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FontsDef {
    /// Relative path of the regular face.
    pub regular: String,
    /// Relative path of the bold face; regular is reused when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bold: Option<String>,
}

/// One item entry of a [`Card`].
///
/// Missing `font_size` and `color` default per kind: titles and fields differ.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CardItem {
    /// Layout slot id.
    pub slot: String,
    /// Header label.
    #[serde(default)]
    pub label: String,
    /// Body text.
    #[serde(default)]
    pub value: String,
    /// Value font size in px.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    /// Value color as hex.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Rgba8>,
    /// Title rendering.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_title: bool,
}

impl CardItem {
    /// Runtime [`Item`] with kind-specific defaults filled in.
    pub fn to_item(&self) -> Item {
        let (size, color) = if self.is_title {
            (DEFAULT_TITLE_FONT_SIZE, DEFAULT_TITLE_COLOR)
        } else {
            (DEFAULT_VALUE_FONT_SIZE, DEFAULT_VALUE_COLOR)
        };
        Item {
            label: self.label.clone(),
            value: self.value.clone(),
            font_size: self.font_size.unwrap_or(size),
            color: self.color.unwrap_or(color),
            is_title: self.is_title,
        }
    }
}

impl Card {
    /// Parse a card from a JSON reader. Asset paths resolve against the working directory.
    pub fn from_reader<R: std::io::Read>(r: R) -> CardResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| CardError::serde(format!("parse card JSON: {e}")))
    }

    /// Parse a card from a JSON file. Asset paths resolve against the file's directory.
    pub fn from_path(path: impl AsRef<Path>) -> CardResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            CardError::validation(format!("open card JSON '{}': {e}", path.display()))
        })?;
        let mut card = Self::from_reader(BufReader::new(f))?;
        card.base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Ok(card)
    }

    /// The default self-introduction card: standard layout, template labels, empty values.
    pub fn template() -> Self {
        let items = ItemMap::template()
            .iter()
            .map(|(slot, item)| CardItem {
                slot: slot.to_string(),
                label: item.label.clone(),
                value: item.value.clone(),
                font_size: None,
                color: None,
                is_title: item.is_title,
            })
            .collect();
        Self {
            background: None,
            items,
            layout: None,
            theme: ThemePreset::default(),
            fonts: None,
            base_dir: PathBuf::new(),
        }
    }

    /// Serialize as pretty JSON.
    pub fn to_json_pretty(&self) -> CardResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CardError::serde(format!("serialize card JSON: {e}")))
    }

    /// Directory relative asset paths resolve against.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Override the directory relative asset paths resolve against.
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = dir.into();
        self
    }

    /// Check item ids, font sizes, zoom/pan values, asset paths and the layout.
    pub fn validate(&self) -> CardResult<()> {
        let mut seen = HashSet::new();
        for item in &self.items {
            if item.slot.trim().is_empty() {
                return Err(CardError::validation("item slot must be non-empty"));
            }
            if !seen.insert(item.slot.as_str()) {
                return Err(CardError::validation(format!(
                    "duplicate item slot '{}'",
                    item.slot
                )));
            }
            if let Some(size) = item.font_size
                && (!size.is_finite() || size <= 0.0)
            {
                return Err(CardError::validation(format!(
                    "item '{}' font_size must be finite and > 0",
                    item.slot
                )));
            }
        }

        if let Some(bg) = &self.background {
            if !bg.zoom.is_finite() {
                return Err(CardError::validation("background zoom must be finite"));
            }
            if !bg.offset_x.is_finite() || !bg.offset_y.is_finite() {
                return Err(CardError::validation("background offsets must be finite"));
            }
            normalize_rel_path(&bg.source)?;
        }

        if let Some(fonts) = &self.fonts {
            normalize_rel_path(&fonts.regular)?;
            if let Some(bold) = &fonts.bold {
                normalize_rel_path(bold)?;
            }
        }

        self.layout_registry().map(|_| ())
    }

    /// Custom layout when present, otherwise [`LayoutRegistry::standard`].
    pub fn layout_registry(&self) -> CardResult<LayoutRegistry> {
        match &self.layout {
            Some(slots) => LayoutRegistry::from_slots(Canvas::CARD, slots.clone()),
            None => Ok(LayoutRegistry::standard()),
        }
    }

    /// Items keyed by slot, in document order.
    pub fn item_map(&self) -> ItemMap {
        self.items
            .iter()
            .map(|item| (item.slot.clone(), item.to_item()))
            .collect()
    }

    /// Theme for the selected preset.
    pub fn theme(&self) -> Theme {
        Theme::from_preset(self.theme)
    }

    /// Zoom/pan from the background section; zoom is clamped to the supported range.
    pub fn background_transform(&self) -> BackgroundTransform {
        match &self.background {
            Some(bg) => BackgroundTransform::default()
                .with_zoom(bg.zoom)
                .with_offset(bg.offset_x, bg.offset_y),
            None => BackgroundTransform::default(),
        }
    }

    /// Decode the background image, if any, and apply the document's zoom/pan.
    pub fn load_background(&self) -> CardResult<BackgroundState> {
        let mut state = BackgroundState::empty();
        if let Some(bg) = &self.background {
            let path = self.resolve_path(&bg.source)?;
            state.set_image(load_image(&path)?);
        }
        state.transform = self.background_transform();
        Ok(state)
    }

    /// Load the font files named by the document, if any.
    pub fn load_fonts(&self) -> CardResult<Option<FontSet>> {
        let Some(fonts) = &self.fonts else {
            return Ok(None);
        };
        let regular = self.resolve_path(&fonts.regular)?;
        let bold = fonts
            .bold
            .as_deref()
            .map(|b| self.resolve_path(b))
            .transpose()?;
        FontSet::load(regular, bold.as_deref()).map(Some)
    }

    /// Absolute-or-cwd path of a document-relative asset path.
    pub fn resolve_path(&self, rel: &str) -> CardResult<PathBuf> {
        Ok(self.base_dir.join(normalize_rel_path(rel)?))
    }
}

/// Normalize a document-relative asset path to `/`-separated form.
///
/// Backslashes become `/`, empty and `.` segments are dropped. Absolute paths and `..`
/// segments are rejected.
pub fn normalize_rel_path(source: &str) -> CardResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') || s.split('/').next().is_some_and(|p| p.ends_with(':')) {
        return Err(CardError::validation(format!(
            "asset path '{source}' must be relative"
        )));
    }

    let parts: Vec<&str> = s
        .split('/')
        .filter(|p| !p.is_empty() && *p != ".")
        .collect();
    if parts.contains(&"..") {
        return Err(CardError::validation(format!(
            "asset path '{source}' must not contain '..'"
        )));
    }
    if parts.is_empty() {
        return Err(CardError::validation("asset path must name a file"));
    }
    Ok(parts.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/scene/card.rs"]
mod tests;
