use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::assets::decode::DecodedImage;
use crate::foundation::core::Rgba8;

/// Default font size of body values, in px.
pub const DEFAULT_VALUE_FONT_SIZE: f64 = 16.0;
/// Default font size of the title value, in px.
pub const DEFAULT_TITLE_FONT_SIZE: f64 = 22.0;
/// Default body value color (`#1f2937`).
pub const DEFAULT_VALUE_COLOR: Rgba8 = Rgba8::rgb(0x1f, 0x29, 0x37);
/// Default title value color (`#111827`).
pub const DEFAULT_TITLE_COLOR: Rgba8 = Rgba8::rgb(0x11, 0x18, 0x27);

/// Lower bound of the background zoom, in percent.
pub const MIN_ZOOM: f64 = 50.0;
/// Upper bound of the background zoom, in percent.
pub const MAX_ZOOM: f64 = 250.0;

/// One labeled text entry of the card. Its identity is the slot id it is stored under.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Header label (unused for titles).
    #[serde(default)]
    pub label: String,
    /// Body text; may contain `\n` paragraph breaks.
    #[serde(default)]
    pub value: String,
    /// Value font size in px, expected > 0.
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    /// Value color.
    #[serde(default = "default_color")]
    pub color: Rgba8,
    /// Draw as a single centered title instead of header + body.
    #[serde(default)]
    pub is_title: bool,
}

fn default_font_size() -> f64 {
    DEFAULT_VALUE_FONT_SIZE
}

fn default_color() -> Rgba8 {
    DEFAULT_VALUE_COLOR
}

impl Item {
    /// A standard header + body field with default styling.
    pub fn field(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            font_size: DEFAULT_VALUE_FONT_SIZE,
            color: DEFAULT_VALUE_COLOR,
            is_title: false,
        }
    }

    /// A title item with default styling.
    pub fn title(value: impl Into<String>) -> Self {
        Self {
            label: String::new(),
            value: value.into(),
            font_size: DEFAULT_TITLE_FONT_SIZE,
            color: DEFAULT_TITLE_COLOR,
            is_title: true,
        }
    }

    /// Override the value font size.
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    /// Override the value color.
    pub fn with_color(mut self, color: Rgba8) -> Self {
        self.color = color;
        self
    }
}

/// Insertion-ordered mapping of slot id to [`Item`]. Iteration order is render order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ItemMap {
    entries: Vec<(String, Item)>,
}

impl ItemMap {
    /// Empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace. A replaced entry keeps its original position.
    pub fn insert(&mut self, id: impl Into<String>, item: Item) -> Option<Item> {
        let id = id.into();
        match self.entries.iter_mut().find(|(k, _)| *k == id) {
            Some((_, slot)) => Some(std::mem::replace(slot, item)),
            None => {
                self.entries.push((id, item));
                None
            }
        }
    }

    /// Builder-style [`ItemMap::insert`].
    pub fn with(mut self, id: impl Into<String>, item: Item) -> Self {
        self.insert(id, item);
        self
    }

    /// Look up an item.
    pub fn get(&self, id: &str) -> Option<&Item> {
        self.entries.iter().find(|(k, _)| k == id).map(|(_, v)| v)
    }

    /// Look up an item for editing.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Item> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == id)
            .map(|(_, v)| v)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Item)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The default self-introduction template matching [`crate::LayoutRegistry::standard`].
    pub fn template() -> Self {
        Self::new()
            .with("title", Item::title("自己紹介カード"))
            .with("name", Item::field("お名前", ""))
            .with("oshi1", Item::field("最推し", ""))
            .with("oshi2_1", Item::field("推し", ""))
            .with("oshi2_2", Item::field("他Vの推し", ""))
            .with("hobby", Item::field("趣味や好きなゲーム", ""))
            .with("love", Item::field("推しの好きなところ", ""))
            .with("song", Item::field("推し＆ホロで好きな曲", ""))
            .with("collab", Item::field("好きなコラボ", ""))
            .with("member", Item::field("メンシ加入者", ""))
            .with("history", Item::field("推し歴", ""))
            .with("age", Item::field("年齢", ""))
            .with("free", Item::field("フリースペース", ""))
    }
}

impl<K: Into<String>> FromIterator<(K, Item)> for ItemMap {
    fn from_iter<T: IntoIterator<Item = (K, Item)>>(iter: T) -> Self {
        let mut out = Self::new();
        for (k, v) in iter {
            out.insert(k, v);
        }
        out
    }
}

/// User zoom and pan applied on top of the cover fit.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BackgroundTransform {
    /// Zoom in percent; 100 is the plain cover fit.
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

impl Default for BackgroundTransform {
    fn default() -> Self {
        Self {
            zoom: 100.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }
}

impl BackgroundTransform {
    /// Set the zoom, clamped to `[MIN_ZOOM, MAX_ZOOM]`.
    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.zoom = if zoom.is_finite() {
            zoom.clamp(MIN_ZOOM, MAX_ZOOM)
        } else {
            100.0
        };
        self
    }

    /// Set the pan offsets.
    pub fn with_offset(mut self, offset_x: f64, offset_y: f64) -> Self {
        self.offset_x = offset_x;
        self.offset_y = offset_y;
        self
    }

    /// Zoom as a scale factor.
    pub fn scale(&self) -> f64 {
        self.zoom / 100.0
    }
}

/// Background image plus its zoom/pan, owned by the caller and read once per render.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BackgroundState {
    image: Option<Arc<DecodedImage>>,
    /// Current zoom/pan.
    pub transform: BackgroundTransform,
}

impl BackgroundState {
    /// No image; the renderer draws the placeholder gradient.
    pub fn empty() -> Self {
        Self::default()
    }

    /// State holding `image` with the default transform.
    pub fn with_image(image: DecodedImage) -> Self {
        let mut s = Self::default();
        s.set_image(image);
        s
    }

    /// Replace the image. Zoom and pan reset to their defaults.
    pub fn set_image(&mut self, image: DecodedImage) {
        self.image = Some(Arc::new(image));
        self.transform = BackgroundTransform::default();
    }

    /// Drop the image; the transform is kept.
    pub fn clear_image(&mut self) {
        self.image = None;
    }

    /// Current image, if any.
    pub fn image(&self) -> Option<&DecodedImage> {
        self.image.as_deref()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
