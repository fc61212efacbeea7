use serde::{Deserialize, Serialize};

use crate::foundation::core::{Canvas, Rect};
use crate::foundation::error::{CardError, CardResult};

/// Vertical shift applied to every slot of the standard table.
pub const STANDARD_Y_OFFSET: f64 = 30.0;

/// One placement rectangle in canvas coordinates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayoutSlot {
    /// Slot identifier, matched against item ids.
    pub id: String,
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width, must be > 0.
    pub w: f64,
    /// Height, must be > 0.
    pub h: f64,
}

impl LayoutSlot {
    /// Build a slot.
    pub fn new(id: impl Into<String>, x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            w,
            h,
        }
    }

    /// Slot bounds as a rectangle.
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.w, self.y + self.h)
    }
}

/// Fixed table mapping slot ids to rectangles on the canvas.
///
/// Lookups for unknown ids return `None`; the renderer treats that as "no visual placement".
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutRegistry {
    canvas: Canvas,
    slots: Vec<LayoutSlot>,
}

impl LayoutRegistry {
    /// Validate and build a registry for `canvas`.
    ///
    /// Rejects duplicate ids, non-positive or non-finite sizes, and slots extending past the
    /// canvas bounds. Overlap is tolerated.
    pub fn from_slots(canvas: Canvas, slots: Vec<LayoutSlot>) -> CardResult<Self> {
        let bounds = canvas.rect();
        for (i, slot) in slots.iter().enumerate() {
            if slot.id.is_empty() {
                return Err(CardError::validation("layout slot id must be non-empty"));
            }
            if slots[..i].iter().any(|s| s.id == slot.id) {
                return Err(CardError::validation(format!(
                    "duplicate layout slot id \"{}\"",
                    slot.id
                )));
            }
            let finite = [slot.x, slot.y, slot.w, slot.h]
                .iter()
                .all(|v| v.is_finite());
            if !finite || slot.w <= 0.0 || slot.h <= 0.0 {
                return Err(CardError::validation(format!(
                    "layout slot \"{}\" must have finite position and positive size",
                    slot.id
                )));
            }
            let r = slot.rect();
            if r.x0 < bounds.x0 || r.y0 < bounds.y0 || r.x1 > bounds.x1 || r.y1 > bounds.y1 {
                return Err(CardError::validation(format!(
                    "layout slot \"{}\" lies outside the {}x{} canvas",
                    slot.id, canvas.width, canvas.height
                )));
            }
        }

        let out = Self { canvas, slots };
        for (a, b) in out.overlaps() {
            tracing::warn!(a, b, "layout slots overlap");
        }
        Ok(out)
    }

    /// The built-in self-introduction card table.
    pub fn standard() -> Self {
        let y = STANDARD_Y_OFFSET;
        let slots = vec![
            LayoutSlot::new("title", 40.0, 20.0 + y, 340.0, 50.0),
            // left column
            LayoutSlot::new("name", 40.0, 90.0 + y, 340.0, 80.0),
            LayoutSlot::new("oshi1", 40.0, 180.0 + y, 340.0, 80.0),
            LayoutSlot::new("oshi2_1", 40.0, 270.0 + y, 165.0, 100.0),
            LayoutSlot::new("oshi2_2", 215.0, 270.0 + y, 165.0, 100.0),
            LayoutSlot::new("hobby", 40.0, 380.0 + y, 340.0, 120.0),
            // right column, flush with x = 1160
            LayoutSlot::new("love", 820.0, 20.0 + y, 340.0, 80.0),
            LayoutSlot::new("song", 820.0, 110.0 + y, 340.0, 100.0),
            LayoutSlot::new("collab", 820.0, 220.0 + y, 165.0, 80.0),
            LayoutSlot::new("member", 995.0, 220.0 + y, 165.0, 80.0),
            LayoutSlot::new("history", 820.0, 310.0 + y, 165.0, 80.0),
            LayoutSlot::new("age", 995.0, 310.0 + y, 165.0, 80.0),
            LayoutSlot::new("free", 820.0, 400.0 + y, 340.0, 120.0),
        ];
        Self {
            canvas: Canvas::CARD,
            slots,
        }
    }

    /// Resolve the rectangle for `id`.
    pub fn lookup(&self, id: &str) -> Option<Rect> {
        self.slot(id).map(LayoutSlot::rect)
    }

    /// Resolve the full slot entry for `id`.
    pub fn slot(&self, id: &str) -> Option<&LayoutSlot> {
        self.slots.iter().find(|s| s.id == id)
    }

    /// Slots in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &LayoutSlot> {
        self.slots.iter()
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// `true` when the table has no slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Canvas the table was defined for.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Pairs of slot ids whose rectangles overlap with positive area.
    pub fn overlaps(&self) -> Vec<(&str, &str)> {
        let mut out = Vec::new();
        for (i, a) in self.slots.iter().enumerate() {
            for b in &self.slots[i + 1..] {
                let inter = a.rect().intersect(b.rect());
                if inter.width() > 0.0 && inter.height() > 0.0 {
                    out.push((a.id.as_str(), b.id.as_str()));
                }
            }
        }
        out
    }
}

impl Default for LayoutRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/registry.rs"]
mod tests;
