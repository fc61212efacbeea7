//! Slot placement on the card canvas.

/// Slot table and its validation.
pub mod registry;
