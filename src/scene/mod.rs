//! What gets drawn: items, background state and the JSON card document.

/// JSON card documents.
pub mod card;
/// Runtime items and background state.
pub mod model;
