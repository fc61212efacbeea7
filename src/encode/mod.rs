//! Frame export.

/// PNG encoding via `image`.
pub mod png;
