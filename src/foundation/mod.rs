//! Shared geometry, colors and the crate error type.

/// Canvas, colors and re-exported `kurbo` geometry.
pub mod core;
/// [`crate::CardError`] and [`crate::CardResult`].
pub mod error;
