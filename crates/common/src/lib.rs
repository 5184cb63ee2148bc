//! Shared types and utilities for the sandspace engine.

mod types;

pub use types::{CellRect, Rgba};
