//! Chunked cellular grid kernel: cell model, stain tracking, world stepping.
//!
//! Cells live in fixed-size square chunks. A tick proposes an action, the
//! action applies against a grid, and every mutation through the grid surface
//! marks the touched points dirty (stained). Renderers consume stains to
//! rewrite only the texels that changed.
//!
//! # Invariants
//! - `Grid::get_mut` and `Grid::swap` stain the points they touch.
//! - A chunk's reported stain never exceeds its own area.
//! - World iteration order is deterministic (ordered chunk map).
//! - A failing cell tick is logged and counted, never propagated.

pub mod area;
pub mod cell;
pub mod chunk;
pub mod grid;
pub mod stain;
pub mod world;

pub use area::Area;
pub use cell::{Action, Cell, Renderable};
pub use chunk::{Chunk, ChunkCoords, ChunkError};
pub use grid::Grid;
pub use stain::Stainable;
pub use world::{StepStats, TickTimer, World};
