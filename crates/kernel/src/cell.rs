use glam::IVec2;
use sandspace_common::{CellRect, Rgba};

use crate::{grid::Grid, stain::Stainable};

/// A cell in the grid.
///
/// Ticking is split in two phases: `tick` reads the neighborhood and proposes
/// an [`Action`]; the action then applies against a mutable grid. The split
/// keeps reads and writes separate so a tick can never observe its own
/// partial mutation.
pub trait Cell: Sized {
    type Action: Action<Cell = Self>;
    type Error: std::error::Error;

    /// Inspect the neighborhood around `origin` and propose an action.
    /// `Ok(None)` means the cell is stable and will not be revisited until
    /// something near it changes.
    fn tick(
        &self,
        origin: IVec2,
        grid: &impl Grid<Cell = Self>,
    ) -> Result<Option<Self::Action>, Self::Error>;

    /// The relative neighborhood a tick may read or an action may write.
    /// Used to decide whether a tick can run against a single chunk or must
    /// be deferred to the cross-chunk world pass.
    fn range(&self) -> CellRect;
}

/// A proposed mutation produced by [`Cell::tick`].
pub trait Action {
    type Cell: Cell<Action = Self>;
    type State;

    /// Apply the mutation. Returns `None` when the target points no longer
    /// exist (e.g. the neighborhood left the loaded world between tick and
    /// apply).
    fn apply(
        &self,
        origin: IVec2,
        grid: &mut impl Stainable<Cell = Self::Cell, State = Self::State>,
    ) -> Option<()>;
}

/// A cell that can be turned into a texel.
pub trait Renderable: Cell {
    /// Color of this cell at `point` (local chunk coordinates). The point is
    /// passed so cells can vary by position (dithering, banding).
    fn color(&self, point: IVec2) -> Rgba;
}
