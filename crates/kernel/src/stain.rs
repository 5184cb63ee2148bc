use glam::IVec2;
use sandspace_common::CellRect;

use crate::{area::Area, grid::Grid};

/// A grid that tracks which of its points changed since the stain was last
/// cleared. Renderers consume stains to rewrite only dirty texels; stepping
/// consumes them to revisit only unsettled cells.
pub trait Stainable: Grid {
    /// The currently stained region, clipped to the grid's bounds.
    fn stained(&self) -> Area;
    fn stain(&mut self, rect: CellRect);
    fn stain_point(&mut self, point: IVec2);
    fn clear_stain(&mut self);

    fn stain_around(&mut self, point: IVec2, radius: i32) {
        self.stain(CellRect::from_center_half_size(point, IVec2::splat(radius)));
    }

    fn is_stained(&self, point: IVec2) -> bool {
        self.stained().contains(point)
    }
}
