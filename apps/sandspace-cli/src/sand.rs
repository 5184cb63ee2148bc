//! Demo falling-sand material set.
//!
//! Three materials are enough to exercise the kernel: sand falls and slides,
//! stone never moves, air is empty space. Gravity points toward +y, matching
//! the texel row order (row 0 on top).

use std::convert::Infallible;

use glam::IVec2;
use sandspace_common::{CellRect, Rgba};
use sandspace_kernel::{Action, Cell, Grid, Renderable, Stainable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Material {
    #[default]
    Air,
    Sand,
    Stone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveTo(pub IVec2);

impl Material {
    fn is_empty(self) -> bool {
        matches!(self, Material::Air)
    }
}

impl Cell for Material {
    type Action = MoveTo;
    type Error = Infallible;

    fn tick(
        &self,
        origin: IVec2,
        grid: &impl Grid<Cell = Self>,
    ) -> Result<Option<Self::Action>, Self::Error> {
        if !matches!(self, Material::Sand) {
            return Ok(None);
        }

        let empty = |point: IVec2| grid.map(point, |c| c.is_empty()) == Some(true);

        let below = origin + IVec2::new(0, 1);
        if empty(below) {
            return Ok(Some(MoveTo(below)));
        }

        // Slide preference alternates by position so piles grow symmetric
        // without needing randomness in the cell itself.
        let mut sides = [IVec2::new(-1, 1), IVec2::new(1, 1)];
        if (origin.x + origin.y) & 1 == 1 {
            sides.swap(0, 1);
        }
        for side in sides {
            let target = origin + side;
            if empty(target) {
                return Ok(Some(MoveTo(target)));
            }
        }

        Ok(None)
    }

    fn range(&self) -> CellRect {
        CellRect::new(-1, 0, 1, 1)
    }
}

impl Action for MoveTo {
    type Cell = Material;
    type State = ();

    fn apply(
        &self,
        origin: IVec2,
        grid: &mut impl Stainable<Cell = Self::Cell, State = Self::State>,
    ) -> Option<()> {
        // The target may have been taken by an earlier action this step.
        if grid.map(self.0, |c| c.is_empty()) != Some(true) {
            return None;
        }
        // Stain the neighborhood, not just the swapped pair: a grain resting
        // on the vacated cell must be revisited next step or it hangs midair.
        grid.stain_around(origin, 2);
        grid.swap(origin, self.0)
    }
}

impl Renderable for Material {
    fn color(&self, point: IVec2) -> Rgba {
        match self {
            Material::Air => Rgba::TRANSPARENT,
            Material::Sand => {
                // Positional speckle so grain movement reads in the output.
                let speckle = ((point.x.wrapping_mul(31) ^ point.y.wrapping_mul(17)) & 3) as f32;
                let shade = 0.76 + speckle * 0.03;
                Rgba::rgb(shade, shade * 0.84, shade * 0.42)
            }
            Material::Stone => Rgba::rgb(0.42, 0.42, 0.45),
        }
    }
}
