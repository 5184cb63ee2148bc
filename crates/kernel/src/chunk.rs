use std::iter;

use glam::IVec2;
use sandspace_common::CellRect;
use thiserror::Error;

use crate::{area::Area, grid::Grid, stain::Stainable};

#[derive(Debug, Error)]
pub enum ChunkError {
    #[error("cell data length {got} does not match chunk volume {expected}")]
    CellCountMismatch { got: usize, expected: usize },
}

/// A fixed-size square block of cells.
///
/// Storage is row-major with index `y * N + x`; cell row 0 becomes texel
/// row 0 when the chunk is imaged. Every mutation through the [`Grid`]
/// surface stains the touched points. `S` is state shared by all cells of
/// the chunk (e.g. ambient pressure); `()` when unused.
#[derive(Debug, Clone)]
pub struct Chunk<T, const N: i32, S = ()> {
    cells: Vec<T>,
    stain: Option<CellRect>,
    state: S,
}

/// Position of a chunk in the chunk grid, in units of whole chunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChunkCoords<const N: i32>(pub IVec2);

impl<const N: i32> ChunkCoords<N> {
    /// World position of this chunk's local origin.
    pub fn offset(&self) -> IVec2 {
        N * self.0
    }

    pub fn local_to_world(&self, local: IVec2) -> IVec2 {
        self.offset() + local
    }

    pub fn world_to_local(&self, world: IVec2) -> IVec2 {
        world - self.offset()
    }

    /// Split a world coordinate into (chunk coordinate, local coordinate).
    /// Euclidean div/rem so negative world coordinates land in the right
    /// chunk with a non-negative local part.
    pub fn world_to_chunk_and_local(world: IVec2) -> (IVec2, IVec2) {
        (
            world.div_euclid(IVec2::splat(N)),
            world.rem_euclid(IVec2::splat(N)),
        )
    }
}

impl<T, const N: i32, S> Chunk<T, N, S> {
    /// Build a chunk from row-major cell data. A fresh chunk is fully
    /// stained so the first image build covers every texel.
    pub fn try_new(cells: Vec<T>, state: S) -> Result<Self, ChunkError> {
        if cells.len() != Self::volume() {
            return Err(ChunkError::CellCountMismatch {
                got: cells.len(),
                expected: Self::volume(),
            });
        }

        Ok(Self {
            cells,
            stain: Some(Self::area()),
            state,
        })
    }

    /// Like [`Chunk::try_new`].
    ///
    /// # Panics
    /// Panics when `cells.len() != N * N`.
    pub fn new(cells: Vec<T>, state: S) -> Self {
        assert_eq!(cells.len(), Self::volume(), "cell data must fill the chunk");

        Self {
            cells,
            stain: Some(Self::area()),
            state,
        }
    }

    /// Local bounds of any chunk of this size.
    pub const fn area() -> CellRect {
        CellRect::new(0, 0, N - 1, N - 1)
    }

    pub const fn volume() -> usize {
        (N * N) as usize
    }

    /// Row-major storage index for a local point, `None` out of bounds.
    pub fn index(&self, point: IVec2) -> Option<usize> {
        if Self::area().contains(point) {
            Some((N * point.y + point.x) as usize)
        } else {
            None
        }
    }

    pub fn state(&self) -> &S {
        &self.state
    }
}

impl<T, const N: i32, S> Chunk<T, N, S>
where
    T: Copy,
{
    /// Chunk filled with copies of one cell.
    pub fn full_copied(cell: T, state: S) -> Self {
        Self::new(vec![cell; Self::volume()], state)
    }
}

impl<T, const N: i32, S> Default for Chunk<T, N, S>
where
    T: Default,
    S: Default,
{
    fn default() -> Self {
        Self::new(
            iter::repeat_with(T::default).take(Self::volume()).collect(),
            S::default(),
        )
    }
}

impl<T, const N: i32, S> Grid for Chunk<T, N, S> {
    type Cell = T;
    type State = S;

    fn get(&self, point: IVec2) -> Option<&Self::Cell> {
        let index = self.index(point)?;

        self.cells.get(index)
    }

    fn get_mut(&mut self, point: IVec2) -> Option<&mut Self::Cell> {
        let index = self.index(point)?;

        self.stain_point(point);

        self.cells.get_mut(index)
    }

    fn swap(&mut self, first: IVec2, second: IVec2) -> Option<()> {
        let first_index = self.index(first)?;
        let second_index = self.index(second)?;

        self.stain_point(first);
        self.stain_point(second);

        self.cells.swap(first_index, second_index);

        Some(())
    }

    fn get_state(&self, point: IVec2) -> Option<&Self::State> {
        Self::area().contains(point).then_some(&self.state)
    }

    fn get_state_mut(&mut self, point: IVec2) -> Option<&mut Self::State> {
        Self::area().contains(point).then_some(&mut self.state)
    }
}

impl<T, const N: i32, S> Stainable for Chunk<T, N, S> {
    fn stained(&self) -> Area {
        match self.stain {
            Some(rect) => rect.intersect(Self::area()).into(),
            None => Area::Empty,
        }
    }

    fn clear_stain(&mut self) {
        self.stain = None;
    }

    fn stain(&mut self, rect: CellRect) {
        match &mut self.stain {
            Some(stain) => *stain = stain.union(rect),
            stain @ None => *stain = Some(rect),
        }
    }

    fn stain_point(&mut self, point: IVec2) {
        match &mut self.stain {
            Some(stain) => *stain = stain.union_point(point),
            stain @ None => *stain = Some(CellRect::point(point)),
        }
    }
}
