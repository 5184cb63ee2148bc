use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use glam::IVec2;
use rand::{Rng, seq::SliceRandom};
use sandspace_common::CellRect;
use tracing::{debug, error};

use crate::{
    area::Area,
    cell::{Action, Cell},
    chunk::{Chunk, ChunkCoords},
    grid::Grid,
    stain::Stainable,
};

/// Counters for one world step, for instrumentation and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct StepStats {
    /// Stained cells whose `tick` ran this step.
    pub cells_ticked: usize,
    /// Proposed actions that applied successfully.
    pub actions_applied: usize,
    /// Cells whose reach crossed a chunk edge and ran in the world pass.
    pub deferred: usize,
    /// Tick errors swallowed (logged, never propagated).
    pub errors: usize,
    pub duration: Duration,
}

/// A sparse grid of chunks keyed by chunk coordinates.
///
/// Implements [`Grid`] and [`Stainable`] over world coordinates, including
/// swaps across chunk edges. The chunk map is ordered so iteration (and
/// therefore stepping) is deterministic for a given RNG seed.
pub struct World<T, const N: i32, S = ()> {
    chunks: BTreeMap<(i32, i32), Chunk<T, N, S>>,
}

fn chunk_key(coords: IVec2) -> (i32, i32) {
    (coords.x, coords.y)
}

impl<T, const N: i32, S> Default for World<T, N, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: i32, S> World<T, N, S> {
    pub fn new() -> Self {
        Self {
            chunks: BTreeMap::new(),
        }
    }

    /// Insert a chunk at the given chunk coordinates, returning the previous
    /// occupant if any.
    pub fn insert_chunk(&mut self, coords: IVec2, chunk: Chunk<T, N, S>) -> Option<Chunk<T, N, S>> {
        self.chunks.insert(chunk_key(coords), chunk)
    }

    pub fn remove_chunk(&mut self, coords: IVec2) -> Option<Chunk<T, N, S>> {
        self.chunks.remove(&chunk_key(coords))
    }

    pub fn chunk(&self, coords: IVec2) -> Option<&Chunk<T, N, S>> {
        self.chunks.get(&chunk_key(coords))
    }

    pub fn chunk_mut(&mut self, coords: IVec2) -> Option<&mut Chunk<T, N, S>> {
        self.chunks.get_mut(&chunk_key(coords))
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Iterate chunks with their chunk coordinates, in deterministic order.
    pub fn chunks(&self) -> impl Iterator<Item = (IVec2, &Chunk<T, N, S>)> {
        self.chunks
            .iter()
            .map(|(&(x, y), chunk)| (IVec2::new(x, y), chunk))
    }

    pub fn chunks_mut(&mut self) -> impl Iterator<Item = (IVec2, &mut Chunk<T, N, S>)> {
        self.chunks
            .iter_mut()
            .map(|(&(x, y), chunk)| (IVec2::new(x, y), chunk))
    }
}

impl<T, const N: i32, S> Grid for World<T, N, S> {
    type Cell = T;
    type State = S;

    fn get(&self, point: IVec2) -> Option<&Self::Cell> {
        let (chunk, local) = ChunkCoords::<N>::world_to_chunk_and_local(point);

        self.chunks.get(&chunk_key(chunk))?.get(local)
    }

    fn get_mut(&mut self, point: IVec2) -> Option<&mut Self::Cell> {
        let (chunk, local) = ChunkCoords::<N>::world_to_chunk_and_local(point);

        self.chunks.get_mut(&chunk_key(chunk))?.get_mut(local)
    }

    fn swap(&mut self, first: IVec2, second: IVec2) -> Option<()> {
        let (first_chunk, first_local) = ChunkCoords::<N>::world_to_chunk_and_local(first);
        let (second_chunk, second_local) = ChunkCoords::<N>::world_to_chunk_and_local(second);

        if first_chunk == second_chunk {
            return self
                .chunks
                .get_mut(&chunk_key(first_chunk))?
                .swap(first_local, second_local);
        }

        // Two chunks cannot be borrowed mutably out of the map at once, so
        // the first is taken out for the duration of the swap.
        let mut taken = self.chunks.remove(&chunk_key(first_chunk))?;
        let result = (|| {
            let other = self.chunks.get_mut(&chunk_key(second_chunk))?;
            std::mem::swap(taken.get_mut(first_local)?, other.get_mut(second_local)?);
            Some(())
        })();
        self.chunks.insert(chunk_key(first_chunk), taken);

        result
    }

    fn get_state(&self, point: IVec2) -> Option<&Self::State> {
        let (chunk, local) = ChunkCoords::<N>::world_to_chunk_and_local(point);

        self.chunks.get(&chunk_key(chunk))?.get_state(local)
    }

    fn get_state_mut(&mut self, point: IVec2) -> Option<&mut Self::State> {
        let (chunk, local) = ChunkCoords::<N>::world_to_chunk_and_local(point);

        self.chunks.get_mut(&chunk_key(chunk))?.get_state_mut(local)
    }
}

impl<T, const N: i32, S> Stainable for World<T, N, S> {
    fn stained(&self) -> Area {
        Area::from_areas(self.chunks().map(|(coords, chunk)| {
            let mut area = chunk.stained();
            area.translate(N * coords);
            area
        }))
    }

    fn stain(&mut self, rect: CellRect) {
        let (min_chunk, _) = ChunkCoords::<N>::world_to_chunk_and_local(rect.min);
        let (max_chunk, _) = ChunkCoords::<N>::world_to_chunk_and_local(rect.max);

        for cy in min_chunk.y..=max_chunk.y {
            for cx in min_chunk.x..=max_chunk.x {
                let coords = IVec2::new(cx, cy);

                if let Some(chunk) = self.chunks.get_mut(&chunk_key(coords)) {
                    chunk.stain(rect.translated(-N * coords));
                }
            }
        }
    }

    fn stain_point(&mut self, point: IVec2) {
        let (chunk, local) = ChunkCoords::<N>::world_to_chunk_and_local(point);

        if let Some(chunk) = self.chunks.get_mut(&chunk_key(chunk)) {
            chunk.stain_point(local);
        }
    }

    fn clear_stain(&mut self) {
        for chunk in self.chunks.values_mut() {
            chunk.clear_stain();
        }
    }
}

impl<T, const N: i32, S> World<T, N, S>
where
    T: Cell,
    T::Action: Action<Cell = T, State = S>,
{
    /// Advance the world by one step.
    ///
    /// Each chunk's stain is taken and cleared, then the stained points are
    /// visited in shuffled order. A cell whose declared range stays inside
    /// its chunk ticks against the chunk alone; anything reaching over a
    /// chunk edge is deferred to a second pass that ticks against the whole
    /// world. Mutations restain through the grid surface, and an apply that
    /// fails restains its origin, so unsettled cells are revisited next step
    /// and a settled world steps for free.
    pub fn step(&mut self, rng: &mut impl Rng) -> StepStats {
        let start = Instant::now();
        let mut stats = StepStats::default();
        let mut deferred: Vec<IVec2> = Vec::new();

        let keys: Vec<(i32, i32)> = self.chunks.keys().copied().collect();

        for key in keys {
            let Some(chunk) = self.chunks.get_mut(&key) else {
                continue;
            };
            let coords = ChunkCoords::<N>(IVec2::new(key.0, key.1));
            let area = Chunk::<T, N, S>::area();

            let stain = chunk.stained();
            chunk.clear_stain();

            stain.apply_randomly(rng, |point| {
                let reach = chunk.at(point).range().translated(point);

                if !(area.contains(reach.min) && area.contains(reach.max)) {
                    deferred.push(coords.local_to_world(point));
                    return;
                }

                stats.cells_ticked += 1;

                let proposed = {
                    let cell = chunk.at(point);
                    cell.tick(point, &*chunk)
                };

                match proposed {
                    Ok(Some(action)) => {
                        if action.apply(point, chunk).is_some() {
                            stats.actions_applied += 1;
                        } else {
                            // A contended apply must retry next step.
                            chunk.stain_point(point);
                        }
                    }
                    Ok(None) => {}
                    Err(err) => {
                        stats.errors += 1;
                        error!(point = %coords.local_to_world(point), error = %err, "cell tick failed");
                    }
                }
            });
        }

        stats.deferred = deferred.len();
        deferred.as_mut_slice().shuffle(rng);

        for point in deferred {
            let proposed = match self.get(point) {
                Some(cell) => cell.tick(point, &*self),
                None => continue,
            };

            stats.cells_ticked += 1;

            match proposed {
                Ok(Some(action)) => {
                    if action.apply(point, self).is_some() {
                        stats.actions_applied += 1;
                    } else {
                        self.stain_point(point);
                    }
                }
                Ok(None) => {}
                Err(err) => {
                    stats.errors += 1;
                    error!(point = %point, error = %err, "cell tick failed");
                }
            }
        }

        stats.duration = start.elapsed();
        debug!(
            ticked = stats.cells_ticked,
            applied = stats.actions_applied,
            deferred = stats.deferred,
            errors = stats.errors,
            "world step complete"
        );

        stats
    }
}

/// Fixed-rate step accumulator.
///
/// Translates wall-clock frame time into a bounded number of steps so the
/// simulation rate is independent of the frame rate. Catch-up is capped; a
/// long stall drops steps instead of spiraling.
#[derive(Debug, Clone)]
pub struct TickTimer {
    rate: f32,
    accumulator: f32,
    max_catch_up: u32,
}

impl TickTimer {
    /// `rate` is in steps per second and must be positive.
    pub fn new(rate: f32) -> Self {
        assert!(rate > 0.0, "tick rate must be positive");
        Self {
            rate,
            accumulator: 0.0,
            max_catch_up: 4,
        }
    }

    pub fn rate(&self) -> f32 {
        self.rate
    }

    /// Feed elapsed seconds; returns how many steps to run now.
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.accumulator += self.rate * dt;

        if self.accumulator < 1.0 {
            return 0;
        }

        let steps = self.accumulator.floor();
        self.accumulator = (self.accumulator - steps).clamp(0.0, 1.0);

        (steps as u32).min(self.max_catch_up)
    }
}
