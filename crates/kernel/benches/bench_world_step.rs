use std::convert::Infallible;
use std::hint::black_box;
use std::time::Instant;

use glam::IVec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use sandspace_common::CellRect;
use sandspace_kernel::{Action, Cell, Chunk, Grid, Stainable, World};

const CHUNK: i32 = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Grain {
    Sand,
    #[default]
    Empty,
}

#[derive(Debug)]
struct Fall(IVec2);

impl Cell for Grain {
    type Action = Fall;
    type Error = Infallible;

    fn tick(
        &self,
        origin: IVec2,
        grid: &impl Grid<Cell = Self>,
    ) -> Result<Option<Self::Action>, Self::Error> {
        match self {
            Grain::Sand => {
                let below = origin + IVec2::new(0, 1);
                if grid.map(below, |c| *c == Grain::Empty) == Some(true) {
                    Ok(Some(Fall(below)))
                } else {
                    Ok(None)
                }
            }
            Grain::Empty => Ok(None),
        }
    }

    fn range(&self) -> CellRect {
        CellRect::new(0, 0, 0, 1)
    }
}

impl Action for Fall {
    type Cell = Grain;
    type State = ();

    fn apply(
        &self,
        origin: IVec2,
        grid: &mut impl Stainable<Cell = Self::Cell, State = Self::State>,
    ) -> Option<()> {
        // Restain the neighborhood so grains stacked on this one cascade.
        grid.stain_around(origin, 1);
        grid.swap(origin, self.0)
    }
}

/// A column of chunks with sand scattered through the top half.
fn make_world(chunk_columns: i32, chunk_rows: i32, fill_every: i32) -> World<Grain, CHUNK> {
    let mut world = World::new();
    for cy in 0..chunk_rows {
        for cx in 0..chunk_columns {
            world.insert_chunk(IVec2::new(cx, cy), Chunk::default());
        }
    }

    let width = chunk_columns * CHUNK;
    let height = chunk_rows * CHUNK / 2;
    for y in 0..height {
        for x in (0..width).step_by(fill_every as usize) {
            *world.at_mut(IVec2::new(x, y)) = Grain::Sand;
        }
    }
    world
}

fn bench_step(label: &str, chunk_columns: i32, chunk_rows: i32, fill_every: i32, steps: usize) {
    let mut world = make_world(chunk_columns, chunk_rows, fill_every);
    let mut rng = StdRng::seed_from_u64(7);

    let mut ticked = 0usize;
    let start = Instant::now();
    for _ in 0..steps {
        let stats = black_box(&mut world).step(&mut rng);
        ticked += stats.cells_ticked;
    }
    let elapsed = start.elapsed();
    let per_step = elapsed / steps as u32;
    println!("  {label}: {per_step:?}/step, {ticked} cells ticked, total {elapsed:?}");
}

fn bench_settled(chunk_columns: i32, chunk_rows: i32, steps: usize) {
    let mut world = make_world(chunk_columns, chunk_rows, 3);
    let mut rng = StdRng::seed_from_u64(7);

    // Run until everything has landed; settled steps should be near-free.
    loop {
        let stats = world.step(&mut rng);
        if stats.cells_ticked == 0 {
            break;
        }
    }

    let start = Instant::now();
    for _ in 0..steps {
        let _ = black_box(black_box(&mut world).step(&mut rng));
    }
    let elapsed = start.elapsed();
    let per_step = elapsed / steps as u32;
    println!(
        "  settled ({chunk_columns}x{chunk_rows} chunks, {steps} steps): {per_step:?}/step, total {elapsed:?}"
    );
}

fn main() {
    println!("=== World Step Benchmarks ===\n");

    println!("Falling sand (active stain):");
    bench_step("1x2 chunks, dense", 1, 2, 2, 64);
    bench_step("4x4 chunks, dense", 4, 4, 2, 32);
    bench_step("4x4 chunks, sparse", 4, 4, 8, 32);

    println!("\nSettled world (empty stain):");
    bench_settled(4, 4, 1000);

    println!("\n=== Done ===");
}
