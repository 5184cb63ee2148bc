//! YAML scene descriptions for the demo runner.
//!
//! A scene names a chunk grid plus regions to fill or scatter with a
//! material. Coordinates are world cells; regions outside loaded chunks are
//! silently skipped, the same way the grid surface treats missing chunks.

use std::path::Path;

use anyhow::Context;
use glam::IVec2;
use rand::Rng;
use sandspace_kernel::{Chunk, Grid, World};
use serde::{Deserialize, Serialize};

use crate::sand::Material;

pub const CHUNK_SIZE: i32 = 32;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneSpec {
    /// Chunk grid extent, in chunks.
    pub chunks_x: u32,
    pub chunks_y: u32,
    #[serde(default)]
    pub fills: Vec<FillSpec>,
    #[serde(default)]
    pub scatter: Vec<ScatterSpec>,
}

/// Fill every cell of a rectangle with one material.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FillSpec {
    pub material: MaterialSpec,
    pub min: [i32; 2],
    pub max: [i32; 2],
}

/// Fill each cell of a rectangle with independent probability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScatterSpec {
    pub material: MaterialSpec,
    pub min: [i32; 2],
    pub max: [i32; 2],
    pub probability: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialSpec {
    Air,
    Sand,
    Stone,
}

impl From<MaterialSpec> for Material {
    fn from(spec: MaterialSpec) -> Self {
        match spec {
            MaterialSpec::Air => Material::Air,
            MaterialSpec::Sand => Material::Sand,
            MaterialSpec::Stone => Material::Stone,
        }
    }
}

impl SceneSpec {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading scene file {}", path.display()))?;
        let scene: Self = serde_yaml::from_str(&text)
            .with_context(|| format!("parsing scene file {}", path.display()))?;
        scene.validate()?;
        Ok(scene)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.chunks_x > 0 && self.chunks_y > 0,
            "scene must have at least one chunk"
        );
        for scatter in &self.scatter {
            anyhow::ensure!(
                (0.0..=1.0).contains(&scatter.probability),
                "scatter probability must be in 0..=1"
            );
        }
        Ok(())
    }

    /// Sand poured over a stone floor; used when no scene file is given.
    pub fn demo() -> Self {
        Self {
            chunks_x: 2,
            chunks_y: 2,
            fills: vec![FillSpec {
                material: MaterialSpec::Stone,
                min: [0, 60],
                max: [63, 63],
            }],
            scatter: vec![ScatterSpec {
                material: MaterialSpec::Sand,
                min: [12, 0],
                max: [51, 19],
                probability: 0.55,
            }],
        }
    }

    /// Build the world and populate it from the fill and scatter regions.
    pub fn build(&self, rng: &mut impl Rng) -> World<Material, CHUNK_SIZE> {
        let mut world = World::new();
        for cy in 0..self.chunks_y as i32 {
            for cx in 0..self.chunks_x as i32 {
                world.insert_chunk(IVec2::new(cx, cy), Chunk::default());
            }
        }

        for fill in &self.fills {
            for_each_cell(fill.min, fill.max, |point| {
                if let Some(cell) = world.get_mut(point) {
                    *cell = fill.material.into();
                }
            });
        }

        for scatter in &self.scatter {
            for_each_cell(scatter.min, scatter.max, |point| {
                if rng.random_bool(scatter.probability) {
                    if let Some(cell) = world.get_mut(point) {
                        *cell = scatter.material.into();
                    }
                }
            });
        }

        world
    }
}

fn for_each_cell(min: [i32; 2], max: [i32; 2], mut f: impl FnMut(IVec2)) {
    for y in min[1]..=max[1] {
        for x in min[0]..=max[0] {
            f(IVec2::new(x, y));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn parses_a_scene_file() {
        let text = "\
chunks_x: 1
chunks_y: 1
fills:
  - material: stone
    min: [0, 30]
    max: [31, 31]
scatter:
  - material: sand
    min: [4, 0]
    max: [27, 7]
    probability: 0.5
";
        let scene: SceneSpec = serde_yaml::from_str(text).unwrap();
        assert_eq!(scene.chunks_x, 1);
        assert_eq!(scene.fills.len(), 1);
        assert_eq!(scene.fills[0].material, MaterialSpec::Stone);
        assert_eq!(scene.scatter[0].probability, 0.5);
    }

    #[test]
    fn fills_and_scatter_populate_the_world() {
        let scene = SceneSpec {
            chunks_x: 1,
            chunks_y: 1,
            fills: vec![FillSpec {
                material: MaterialSpec::Stone,
                min: [0, 31],
                max: [31, 31],
            }],
            scatter: vec![ScatterSpec {
                material: MaterialSpec::Sand,
                min: [0, 0],
                max: [31, 0],
                probability: 1.0,
            }],
        };

        let mut rng = StdRng::seed_from_u64(5);
        let world = scene.build(&mut rng);

        assert_eq!(world.chunk_count(), 1);
        assert_eq!(world.get(IVec2::new(10, 31)), Some(&Material::Stone));
        assert_eq!(world.get(IVec2::new(10, 0)), Some(&Material::Sand));
        assert_eq!(world.get(IVec2::new(10, 15)), Some(&Material::Air));
    }

    #[test]
    fn fill_outside_loaded_chunks_is_skipped() {
        let scene = SceneSpec {
            chunks_x: 1,
            chunks_y: 1,
            fills: vec![FillSpec {
                material: MaterialSpec::Stone,
                min: [30, 30],
                max: [40, 40],
            }],
            scatter: vec![],
        };

        let mut rng = StdRng::seed_from_u64(5);
        let world = scene.build(&mut rng);
        assert_eq!(world.get(IVec2::new(31, 31)), Some(&Material::Stone));
        assert_eq!(world.get(IVec2::new(32, 32)), None);
    }

    #[test]
    fn demo_scene_validates() {
        assert!(SceneSpec::demo().validate().is_ok());
    }
}
