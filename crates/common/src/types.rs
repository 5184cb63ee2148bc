use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Linear RGBA color with float channels in [0, 1].
///
/// Cells report their color through this type; renderers quantize it to
/// 8-bit texels. No gamma handling is applied anywhere in the pipeline, so
/// texel bytes pass through sampling unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    pub const RED: Self = Self::new(1.0, 0.0, 0.0, 1.0);
    pub const GREEN: Self = Self::new(0.0, 1.0, 0.0, 1.0);
    pub const BLUE: Self = Self::new(0.0, 0.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from RGB channels.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Quantize to 8-bit channels, rounding to nearest.
    pub fn to_bytes(self) -> [u8; 4] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }

    pub fn from_bytes(bytes: [u8; 4]) -> Self {
        let d = |b: u8| b as f32 / 255.0;
        Self::new(d(bytes[0]), d(bytes[1]), d(bytes[2]), d(bytes[3]))
    }
}

/// Axis-aligned integer rectangle with inclusive bounds.
///
/// Used for cell neighborhoods and dirty (stained) regions. Both corners are
/// part of the rect, so a single point is `min == max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRect {
    pub min: IVec2,
    pub max: IVec2,
}

impl CellRect {
    pub const fn new(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Self {
        Self {
            min: IVec2::new(min_x, min_y),
            max: IVec2::new(max_x, max_y),
        }
    }

    /// Rect covering both corners, in either order.
    pub fn from_corners(a: IVec2, b: IVec2) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Single-point rect.
    pub fn point(p: IVec2) -> Self {
        Self { min: p, max: p }
    }

    pub fn from_center_half_size(center: IVec2, half_size: IVec2) -> Self {
        Self {
            min: center - half_size,
            max: center + half_size,
        }
    }

    pub fn contains(&self, point: IVec2) -> bool {
        self.min.x <= point.x
            && point.x <= self.max.x
            && self.min.y <= point.y
            && point.y <= self.max.y
    }

    /// Smallest rect covering both rects.
    pub fn union(&self, other: Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Smallest rect covering this rect and the point.
    pub fn union_point(&self, point: IVec2) -> Self {
        Self {
            min: self.min.min(point),
            max: self.max.max(point),
        }
    }

    /// Overlap of two rects, or `None` when they are disjoint.
    pub fn intersect(&self, other: Self) -> Option<Self> {
        let min = self.min.max(other.min);
        let max = self.max.min(other.max);
        if min.x > max.x || min.y > max.y {
            None
        } else {
            Some(Self { min, max })
        }
    }

    pub fn translated(&self, offset: IVec2) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Number of points covered (inclusive bounds).
    pub fn point_count(&self) -> usize {
        let w = (self.max.x - self.min.x + 1).max(0) as usize;
        let h = (self.max.y - self.min.y + 1).max(0) as usize;
        w * h
    }
}
