use glam::IVec2;
use rand::{Rng, seq::SliceRandom};
use sandspace_common::CellRect;

/// A possibly disjoint set of stained rectangles.
///
/// Single-rect is the common case (one chunk, one dirty region); `Many`
/// appears when stains from several chunks are merged at the world level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Area {
    Empty,
    Rect(CellRect),
    Many(Vec<CellRect>),
}

impl Area {
    pub fn is_empty(&self) -> bool {
        matches!(self, Area::Empty)
    }

    pub fn translate(&mut self, offset: IVec2) {
        match self {
            Area::Empty => {}
            Area::Rect(rect) => *rect = rect.translated(offset),
            Area::Many(rects) => {
                for rect in rects.iter_mut() {
                    *rect = rect.translated(offset);
                }
            }
        }
    }

    /// Visit every covered point in row-major order.
    pub fn apply(&self, mut f: impl FnMut(IVec2)) {
        match self {
            Area::Empty => {}
            Area::Rect(rect) => apply_rect(*rect, &mut f),
            Area::Many(rects) => {
                for rect in rects.iter() {
                    apply_rect(*rect, &mut f);
                }
            }
        }
    }

    /// Visit every covered point in shuffled order.
    ///
    /// Stepping visits stained points this way so that, e.g., sand in a full
    /// row does not always cascade in one sweep direction.
    pub fn apply_randomly(&self, rng: &mut impl Rng, mut f: impl FnMut(IVec2)) {
        let mut points = Vec::with_capacity(self.point_count());
        self.apply(|point| points.push(point));
        points.as_mut_slice().shuffle(rng);

        for point in points {
            f(point);
        }
    }

    pub fn contains(&self, point: IVec2) -> bool {
        match self {
            Area::Empty => false,
            Area::Rect(rect) => rect.contains(point),
            Area::Many(rects) => rects.iter().any(|rect| rect.contains(point)),
        }
    }

    pub fn point_count(&self) -> usize {
        match self {
            Area::Empty => 0,
            Area::Rect(rect) => rect.point_count(),
            Area::Many(rects) => rects.iter().map(CellRect::point_count).sum(),
        }
    }

    /// Merge several areas into one. Rects are collected, not unioned, so
    /// disjoint stains stay disjoint.
    pub fn from_areas(areas: impl Iterator<Item = Self>) -> Self {
        let mut rects = Vec::new();

        for area in areas {
            match area {
                Area::Empty => {}
                Area::Rect(rect) => rects.push(rect),
                Area::Many(more) => rects.extend(more),
            }
        }

        match rects.len() {
            0 => Area::Empty,
            1 => Area::Rect(rects[0]),
            _ => Area::Many(rects),
        }
    }
}

fn apply_rect(rect: CellRect, f: &mut impl FnMut(IVec2)) {
    for y in rect.min.y..=rect.max.y {
        for x in rect.min.x..=rect.max.x {
            f(IVec2::new(x, y));
        }
    }
}

impl From<CellRect> for Area {
    fn from(rect: CellRect) -> Self {
        Area::Rect(rect)
    }
}

impl From<Option<CellRect>> for Area {
    fn from(rect: Option<CellRect>) -> Self {
        match rect {
            Some(rect) => Area::Rect(rect),
            None => Area::Empty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn apply_visits_every_point_once() {
        let area = Area::Rect(CellRect::new(0, 0, 2, 2));
        let mut visited = Vec::new();
        area.apply(|p| visited.push(p));
        assert_eq!(visited.len(), 9);
        assert_eq!(visited[0], IVec2::new(0, 0));
        assert_eq!(visited[8], IVec2::new(2, 2));
    }

    #[test]
    fn apply_randomly_covers_same_points() {
        let area = Area::Rect(CellRect::new(0, 0, 3, 3));
        let mut rng = StdRng::seed_from_u64(7);

        let mut shuffled = Vec::new();
        area.apply_randomly(&mut rng, |p| shuffled.push(p));

        let mut ordered = Vec::new();
        area.apply(|p| ordered.push(p));

        shuffled.sort_by_key(|p| (p.y, p.x));
        assert_eq!(shuffled, ordered);
    }

    #[test]
    fn from_areas_flattens_and_skips_empty() {
        let merged = Area::from_areas(
            vec![
                Area::Empty,
                Area::Rect(CellRect::new(0, 0, 1, 1)),
                Area::Many(vec![CellRect::new(5, 5, 6, 6), CellRect::new(9, 9, 9, 9)]),
            ]
            .into_iter(),
        );
        assert_eq!(merged.point_count(), 4 + 4 + 1);
        assert!(merged.contains(IVec2::new(9, 9)));
        assert!(!merged.contains(IVec2::new(3, 3)));
    }

    #[test]
    fn single_rect_stays_rect() {
        let merged = Area::from_areas(vec![Area::Rect(CellRect::new(1, 1, 2, 2))].into_iter());
        assert_eq!(merged, Area::Rect(CellRect::new(1, 1, 2, 2)));
    }

    #[test]
    fn translate_moves_all_rects() {
        let mut area = Area::Many(vec![CellRect::new(0, 0, 1, 1), CellRect::new(4, 4, 5, 5)]);
        area.translate(IVec2::new(10, 0));
        assert!(area.contains(IVec2::new(10, 0)));
        assert!(area.contains(IVec2::new(15, 5)));
        assert!(!area.contains(IVec2::new(0, 0)));
    }
}
