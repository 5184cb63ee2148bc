use glam::IVec2;
use sandspace_common::Rgba;
use sandspace_kernel::{Chunk, Grid, Renderable, Stainable};
use tracing::trace;

/// An RGBA8 texel buffer built from a chunk.
///
/// Row-major, tightly packed, four bytes per texel; cell row 0 occupies
/// texel row 0. This buffer is what gets uploaded as the fragment stage's
/// group-2 texture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkImage {
    size: u32,
    data: Vec<u8>,
}

impl ChunkImage {
    /// Fully transparent square image.
    pub fn blank(size: u32) -> Self {
        assert!(size > 0, "image size must be positive");
        Self {
            size,
            data: vec![0; (size * size * 4) as usize],
        }
    }

    /// Square image from row-major texel colors.
    ///
    /// # Panics
    /// Panics when `texels.len() != size * size`.
    pub fn from_texels(size: u32, texels: &[Rgba]) -> Self {
        assert_eq!(texels.len(), (size * size) as usize, "texel data must fill the image");
        let mut image = Self::blank(size);
        for (i, texel) in texels.iter().enumerate() {
            image.data[4 * i..4 * i + 4].copy_from_slice(&texel.to_bytes());
        }
        image
    }

    /// Build the full image by evaluating every cell's color.
    pub fn from_chunk<T, const N: i32, S>(chunk: &Chunk<T, N, S>) -> Self
    where
        T: Renderable,
    {
        let mut image = Self::blank(N as u32);

        for y in 0..N {
            for x in 0..N {
                let point = IVec2::new(x, y);

                if let Some(index) = chunk.index(point) {
                    let texel = chunk.at(point).color(point).to_bytes();
                    image.data[4 * index..4 * index + 4].copy_from_slice(&texel);
                }
            }
        }

        image
    }

    /// Rewrite only the texels covered by the chunk's stain. Returns how
    /// many texels were rewritten. The stain is read, not cleared; the
    /// stepping pass owns stain lifetimes.
    pub fn apply_stain<T, const N: i32, S>(&mut self, chunk: &Chunk<T, N, S>) -> usize
    where
        T: Renderable,
    {
        debug_assert_eq!(self.size, N as u32, "image and chunk sizes must match");

        let mut rewritten = 0;

        chunk.stained().apply(|point| {
            if let Some(index) = chunk.index(point) {
                let texel = chunk.at(point).color(point).to_bytes();
                self.data[4 * index..4 * index + 4].copy_from_slice(&texel);
                rewritten += 1;
            }
        });

        trace!(rewritten, "applied chunk stain to image");

        rewritten
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn width(&self) -> u32 {
        self.size
    }

    pub fn height(&self) -> u32 {
        self.size
    }

    /// Raw texel bytes, row-major RGBA8.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Texel bytes at `(x, y)` with row 0 on top.
    ///
    /// # Panics
    /// Panics when the coordinates are outside the image.
    pub fn texel(&self, x: u32, y: u32) -> [u8; 4] {
        assert!(x < self.size && y < self.size, "texel ({x}, {y}) out of bounds");
        let index = ((y * self.size + x) * 4) as usize;
        [
            self.data[index],
            self.data[index + 1],
            self.data[index + 2],
            self.data[index + 3],
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sandspace_common::CellRect;
    use std::convert::Infallible;

    /// Cell whose color is its stored value as a gray level.
    #[derive(Debug, Clone, Copy, Default)]
    struct Shade(u8);

    #[derive(Debug)]
    enum NoAction {}

    impl sandspace_kernel::Cell for Shade {
        type Action = NoAction;
        type Error = Infallible;

        fn tick(
            &self,
            _origin: IVec2,
            _grid: &impl Grid<Cell = Self>,
        ) -> Result<Option<Self::Action>, Self::Error> {
            Ok(None)
        }

        fn range(&self) -> CellRect {
            CellRect::new(0, 0, 0, 0)
        }
    }

    impl sandspace_kernel::Action for NoAction {
        type Cell = Shade;
        type State = ();

        fn apply(
            &self,
            _origin: IVec2,
            _grid: &mut impl Stainable<Cell = Self::Cell, State = Self::State>,
        ) -> Option<()> {
            match *self {}
        }
    }

    impl Renderable for Shade {
        fn color(&self, _point: IVec2) -> Rgba {
            let level = self.0 as f32 / 255.0;
            Rgba::new(level, level, level, 1.0)
        }
    }

    #[test]
    fn from_chunk_maps_cell_rows_to_texel_rows() {
        let mut chunk: Chunk<Shade, 2> = Chunk::default();
        *chunk.at_mut(IVec2::new(0, 0)) = Shade(10);
        *chunk.at_mut(IVec2::new(1, 0)) = Shade(20);
        *chunk.at_mut(IVec2::new(0, 1)) = Shade(30);
        *chunk.at_mut(IVec2::new(1, 1)) = Shade(40);

        let image = ChunkImage::from_chunk(&chunk);
        assert_eq!(image.texel(0, 0), [10, 10, 10, 255]);
        assert_eq!(image.texel(1, 0), [20, 20, 20, 255]);
        assert_eq!(image.texel(0, 1), [30, 30, 30, 255]);
        assert_eq!(image.texel(1, 1), [40, 40, 40, 255]);
    }

    #[test]
    fn apply_stain_rewrites_only_dirty_texels() {
        let mut chunk: Chunk<Shade, 4> = Chunk::default();
        let mut image = ChunkImage::from_chunk(&chunk);
        chunk.clear_stain();

        *chunk.at_mut(IVec2::new(2, 1)) = Shade(200);

        let rewritten = image.apply_stain(&chunk);
        assert_eq!(rewritten, 1);
        assert_eq!(image.texel(2, 1), [200, 200, 200, 255]);
        assert_eq!(image.texel(0, 0), [0, 0, 0, 255]);
    }

    #[test]
    fn apply_stain_on_clean_chunk_rewrites_nothing() {
        let mut chunk: Chunk<Shade, 4> = Chunk::default();
        let mut image = ChunkImage::from_chunk(&chunk);
        chunk.clear_stain();

        assert_eq!(image.apply_stain(&chunk), 0);
    }

    #[test]
    fn from_texels_round_trips_exact_bytes() {
        let image = ChunkImage::from_texels(2, &[Rgba::RED, Rgba::GREEN, Rgba::BLUE, Rgba::WHITE]);
        assert_eq!(image.texel(0, 0), [255, 0, 0, 255]);
        assert_eq!(image.texel(1, 0), [0, 255, 0, 255]);
        assert_eq!(image.texel(0, 1), [0, 0, 255, 255]);
        assert_eq!(image.texel(1, 1), [255, 255, 255, 255]);
    }
}
