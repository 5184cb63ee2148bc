//! CPU reference of the fragment-stage sampling contract.
//!
//! The fragment stage receives an interpolated UV coordinate, flips the
//! vertical axis (`v' = 1.0 - v`), samples the bound texture at `(u, v')`,
//! and emits the texel unchanged. Filtering here is nearest and wrap is
//! clamp-to-edge, matching the sampler the wgpu backend binds; out-of-range
//! UV is entirely the wrap mode's business.
//!
//! Under wgpu's top-left texture origin this means `v = 0` addresses the
//! bottom texel row and `v = 1` the top row. The quad geometry puts `v = 0`
//! at the bottom of clip space, so on screen the two inversions cancel and
//! texel row 0 lands in pixel row 0.

use sandspace_common::Rgba;

use crate::image::ChunkImage;

/// Sample the image at `(u, v)` per the fragment-stage contract.
pub fn sample(image: &ChunkImage, u: f32, v: f32) -> Rgba {
    Rgba::from_bytes(sample_bytes(image, u, v))
}

/// Byte-exact variant of [`sample`]; what the GPU writes to an RGBA8 target.
pub fn sample_bytes(image: &ChunkImage, u: f32, v: f32) -> [u8; 4] {
    let flipped = 1.0 - v;

    let x = nearest_texel(u, image.width());
    let y = nearest_texel(flipped, image.height());

    image.texel(x, y)
}

/// Nearest texel index along one axis with clamp-to-edge wrap.
fn nearest_texel(coord: f32, extent: u32) -> u32 {
    let scaled = (coord * extent as f32).floor();
    scaled.clamp(0.0, (extent - 1) as f32) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Row 0 = red, green; row 1 = blue, white.
    fn convention_image() -> ChunkImage {
        ChunkImage::from_texels(2, &[Rgba::RED, Rgba::GREEN, Rgba::BLUE, Rgba::WHITE])
    }

    #[test]
    fn vertical_axis_is_flipped() {
        let image = convention_image();
        // v near 1 addresses texel row 0, v near 0 addresses the last row.
        assert_eq!(sample(&image, 0.25, 0.75), Rgba::RED);
        assert_eq!(sample(&image, 0.25, 0.25), Rgba::BLUE);
        assert_eq!(sample(&image, 0.75, 0.75), Rgba::GREEN);
        assert_eq!(sample(&image, 0.75, 0.25), Rgba::WHITE);
    }

    #[test]
    fn quarter_quarter_uv_samples_blue() {
        // The 2x2 convention texture sampled at UV (0.25, 0.25) must yield
        // the color stored in row 1: blue.
        let image = convention_image();
        assert_eq!(sample(&image, 0.25, 0.25), Rgba::BLUE);
    }

    #[test]
    fn horizontal_axis_passes_through() {
        let image = convention_image();
        for &u in &[0.1, 0.3, 0.6, 0.9] {
            let top = sample_bytes(&image, u, 0.75);
            let bottom = sample_bytes(&image, u, 0.25);
            let mirrored_top = sample_bytes(&image, u, 1.0 - 0.25);
            // Same u, flipped v: only the row changes, never the column.
            assert_eq!(top, mirrored_top);
            let column = |texel: [u8; 4]| if texel == [255, 0, 0, 255] || texel == [0, 0, 255, 255] { 0 } else { 1 };
            assert_eq!(column(top), column(bottom));
        }
    }

    #[test]
    fn alpha_passes_through_including_zero() {
        let clear = Rgba::new(0.5, 0.25, 0.0, 0.0);
        let image = ChunkImage::from_texels(2, &[clear, Rgba::WHITE, Rgba::WHITE, Rgba::WHITE]);
        let sampled = sample_bytes(&image, 0.25, 0.75);
        assert_eq!(sampled[3], 0);
        assert_eq!(sampled, clear.to_bytes());
    }

    #[test]
    fn solid_texture_samples_exactly() {
        let color = Rgba::new(0.2, 0.4, 0.6, 0.8);
        let image = ChunkImage::from_texels(2, &[color; 4]);
        for &(u, v) in &[(0.1, 0.1), (0.9, 0.2), (0.5, 0.5), (0.3, 0.99)] {
            assert_eq!(sample_bytes(&image, u, v), color.to_bytes());
        }
    }

    #[test]
    fn out_of_range_uv_clamps_to_edge() {
        let image = convention_image();
        assert_eq!(sample(&image, -0.5, 0.75), Rgba::RED);
        assert_eq!(sample(&image, 1.5, 0.75), Rgba::GREEN);
        assert_eq!(sample(&image, 0.25, -1.0), Rgba::BLUE);
        assert_eq!(sample(&image, 0.25, 2.0), Rgba::RED);
    }

    #[test]
    fn edge_values_resolve_consistently() {
        let image = convention_image();
        // v = 0 flips to 1.0, which clamps onto the last row.
        assert_eq!(sample(&image, 0.25, 0.0), Rgba::BLUE);
        // v = 1 flips to 0.0: top row.
        assert_eq!(sample(&image, 0.25, 1.0), Rgba::RED);
    }
}
