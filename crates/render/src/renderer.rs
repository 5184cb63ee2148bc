use tracing::trace;

use crate::image::ChunkImage;
use crate::sampler;

/// Renderer seam: turn a chunk image into an RGBA8 pixel buffer.
///
/// Backends differ only in where the sampling contract runs; the contract
/// itself (nearest, clamp-to-edge, vertical flip) is fixed. Renderers never
/// mutate chunk state.
pub trait Renderer {
    /// The pixel buffer (or failure) produced by this renderer.
    type Output;

    /// Render the image to a `width` x `height` RGBA8 buffer, row 0 on top.
    fn render(&mut self, image: &ChunkImage, width: u32, height: u32) -> Self::Output;
}

/// Software renderer: rasterizes the fullscreen quad on the CPU.
///
/// Reference implementation for the wgpu backend and the fallback when no
/// adapter is available. Pixel row 0 sits at the top of the target, the
/// quad's v coordinate runs bottom-up in clip space, and the fragment
/// contract flips it again; sampling happens at pixel centers exactly as the
/// GPU rasterizer would place them.
#[derive(Debug, Default)]
pub struct CpuRenderer;

impl CpuRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for CpuRenderer {
    type Output = Vec<u8>;

    fn render(&mut self, image: &ChunkImage, width: u32, height: u32) -> Vec<u8> {
        let mut pixels = vec![0u8; (width * height * 4) as usize];

        for py in 0..height {
            // Quad UV at this pixel row: v = 1 at the top edge of the target.
            let v = 1.0 - (py as f32 + 0.5) / height as f32;

            for px in 0..width {
                let u = (px as f32 + 0.5) / width as f32;
                let texel = sampler::sample_bytes(image, u, v);

                let index = ((py * width + px) * 4) as usize;
                pixels[index..index + 4].copy_from_slice(&texel);
            }
        }

        trace!(width, height, "cpu render complete");

        pixels
    }
}
