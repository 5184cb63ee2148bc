//! Renderer-agnostic chunk imaging.
//!
//! A chunk becomes an RGBA8 texel buffer ([`ChunkImage`]), and a renderer
//! turns that buffer into pixels through one fixed sampling contract:
//! nearest-neighbor, clamp-to-edge, with the vertical UV coordinate flipped.
//! The flip bridges the chunk's row-major cell layout and the quad's UV
//! orientation; [`sampler`] is the CPU reference for it and the wgpu backend
//! implements the same contract on the GPU.
//!
//! # Invariants
//! - Renderers never mutate chunks; imaging consumes stains, nothing else.
//! - Texel bytes pass through sampling unchanged: no tinting, no gamma, no
//!   alpha handling.
//! - Cell row 0 occupies texel row 0.

mod image;
mod renderer;
pub mod sampler;

pub use image::ChunkImage;
pub use renderer::{CpuRenderer, Renderer};
