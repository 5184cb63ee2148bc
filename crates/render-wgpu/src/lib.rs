//! wgpu render backend for chunk images.
//!
//! Draws a chunk texture onto an offscreen fullscreen quad through the
//! chunk fragment shader and reads the pixels back. Headless by design:
//! no surface, no presentation.
//!
//! # Invariants
//! - The fragment stage passes texel bytes through unchanged.
//! - Texture and sampler bind at group 2, slots 0 and 1; groups 0 and 1 are
//!   reserved and bound empty.
//! - Bound resources outlive the draw; wgpu's resource lifetimes enforce it.

mod error;
mod gpu;
mod shaders;

pub use error::RenderError;
pub use gpu::{ChunkTexture, GpuContext, GpuRenderer, TARGET_FORMAT};
pub use shaders::CHUNK_SHADER;
