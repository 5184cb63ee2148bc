mod sand;
mod scene;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use rand::{SeedableRng, rngs::StdRng};
use sandspace_common::Rgba;
use sandspace_kernel::TickTimer;
use sandspace_render::{ChunkImage, CpuRenderer, Renderer};
use sandspace_render_wgpu::{GpuRenderer, RenderError};
use tracing::info;
use tracing_subscriber::EnvFilter;

use scene::{CHUNK_SIZE, SceneSpec};

#[derive(Parser)]
#[command(name = "sandspace-cli", about = "CLI tool for sandspace: probe sampling, run demos")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print crate info
    Info,
    /// Render the 2x2 convention texture and report where each row lands
    Probe {
        /// Also render on the GPU and compare against the CPU reference
        #[arg(long)]
        gpu: bool,
    },
    /// Run a falling-sand demo and write PNG frames
    Run {
        /// Scene file (YAML); a built-in demo scene is used when omitted
        #[arg(short, long)]
        scene: Option<PathBuf>,
        /// Number of frames to write
        #[arg(short, long, default_value = "60")]
        frames: u32,
        /// Simulation steps per second
        #[arg(long, default_value = "30")]
        rate: f32,
        /// Frame rate the timer is fed with
        #[arg(long, default_value = "30")]
        fps: f32,
        /// RNG seed
        #[arg(long, default_value = "42")]
        seed: u64,
        /// Output pixels per cell
        #[arg(long, default_value = "4")]
        scale: u32,
        /// Output directory for frames
        #[arg(short, long, default_value = "frames")]
        out: PathBuf,
        /// Render chunks on the GPU instead of the CPU reference
        #[arg(long)]
        gpu: bool,
    },
}

/// Chunk renderer backend selected at run time.
enum Backend {
    Cpu(CpuRenderer),
    Gpu(GpuRenderer),
}

impl Backend {
    fn select(gpu: bool) -> anyhow::Result<Self> {
        if gpu {
            Ok(Backend::Gpu(GpuRenderer::headless()?))
        } else {
            Ok(Backend::Cpu(CpuRenderer::new()))
        }
    }

    fn render(&mut self, image: &ChunkImage, width: u32, height: u32) -> anyhow::Result<Vec<u8>> {
        match self {
            Backend::Cpu(renderer) => Ok(renderer.render(image, width, height)),
            Backend::Gpu(renderer) => Ok(renderer.render(image, width, height)?),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => info_command(),
        Commands::Probe { gpu } => probe_command(gpu),
        Commands::Run {
            scene,
            frames,
            rate,
            fps,
            seed,
            scale,
            out,
            gpu,
        } => run_command(scene, frames, rate, fps, seed, scale, out, gpu),
    }
}

fn info_command() -> anyhow::Result<()> {
    println!("sandspace-cli v{}", env!("CARGO_PKG_VERSION"));
    println!("chunk size: {CHUNK_SIZE}x{CHUNK_SIZE} cells");
    println!("texel format: rgba8 unorm, row 0 on top");
    println!("sampling: nearest, clamp to edge, vertical flip in the fragment stage");
    Ok(())
}

fn probe_command(gpu: bool) -> anyhow::Result<()> {
    // Row 0 = red, green; row 1 = blue, white.
    let image = ChunkImage::from_texels(2, &[Rgba::RED, Rgba::GREEN, Rgba::BLUE, Rgba::WHITE]);

    let cpu = CpuRenderer::new().render(&image, 2, 2);
    let top_left = &cpu[0..4];
    let bottom_left = &cpu[8..12];

    println!("cpu reference: top-left pixel {top_left:?}, bottom-left pixel {bottom_left:?}");
    if top_left == [255, 0, 0, 255] && bottom_left == [0, 0, 255, 255] {
        println!("convention holds: texel row 0 lands in pixel row 0");
    } else {
        anyhow::bail!("cpu reference violates the sampling convention");
    }

    if gpu {
        match GpuRenderer::headless() {
            Ok(mut renderer) => {
                let pixels = renderer.render(&image, 2, 2)?;
                if pixels == cpu {
                    println!("gpu output matches the cpu reference");
                } else {
                    anyhow::bail!("gpu output diverges from the cpu reference: {pixels:?}");
                }
            }
            Err(RenderError::AdapterUnavailable) => {
                println!("no gpu adapter available; skipped the gpu comparison");
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn run_command(
    scene: Option<PathBuf>,
    frames: u32,
    rate: f32,
    fps: f32,
    seed: u64,
    scale: u32,
    out: PathBuf,
    gpu: bool,
) -> anyhow::Result<()> {
    anyhow::ensure!(scale > 0, "scale must be positive");
    anyhow::ensure!(fps > 0.0, "fps must be positive");

    let spec = match scene {
        Some(path) => SceneSpec::load(&path)?,
        None => SceneSpec::demo(),
    };

    let mut rng = StdRng::seed_from_u64(seed);
    let mut world = spec.build(&mut rng);
    let mut backend = Backend::select(gpu)?;
    let mut timer = TickTimer::new(rate);

    std::fs::create_dir_all(&out)
        .with_context(|| format!("creating output directory {}", out.display()))?;

    let chunk_pixels = CHUNK_SIZE as u32 * scale;
    let width = spec.chunks_x * chunk_pixels;
    let height = spec.chunks_y * chunk_pixels;
    let dt = 1.0 / fps;

    info!(frames, width, height, gpu, "starting demo run");

    for frame in 0..frames {
        for _ in 0..timer.advance(dt) {
            let stats = world.step(&mut rng);
            tracing::debug!(
                ticked = stats.cells_ticked,
                applied = stats.actions_applied,
                "stepped"
            );
        }

        let mut canvas = image::RgbaImage::new(width, height);
        for (coords, chunk) in world.chunks() {
            let chunk_image = ChunkImage::from_chunk(chunk);
            let pixels = backend.render(&chunk_image, chunk_pixels, chunk_pixels)?;
            blit(
                &mut canvas,
                &pixels,
                chunk_pixels,
                coords.x as u32 * chunk_pixels,
                coords.y as u32 * chunk_pixels,
            );
        }

        let path = out.join(format!("frame_{frame:04}.png"));
        canvas
            .save(&path)
            .with_context(|| format!("writing {}", path.display()))?;
    }

    info!("wrote {frames} frames to {}", out.display());
    Ok(())
}

/// Copy a square RGBA8 pixel block into the canvas at the given offset.
fn blit(canvas: &mut image::RgbaImage, pixels: &[u8], size: u32, ox: u32, oy: u32) {
    for y in 0..size {
        for x in 0..size {
            let index = ((y * size + x) * 4) as usize;
            let texel: [u8; 4] = pixels[index..index + 4].try_into().unwrap();
            canvas.put_pixel(ox + x, oy + y, image::Rgba(texel));
        }
    }
}
