//! HueStream CLI
//!
//! Command-line interface for inspecting and running the hue filter.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use huestream::{
    config::PipelineConfig,
    effect::{HueMode, Quadrant},
    format::SendFormat,
    pipeline::run_file_pipeline,
    types::{Resolution, VideoFrame},
    HueFilter,
};

#[derive(Parser)]
#[command(name = "huestream")]
#[command(about = "Real-time NV12 video effects - hue tints and pop-art filter")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show supported effects and send capabilities
    Info,

    /// List hue effects with their chroma deltas
    Effects,

    /// Filter a raw NV12 file
    Apply {
        /// Input .nv12 file (headerless raw frames)
        #[arg(short, long)]
        input: PathBuf,

        /// Output .nv12 file
        #[arg(short, long)]
        output: PathBuf,

        /// Frame resolution, e.g. 1280x720 (defaults to the config file's)
        #[arg(short, long)]
        resolution: Option<String>,

        /// Hue effect (none, red, green, blue, warhol)
        #[arg(long)]
        hue: Option<String>,

        /// Filter worker threads
        #[arg(short, long)]
        workers: Option<usize>,

        /// Stop after N frames
        #[arg(long)]
        frames: Option<u64>,

        /// Load pipeline settings from a TOML file (flags override it)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Run filter throughput benchmark on synthetic frames
    Bench {
        /// Hue effect to benchmark
        #[arg(long, default_value = "warhol")]
        hue: String,

        /// Number of frames to filter
        #[arg(short, long, default_value = "300")]
        frames: u32,

        /// Frame resolution, e.g. 1280x720
        #[arg(short, long, default_value = "1280x720")]
        resolution: String,
    },
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("huestream=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Info => cmd_info(),
        Commands::Effects => cmd_effects(),
        Commands::Apply {
            input,
            output,
            resolution,
            hue,
            workers,
            frames,
            config,
        } => cmd_apply(input, output, resolution, hue, workers, frames, config),
        Commands::Bench {
            hue,
            frames,
            resolution,
        } => cmd_bench(hue, frames, resolution),
    }
}

/// Parse "WIDTHxHEIGHT"
fn parse_resolution(s: &str) -> anyhow::Result<Resolution> {
    let parts: Vec<&str> = s.split('x').collect();
    if parts.len() == 2 {
        if let (Ok(w), Ok(h)) = (parts[0].parse(), parts[1].parse()) {
            return Ok(Resolution::new(w, h));
        }
    }
    anyhow::bail!("Invalid resolution '{}', expected WIDTHxHEIGHT", s)
}

fn cmd_info() -> anyhow::Result<()> {
    println!("HueStream {}", huestream::VERSION);
    println!("==============\n");

    println!("=== Hue Effects ===");
    for mode in [
        HueMode::None,
        HueMode::Red,
        HueMode::Green,
        HueMode::Blue,
        HueMode::Warhol,
    ] {
        println!("  - {}", mode);
    }

    println!("\n=== Send Capabilities ===");
    for format in SendFormat::ALL {
        println!("  {:<18} {:>9} bytes/frame", format.to_string(), format.frame_len());
    }
    println!("\nDefault (unmatched request): {}", SendFormat::DEFAULT);

    Ok(())
}

fn cmd_effects() -> anyhow::Result<()> {
    println!("Available Effects");
    println!("=================\n");

    for mode in [HueMode::Red, HueMode::Green, HueMode::Blue] {
        if let Some(delta) = mode.solid_delta() {
            println!(
                "  {:<8} chroma shift (U {:+}, V {:+})",
                mode.to_string(),
                delta.u,
                delta.v
            );
        }
    }

    println!("  {:<8} greyscale quadrant split:", HueMode::Warhol.to_string());
    for quadrant in Quadrant::ALL {
        let delta = quadrant.tint();
        println!(
            "             {:<22} (U {:+}, V {:+})",
            quadrant.label(),
            delta.u,
            delta.v
        );
    }
    println!("  {:<8} pass-through", HueMode::None.to_string());

    println!("\nUsage: huestream apply --hue <name> ...");

    Ok(())
}

fn cmd_apply(
    input: PathBuf,
    output: PathBuf,
    resolution: Option<String>,
    hue: Option<String>,
    workers: Option<usize>,
    frames: Option<u64>,
    config_path: Option<PathBuf>,
) -> anyhow::Result<()> {
    let mut config = match config_path {
        Some(path) => PipelineConfig::load(&path)?,
        None => PipelineConfig::default(),
    };

    // Explicit flags win over the config file
    if let Some(res) = resolution {
        config.resolution = parse_resolution(&res)?;
    }
    if let Some(hue) = hue {
        config.filter.hue = hue.parse::<HueMode>()?;
    }
    if let Some(workers) = workers {
        config.workers = workers;
    }
    if let Some(cap) = frames {
        config.frame_cap = Some(cap);
    }

    if !config.resolution.is_even() {
        tracing::warn!(
            "Odd resolution {}; the quadrant split will truncate",
            config.resolution
        );
    }

    // A session advertises the capability matching the incoming frames
    if config.filter.requested.is_none() {
        config.filter.requested = Some(config.resolution);
    }

    println!("Configuration:");
    println!("  Input: {}", input.display());
    println!("  Output: {}", output.display());
    println!("  Resolution: {}", config.resolution);
    println!("  Hue: {}", config.filter.hue);
    println!("  Send capability: {}", config.filter.send_format());
    println!("  Workers: {}", config.workers.max(1));
    println!();

    let summary = run_file_pipeline(&input, &output, &config)?;

    println!("Results:");
    println!("  Frames: {}", summary.frames_out);
    println!("  Bytes: {}", summary.bytes_out);
    println!(
        "  Time: {:.2}s ({:.1} fps)",
        summary.elapsed_secs,
        summary.fps()
    );
    if summary.truncated_input {
        println!("  Note: input ended on a partial frame, tail dropped");
    }

    Ok(())
}

fn cmd_bench(hue: String, frames: u32, resolution: String) -> anyhow::Result<()> {
    println!("HueStream Filter Benchmark");
    println!("==========================\n");

    let mode = hue.parse::<HueMode>()?;
    let resolution = parse_resolution(&resolution)?;

    println!("Hue: {}", mode);
    println!("Frames: {}", frames);
    println!("Resolution: {}", resolution);
    println!();

    println!("Running benchmark...\n");

    let filter = HueFilter::new(mode);
    let frame = VideoFrame::new(resolution.width, resolution.height);

    let start = std::time::Instant::now();

    for _ in 0..frames {
        let _ = filter.apply(&frame);
    }

    let elapsed = start.elapsed();

    let fps = frames as f64 / elapsed.as_secs_f64();
    let ms_per_frame = elapsed.as_millis() as f64 / frames as f64;

    println!("Results:");
    println!("  Total time: {:.2}s", elapsed.as_secs_f64());
    println!("  Filter FPS: {:.1}", fps);
    println!("  ms/frame: {:.3}", ms_per_frame);
    println!(
        "  Realtime capable (30fps): {}",
        if fps >= 30.0 { "Yes" } else { "No" }
    );
    println!(
        "  Realtime capable (60fps): {}",
        if fps >= 60.0 { "Yes" } else { "No" }
    );

    let stats = filter.stats();
    println!("\nFilter Stats:");
    println!("  Frames filtered: {}", stats.frames_filtered);
    println!("  Bytes produced: {}", stats.bytes_out);

    Ok(())
}
