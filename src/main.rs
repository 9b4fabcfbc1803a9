//! Command-line entry point.
//!
//! # Startup sequence
//!
//! 1. Initialise logging (`RUST_LOG`, default `info`).
//! 2. Load [`WavemanConfig`] from `--config` or the platform config dir.
//! 3. Overlay command-line flags onto the `shared` settings.
//! 4. Resolve artifacts, decode the input once per rate/layout, render.
//! 5. Write one SVG per artifact next to `--output`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use waveman::{
    config::{ArtifactSettings, WavemanConfig},
    pipeline::ArtifactRunner,
};

#[derive(Parser, Debug)]
#[command(name = "waveman", version, about = "Render audio files as SVG waveform bars")]
struct Cli {
    /// Input WAV file
    #[arg(short, long)]
    input: PathBuf,

    /// Output base path; defaults to the input path without its extension
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Config file (.toml or .json); defaults to the platform config dir
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of bars
    #[arg(long)]
    steps: Option<usize>,

    /// Horizontal pitch of one bar, gap included
    #[arg(long)]
    step_width: Option<f32>,

    /// Canvas height
    #[arg(long)]
    height: Option<f32>,

    /// Empty space between bars
    #[arg(long)]
    gap: Option<f32>,

    /// Corner radius of each bar
    #[arg(long)]
    rounded: Option<f32>,

    /// Bar fill color
    #[arg(long)]
    color: Option<String>,

    /// Reduction mode: avg, rnd_avg or max
    #[arg(long)]
    mode: Option<String>,

    /// Bar alignment: bottom or center
    #[arg(long)]
    align: Option<String>,

    /// Decode sample rate in Hz
    #[arg(long)]
    sample_rate: Option<u32>,

    /// Render each channel separately instead of downmixing
    #[arg(long)]
    stereo: bool,

    /// Indent the SVG output
    #[arg(long)]
    pretty: bool,
}

impl Cli {
    /// Settings given on the command line; unset flags stay `None`.
    fn settings(&self) -> ArtifactSettings {
        ArtifactSettings {
            steps: self.steps,
            step_width: self.step_width,
            height: self.height,
            gap: self.gap,
            rounded: self.rounded,
            color: self.color.clone(),
            mode: self.mode.clone(),
            align: self.align.clone(),
            sample_rate: self.sample_rate,
            mono: self.stereo.then_some(false),
            pretty: self.pretty.then_some(true),
            ..Default::default()
        }
    }

    fn output_base(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.input.with_extension(""))
    }
}

fn load_config(path: Option<&Path>) -> Result<WavemanConfig> {
    match path {
        Some(path) if !path.exists() => {
            anyhow::bail!("Config file {} does not exist", path.display())
        }
        Some(path) => WavemanConfig::load_from(path),
        None => WavemanConfig::load(),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;
    config.shared = cli.settings().overlay(&config.shared);

    let artifacts = config.resolve_all()?;
    log::info!(
        "Rendering {} artifact(s) from {}",
        artifacts.len(),
        cli.input.display()
    );

    let runner = ArtifactRunner::new(artifacts);
    let rendered = runner
        .run_wav(&cli.input)
        .with_context(|| format!("Failed to process {}", cli.input.display()))?;
    let written = ArtifactRunner::write_all(&rendered, &cli.output_base())?;

    for path in &written {
        println!("{}", path.display());
    }
    Ok(())
}
