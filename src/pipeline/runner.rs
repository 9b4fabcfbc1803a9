//! Artifact runner: decode once, render every configured artifact.
//!
//! # Flow
//!
//! ```text
//! input path
//!   └─▶ for each ResolvedArtifact
//!         ├─ signal cached for (sample_rate, mono)?  ── no ─▶ Decoder::decode
//!         ├─ mono   → WaveformBuilder::render           → 1 waveform
//!         ├─ stereo → WaveformBuilder::render_channels  → 1 waveform per channel
//!         └─▶ SvgRenderer::render → RenderedArtifact
//! ```
//!
//! Decoding dominates the run time, so artifacts that ask for the same rate
//! and channel layout share one [`Signal`].

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::audio::{Decoder, Signal, WavDecoder};
use crate::config::ResolvedArtifact;
use crate::render::{Renderer, SvgRenderer};
use crate::waveform::{Waveform, WaveformBuilder};

// ---------------------------------------------------------------------------
// RenderedArtifact
// ---------------------------------------------------------------------------

/// One finished output document.
#[derive(Debug, Clone)]
pub struct RenderedArtifact {
    /// Artifact name, suffixed with `_ch<N>` for per-channel renderings.
    pub name: String,
    pub waveform: Waveform,
    /// The rendered document (SVG markup).
    pub document: String,
    /// File extension for `document`, without the dot.
    pub extension: &'static str,
}

// ---------------------------------------------------------------------------
// ArtifactRunner
// ---------------------------------------------------------------------------

/// Renders a list of artifacts from one input file.
///
/// # Example
///
/// ```rust,no_run
/// use std::path::Path;
/// use waveman::config::WavemanConfig;
/// use waveman::pipeline::ArtifactRunner;
///
/// let artifacts = WavemanConfig::default().resolve_all().unwrap();
/// let runner = ArtifactRunner::new(artifacts);
/// let rendered = runner.run_wav(Path::new("song.wav")).unwrap();
/// ArtifactRunner::write_all(&rendered, Path::new("out/song")).unwrap();
/// ```
pub struct ArtifactRunner {
    artifacts: Vec<ResolvedArtifact>,
}

impl ArtifactRunner {
    pub fn new(artifacts: Vec<ResolvedArtifact>) -> Self {
        Self { artifacts }
    }

    pub fn artifacts(&self) -> &[ResolvedArtifact] {
        &self.artifacts
    }

    /// Run with the built-in WAV decoder.
    pub fn run_wav(&self, input: &Path) -> Result<Vec<RenderedArtifact>> {
        self.run(input, |sample_rate, mono| WavDecoder::new(sample_rate, mono))
    }

    /// Run with decoders produced by `decoder_for(sample_rate, mono)`.
    ///
    /// Stops at the first failing artifact.
    pub fn run<D, F>(&self, input: &Path, decoder_for: F) -> Result<Vec<RenderedArtifact>>
    where
        D: Decoder,
        F: Fn(u32, bool) -> D,
    {
        let mut signals: HashMap<(u32, bool), Signal> = HashMap::new();
        let mut rendered = Vec::with_capacity(self.artifacts.len());

        for artifact in &self.artifacts {
            let layout = &artifact.layout;
            let key = (layout.sample_rate, layout.mono);

            let signal = match signals.entry(key) {
                Entry::Occupied(entry) => entry.into_mut(),
                Entry::Vacant(entry) => entry.insert(
                    decoder_for(layout.sample_rate, layout.mono)
                        .decode(input)
                        .with_context(|| format!("Failed to decode {}", input.display()))?,
                ),
            };

            rendered.extend(
                render_artifact(artifact, signal)
                    .with_context(|| format!("Failed to render artifact {:?}", artifact.name))?,
            );
        }

        ensure_unique_names(&rendered)?;
        Ok(rendered)
    }

    /// Write every document next to `base`.
    ///
    /// A single document is written to `<base>.<ext>`; several are written to
    /// `<base>.<name>.<ext>`.  Parent directories are created as needed.
    ///
    /// Fails before touching the disk when two documents share a name, so no
    /// file is silently overwritten.
    pub fn write_all(rendered: &[RenderedArtifact], base: &Path) -> Result<Vec<PathBuf>> {
        ensure_unique_names(rendered)?;
        if let Some(parent) = base.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let single = rendered.len() == 1;
        rendered
            .iter()
            .map(|artifact| {
                let mut file: OsString = base.as_os_str().to_owned();
                if !single {
                    file.push(".");
                    file.push(&artifact.name);
                }
                file.push(".");
                file.push(artifact.extension);
                let path = PathBuf::from(file);

                std::fs::write(&path, &artifact.document)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                log::info!("Wrote {} ({} bars)", path.display(), artifact.waveform.len());
                Ok(path)
            })
            .collect()
    }
}

/// Per-channel outputs are suffixed `_ch<N>`, which can clash with an
/// artifact that is literally named that way.
fn ensure_unique_names(rendered: &[RenderedArtifact]) -> Result<()> {
    let mut seen = HashSet::new();
    for artifact in rendered {
        if !seen.insert(artifact.name.as_str()) {
            bail!("Two outputs are named {:?}", artifact.name);
        }
    }
    Ok(())
}

fn render_artifact(artifact: &ResolvedArtifact, signal: &Signal) -> Result<Vec<RenderedArtifact>> {
    let builder = WaveformBuilder::new(artifact.layout.clone())?;
    let renderer = SvgRenderer::new(artifact.svg.clone());

    let waveforms: Vec<(String, Waveform)> = if artifact.layout.mono || signal.channel_count() == 1 {
        vec![(artifact.name.clone(), builder.render(signal)?)]
    } else {
        builder
            .render_channels(signal)?
            .into_iter()
            .enumerate()
            .map(|(i, w)| (format!("{}_ch{i}", artifact.name), w))
            .collect()
    };

    log::debug!(
        "Artifact {:?}: {} waveform(s), {} mode, {} alignment",
        artifact.name,
        waveforms.len(),
        artifact.layout.mode,
        artifact.layout.align
    );

    waveforms
        .into_iter()
        .map(|(name, waveform)| {
            let document = renderer.render(&waveform)?;
            Ok(RenderedArtifact {
                name,
                waveform,
                document,
                extension: renderer.extension(),
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
