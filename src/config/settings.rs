//! Artifact settings, defaults and TOML/JSON persistence.
//!
//! A config file describes one or more *artifacts* (differently styled
//! renderings of the same input) plus a `shared` block their settings fall
//! back to:
//!
//! ```toml
//! [shared]
//! color = "#f58b44"
//! mode = "rnd_avg"
//!
//! [[artifacts]]
//! name = "full"
//! configuration = { steps = 64, step_width = 20, height = 200 }
//!
//! [[artifacts]]
//! name = "small"
//! configuration = { steps = 32, step_width = 8, height = 48, gap = 2, align = "bottom" }
//! ```
//!
//! Each setting resolves as artifact value → shared value → built-in default.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use super::AppPaths;
use crate::render::SvgOptions;
use crate::waveform::{Alignment, LayoutConfig, ReductionMode, WaveformError};

/// Name given to the single artifact rendered when a config lists none.
pub const DEFAULT_ARTIFACT: &str = "default";

// ---------------------------------------------------------------------------
// ArtifactSettings
// ---------------------------------------------------------------------------

/// Partially specified rendering settings.  `None` means "inherit".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step_width: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gap: Option<f32>,
    /// Corner radius.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rounded: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// `avg`, `rnd_avg` or `max`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    /// `bottom` or `center`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align: Option<String>,
    #[serde(alias = "sr", skip_serializing_if = "Option::is_none")]
    pub sample_rate: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mono: Option<bool>,
    /// Decimal digits kept by `rnd_avg`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precision: Option<u32>,
    #[serde(alias = "preserveAspectRatio", skip_serializing_if = "Option::is_none")]
    pub preserve_aspect_ratio: Option<String>,
    /// Indented SVG output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pretty: Option<bool>,
}

impl ArtifactSettings {
    /// Field-wise `self.or(base)`: values set here win, gaps are filled from
    /// `base`.
    pub fn overlay(&self, base: &ArtifactSettings) -> ArtifactSettings {
        ArtifactSettings {
            steps: self.steps.or(base.steps),
            step_width: self.step_width.or(base.step_width),
            height: self.height.or(base.height),
            gap: self.gap.or(base.gap),
            rounded: self.rounded.or(base.rounded),
            color: self.color.clone().or_else(|| base.color.clone()),
            mode: self.mode.clone().or_else(|| base.mode.clone()),
            align: self.align.clone().or_else(|| base.align.clone()),
            sample_rate: self.sample_rate.or(base.sample_rate),
            mono: self.mono.or(base.mono),
            precision: self.precision.or(base.precision),
            preserve_aspect_ratio: self
                .preserve_aspect_ratio
                .clone()
                .or_else(|| base.preserve_aspect_ratio.clone()),
            pretty: self.pretty.or(base.pretty),
        }
    }

    /// Fill every gap from `shared`, then from the built-in defaults, and
    /// validate the result.
    ///
    /// An unknown `mode` or an out-of-range layout value is an error.  A
    /// missing or unknown `align` falls back to center with a warning.
    pub fn resolve(
        &self,
        shared: &ArtifactSettings,
    ) -> Result<(LayoutConfig, SvgOptions), WaveformError> {
        let merged = self.overlay(shared);
        let defaults = LayoutConfig::default();
        let svg_defaults = SvgOptions::default();

        let mode = match merged.mode.as_deref() {
            Some(token) => token.parse::<ReductionMode>()?,
            None => defaults.mode,
        };
        let align = Alignment::parse_lossy(merged.align.as_deref());

        let layout = LayoutConfig {
            steps: merged.steps.unwrap_or(defaults.steps),
            step_width: merged.step_width.unwrap_or(defaults.step_width),
            height: merged.height.unwrap_or(defaults.height),
            gap: merged.gap.unwrap_or(defaults.gap),
            rounded: merged.rounded.unwrap_or(defaults.rounded),
            color: merged.color.unwrap_or(defaults.color),
            mode,
            precision: merged.precision.unwrap_or(defaults.precision),
            align,
            sample_rate: merged.sample_rate.unwrap_or(defaults.sample_rate),
            mono: merged.mono.unwrap_or(defaults.mono),
        };
        layout.validate()?;

        let svg = SvgOptions {
            preserve_aspect_ratio: merged
                .preserve_aspect_ratio
                .unwrap_or(svg_defaults.preserve_aspect_ratio),
            pretty: merged.pretty.unwrap_or(svg_defaults.pretty),
        };

        Ok((layout, svg))
    }
}

// ---------------------------------------------------------------------------
// Artifact
// ---------------------------------------------------------------------------

/// One named rendering of the input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    /// Used in output file names; must be unique within a config.
    pub name: String,
    #[serde(default)]
    pub configuration: ArtifactSettings,
}

/// An artifact with every setting filled in and validated.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedArtifact {
    pub name: String,
    pub layout: LayoutConfig,
    pub svg: SvgOptions,
}

// ---------------------------------------------------------------------------
// WavemanConfig (top-level)
// ---------------------------------------------------------------------------

/// Top-level configuration file.
///
/// # Persistence
///
/// ```rust,no_run
/// use waveman::config::WavemanConfig;
///
/// // Load (returns Default when the file is missing)
/// let config = WavemanConfig::load().unwrap();
/// let artifacts = config.resolve_all().unwrap();
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WavemanConfig {
    /// Fallback values for every artifact.
    pub shared: ArtifactSettings,
    pub artifacts: Vec<Artifact>,
}

impl WavemanConfig {
    /// Load the platform-default `config.toml`.
    ///
    /// Returns `Ok(WavemanConfig::default())` when the file does not exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().config_file)
    }

    /// Load from an explicit path.  `.json` files are parsed as JSON,
    /// everything else as TOML.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::warn!("No config at {}; using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Invalid JSON config {}", path.display()))?
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Invalid TOML config {}", path.display()))?
        };
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save to the platform-default `config.toml`.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().config_file)
    }

    /// Save to an explicit path, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config {}", path.display()))?;
        Ok(())
    }

    /// Resolve every artifact against `shared`.  With no artifacts listed, a
    /// single [`DEFAULT_ARTIFACT`] built from `shared` alone is returned.
    pub fn resolve_all(&self) -> Result<Vec<ResolvedArtifact>> {
        if self.artifacts.is_empty() {
            let (layout, svg) = ArtifactSettings::default()
                .resolve(&self.shared)
                .context("Invalid shared settings")?;
            return Ok(vec![ResolvedArtifact {
                name: DEFAULT_ARTIFACT.into(),
                layout,
                svg,
            }]);
        }

        let mut seen = HashSet::new();
        self.artifacts
            .iter()
            .map(|artifact| -> Result<ResolvedArtifact> {
                let name = artifact.name.as_str();
                if name.is_empty() || name.contains(['/', '\\']) || name.starts_with('.') {
                    bail!("Invalid artifact name {name:?}");
                }
                if !seen.insert(name) {
                    bail!("Duplicate artifact name {name:?}");
                }
                let (layout, svg) = artifact
                    .configuration
                    .resolve(&self.shared)
                    .with_context(|| format!("Invalid settings for artifact {name:?}"))?;
                Ok(ResolvedArtifact {
                    name: name.to_string(),
                    layout,
                    svg,
                })
            })
            .collect()
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_config() -> WavemanConfig {
        WavemanConfig {
            shared: ArtifactSettings {
                color: Some("#112233".into()),
                mode: Some("max".into()),
                height: Some(120.0),
                ..Default::default()
            },
            artifacts: vec![
                Artifact {
                    name: "full".into(),
                    configuration: ArtifactSettings {
                        steps: Some(100),
                        step_width: Some(12.0),
                        gap: Some(2.0),
                        ..Default::default()
                    },
                },
                Artifact {
                    name: "small".into(),
                    configuration: ArtifactSettings {
                        steps: Some(16),
                        step_width: Some(4.0),
                        gap: Some(1.0),
                        height: Some(24.0),
                        align: Some("bottom".into()),
                        ..Default::default()
                    },
                },
            ],
        }
    }

    #[test]
    fn builtin_defaults() {
        let (layout, svg) = ArtifactSettings::default()
            .resolve(&ArtifactSettings::default())
            .unwrap();
        assert_eq!(layout.steps, 64);
        assert_eq!(layout.step_width, 20.0);
        assert_eq!(layout.height, 200.0);
        assert_eq!(layout.gap, 10.0);
        assert_eq!(layout.rounded, 10.0);
        assert_eq!(layout.color, "#f58b44");
        assert_eq!(layout.mode, ReductionMode::RoundedAverage);
        assert_eq!(layout.precision, 3);
        assert_eq!(layout.align, Alignment::Center);
        assert_eq!(layout.sample_rate, 48_000);
        assert!(layout.mono);
        assert_eq!(svg.preserve_aspect_ratio, "none");
        assert!(!svg.pretty);
    }

    #[test]
    fn artifact_overrides_shared_overrides_default() {
        let resolved = sample_config().resolve_all().unwrap();
        assert_eq!(resolved.len(), 2);

        let full = &resolved[0];
        assert_eq!(full.name, "full");
        assert_eq!(full.layout.steps, 100);
        assert_eq!(full.layout.height, 120.0); // shared
        assert_eq!(full.layout.color, "#112233"); // shared
        assert_eq!(full.layout.mode, ReductionMode::Max); // shared
        assert_eq!(full.layout.rounded, 10.0); // default
        assert_eq!(full.layout.align, Alignment::Center); // default

        let small = &resolved[1];
        assert_eq!(small.layout.height, 24.0);
        assert_eq!(small.layout.align, Alignment::Bottom);
    }

    #[test]
    fn unknown_mode_is_an_error() {
        let settings = ArtifactSettings {
            mode: Some("loudest".into()),
            ..Default::default()
        };
        assert_eq!(
            settings.resolve(&ArtifactSettings::default()).unwrap_err(),
            WaveformError::UnknownMode("loudest".into())
        );
    }

    #[test]
    fn unknown_align_falls_back_to_center() {
        let settings = ArtifactSettings {
            align: Some("diagonal".into()),
            ..Default::default()
        };
        let (layout, _) = settings.resolve(&ArtifactSettings::default()).unwrap();
        assert_eq!(layout.align, Alignment::Center);
    }

    #[test]
    fn missing_align_resolves_to_center() {
        let shared = ArtifactSettings {
            align: None,
            ..Default::default()
        };
        let (layout, _) = ArtifactSettings::default().resolve(&shared).unwrap();
        assert_eq!(layout.align, Alignment::Center);
    }

    #[test]
    fn oversized_precision_is_rejected_at_resolve() {
        let settings = ArtifactSettings {
            precision: Some(400),
            ..Default::default()
        };
        let err = settings.resolve(&ArtifactSettings::default()).unwrap_err();
        assert!(matches!(err, WaveformError::InvalidLayout(_)), "{err}");
    }

    #[test]
    fn invalid_artifact_error_keeps_its_cause() {
        let mut config = sample_config();
        config.artifacts[1].configuration.steps = Some(0);
        let err = config.resolve_all().unwrap_err();
        assert!(err.to_string().contains("small"), "{err:#}");
        assert_eq!(
            err.downcast_ref::<WaveformError>(),
            Some(&WaveformError::InvalidSteps(0))
        );
    }

    #[test]
    fn duplicate_and_unsafe_names_rejected() {
        let mut config = sample_config();
        config.artifacts[1].name = "full".into();
        assert!(config.resolve_all().is_err());

        config.artifacts[1].name = "../escape".into();
        assert!(config.resolve_all().is_err());
    }

    #[test]
    fn empty_config_yields_default_artifact() {
        let resolved = WavemanConfig::default().resolve_all().unwrap();
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].name, DEFAULT_ARTIFACT);
        assert_eq!(resolved[0].layout, LayoutConfig::default());
    }

    #[test]
    fn round_trip_toml() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nested").join("config.toml");

        let original = sample_config();
        original.save_to(&path).expect("save");
        let loaded = WavemanConfig::load_from(&path).expect("load");

        assert_eq!(original, loaded);
    }

    #[test]
    fn round_trip_json() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("config.json");

        let original = sample_config();
        original.save_to(&path).expect("save");
        let loaded = WavemanConfig::load_from(&path).expect("load");

        assert_eq!(original, loaded);
    }

    #[test]
    fn reads_json_artifact_layout() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r##"{
                "shared": { "sr": 44100, "preserveAspectRatio": "xMidYMid meet", "color": "#000" },
                "artifacts": [
                    { "name": "cover", "configuration": { "steps": 32, "mode": "rounded_avg" } }
                ]
            }"##,
        )
        .unwrap();

        let resolved = WavemanConfig::load_from(&path).unwrap().resolve_all().unwrap();
        assert_eq!(resolved[0].name, "cover");
        assert_eq!(resolved[0].layout.sample_rate, 44_100);
        assert_eq!(resolved[0].layout.steps, 32);
        assert_eq!(resolved[0].layout.mode, ReductionMode::RoundedAverage);
        assert_eq!(resolved[0].svg.preserve_aspect_ratio, "xMidYMid meet");
    }

    #[test]
    fn load_missing_returns_default() {
        let dir = tempdir().expect("temp dir");
        let config = WavemanConfig::load_from(&dir.path().join("nonexistent.toml"))
            .expect("should not error");
        assert_eq!(config, WavemanConfig::default());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "shared = [not valid").unwrap();
        assert!(WavemanConfig::load_from(&path).is_err());
    }
}
