//! Configuration module.
//!
//! Provides [`WavemanConfig`] (shared settings plus named artifacts),
//! [`AppPaths`] for the platform config directory, and TOML / JSON
//! persistence via `WavemanConfig::load_from` / `WavemanConfig::save_to`.

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{Artifact, ArtifactSettings, ResolvedArtifact, WavemanConfig, DEFAULT_ARTIFACT};
