//! Artifact pipeline: one input file, many rendered outputs.
//!
//! # Architecture
//!
//! ```text
//! WavemanConfig ── resolve_all() ──▶ Vec<ResolvedArtifact>
//!                                          │
//!                                          ▼
//! input.wav ──▶ ArtifactRunner::run() ──▶ Vec<RenderedArtifact>
//!                                          │
//!                                          ▼
//!                        ArtifactRunner::write_all(base) ──▶ *.svg
//! ```

pub mod runner;

pub use runner::{ArtifactRunner, RenderedArtifact};
