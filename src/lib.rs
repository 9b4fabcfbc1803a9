//! Waveform visualizer: audio samples → reduced bars → SVG.
//!
//! - [`audio`] decodes WAV files into a [`audio::Signal`].
//! - [`waveform`] reduces, normalizes and lays out bars.
//! - [`render`] writes bar geometry as SVG.
//! - [`config`] and [`pipeline`] drive several artifacts from one input.

pub mod audio;
pub mod config;
pub mod pipeline;
pub mod render;
pub mod waveform;
