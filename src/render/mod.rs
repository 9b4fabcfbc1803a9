//! Output renderers: [`Waveform`] → document bytes.
//!
//! [`Renderer`] is the seam for output formats.  [`SvgRenderer`] is the only
//! built-in implementation; rasterizing the SVG is left to external tools.

pub mod svg;

pub use svg::{SvgOptions, SvgRenderer};

use thiserror::Error;

use crate::waveform::Waveform;

// ---------------------------------------------------------------------------
// RenderError
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RenderError {
    /// `preserveAspectRatio` is not a value SVG accepts.
    #[error("invalid preserveAspectRatio value {0:?}")]
    InvalidAspectRatio(String),

    #[error("failed to format output: {0}")]
    Format(#[from] std::fmt::Error),
}

// ---------------------------------------------------------------------------
// Renderer trait
// ---------------------------------------------------------------------------

/// Turns finished bar geometry into a textual document.
pub trait Renderer: Send + Sync {
    fn render(&self, waveform: &Waveform) -> Result<String, RenderError>;

    /// File extension (without the dot) for documents this renderer writes.
    fn extension(&self) -> &'static str;
}
