//! Mapping a normalized value to one bar rectangle.
//!
//! ```text
//!   Bottom                      Center
//!   ┌──────────────┐            ┌──────────────┐
//!   │       █      │            │       █      │
//!   │    █  █      │            │ █  █  █  █   │  ← midline
//!   │ █  █  █  █   │            │       █      │
//!   └──────────────┘ ← baseline └──────────────┘
//! ```

use std::fmt;

use super::LayoutConfig;

// ---------------------------------------------------------------------------
// BarGeometry
// ---------------------------------------------------------------------------

/// One rectangle of the waveform, in canvas units with the origin at the
/// top-left corner and `y` growing downwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarGeometry {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

// ---------------------------------------------------------------------------
// Alignment
// ---------------------------------------------------------------------------

/// Vertical anchoring of the bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    /// Bars grow upwards from the bottom edge.
    Bottom,
    /// Bars grow symmetrically around `height / 2`.
    #[default]
    Center,
}

impl Alignment {
    /// Parse an alignment token.
    ///
    /// Unknown or missing values are tolerated: a warning is logged and
    /// [`Alignment::Center`] is returned.
    pub fn parse_lossy(token: Option<&str>) -> Self {
        match token.map(|t| t.trim().to_ascii_lowercase()) {
            Some(t) if t == "bottom" => Self::Bottom,
            Some(t) if t == "center" || t == "centre" => Self::Center,
            Some(t) => {
                log::warn!("Unsupported alignment {t:?}; using 'center'");
                Self::Center
            }
            None => {
                log::warn!("Missing alignment; using 'center'");
                Self::Center
            }
        }
    }

    /// The canonical config token.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bottom => "bottom",
            Self::Center => "center",
        }
    }

    /// Rectangle for the `index`-th bar with normalized `value`.
    ///
    /// `value` is expected in `[0, 1]`.  It is not clamped: out-of-range input
    /// yields bars that leave the canvas, which makes upstream bugs visible.
    pub fn bar(self, value: f32, index: usize, layout: &LayoutConfig) -> BarGeometry {
        let x = index as f32 * layout.step_width;
        let height = value * layout.height;
        let y = match self {
            Self::Bottom => (1.0 - value) * layout.height,
            Self::Center => 0.5 * layout.height - 0.5 * height,
        };
        BarGeometry {
            x,
            y,
            width: layout.bar_width(),
            height,
        }
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
