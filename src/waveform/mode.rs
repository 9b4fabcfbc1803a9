//! Window reduction modes.
//!
//! | Variant          | Config token            | Window value                      |
//! |------------------|-------------------------|-----------------------------------|
//! | `Average`        | `avg`                   | mean of `|sample|`                |
//! | `RoundedAverage` | `rnd_avg`/`rounded_avg` | mean of `|sample|`, rounded       |
//! | `Max`            | `max`                   | largest `|sample|`                |

use std::fmt;
use std::str::FromStr;

use super::reducer::max_magnitude;
use super::WaveformError;

/// Decimal digits kept by [`ReductionMode::RoundedAverage`] unless configured.
pub const DEFAULT_PRECISION: u32 = 3;

/// Largest accepted precision.  `f32` carries about seven significant digits,
/// so more would only feed overflow into the rounding factor.
pub const MAX_PRECISION: u32 = 9;

// ---------------------------------------------------------------------------
// ReductionMode
// ---------------------------------------------------------------------------

/// Scalar summary applied to every window.  The set is closed: parsing an
/// unknown token is an error, never a fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReductionMode {
    Average,
    #[default]
    RoundedAverage,
    Max,
}

impl ReductionMode {
    /// Reduce one window.  `precision` is only consulted by
    /// [`RoundedAverage`](Self::RoundedAverage).
    ///
    /// The caller guarantees `window` is non-empty.  A NaN sample makes the
    /// result NaN in every mode.
    pub fn apply(self, window: &[f32], precision: u32) -> f32 {
        match self {
            Self::Average => mean_abs(window),
            Self::RoundedAverage => round_to(mean_abs(window), precision),
            Self::Max => max_magnitude(window.iter().copied()),
        }
    }

    /// The canonical config token.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Average => "avg",
            Self::RoundedAverage => "rnd_avg",
            Self::Max => "max",
        }
    }
}

impl FromStr for ReductionMode {
    type Err = WaveformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "avg" | "average" => Ok(Self::Average),
            "rnd_avg" | "rounded_avg" => Ok(Self::RoundedAverage),
            "max" => Ok(Self::Max),
            _ => Err(WaveformError::UnknownMode(s.to_string())),
        }
    }
}

impl fmt::Display for ReductionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn mean_abs(window: &[f32]) -> f32 {
    // f64 accumulator keeps long windows from drifting.
    let sum: f64 = window.iter().map(|s| f64::from(s.abs())).sum();
    (sum / window.len() as f64) as f32
}

/// Round half away from zero to `digits` decimal places, capped at
/// [`MAX_PRECISION`].
fn round_to(value: f32, digits: u32) -> f32 {
    let exp = i32::try_from(digits.min(MAX_PRECISION)).unwrap_or(0);
    let factor = 10_f64.powi(exp);
    ((f64::from(value) * factor).round() / factor) as f32
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
