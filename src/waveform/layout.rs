//! Immutable layout snapshot passed into the pipeline.

use super::{Alignment, ReductionMode, WaveformError, DEFAULT_PRECISION, MAX_PRECISION};

// ---------------------------------------------------------------------------
// LayoutConfig
// ---------------------------------------------------------------------------

/// Everything that shapes one waveform: how the signal is reduced and how the
/// reduced values become bars.
///
/// Built once per run (usually from [`crate::config::ArtifactSettings`]) and
/// never mutated while the pipeline runs.  Call [`validate`](Self::validate)
/// before handing it to [`WaveformBuilder`](super::WaveformBuilder); the
/// builder does so itself.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Number of bars (windows) in the output.
    pub steps: usize,
    /// Horizontal distance between the left edges of two neighbouring bars.
    pub step_width: f32,
    /// Canvas height.
    pub height: f32,
    /// Horizontal space left empty to the right of each bar.
    pub gap: f32,
    /// Corner radius for the renderer; not used by the geometry itself.
    pub rounded: f32,
    /// Fill colour token, passed to the renderer untouched.
    pub color: String,
    pub mode: ReductionMode,
    /// Decimal digits kept by [`ReductionMode::RoundedAverage`].
    pub precision: u32,
    pub align: Alignment,
    /// Rate the decoder should deliver samples at, in Hz.
    pub sample_rate: u32,
    /// Ask the decoder for a single downmixed channel.
    pub mono: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            steps: 64,
            step_width: 20.0,
            height: 200.0,
            gap: 10.0,
            rounded: 10.0,
            color: "#f58b44".into(),
            mode: ReductionMode::default(),
            precision: DEFAULT_PRECISION,
            align: Alignment::default(),
            sample_rate: 48_000,
            mono: true,
        }
    }
}

impl LayoutConfig {
    /// Check every field against its allowed range.
    ///
    /// Returns the first problem found.  Step count is checked first so a
    /// zero-step layout reports [`WaveformError::InvalidSteps`].
    ///
    /// The gap must be strictly smaller than the step width: a zero-width bar
    /// draws nothing, so that layout is rejected up front instead of yielding
    /// an empty picture.
    pub fn validate(&self) -> Result<(), WaveformError> {
        if self.steps < 1 {
            return Err(WaveformError::InvalidSteps(self.steps));
        }
        if !(self.step_width.is_finite() && self.step_width > 0.0) {
            return Err(WaveformError::InvalidLayout(format!(
                "step width must be positive (got {})",
                self.step_width
            )));
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(WaveformError::InvalidLayout(format!(
                "height must be positive (got {})",
                self.height
            )));
        }
        if !(self.gap.is_finite() && self.gap >= 0.0) {
            return Err(WaveformError::InvalidLayout(format!(
                "gap must not be negative (got {})",
                self.gap
            )));
        }
        if self.gap >= self.step_width {
            return Err(WaveformError::InvalidLayout(format!(
                "gap ({}) must be smaller than step width ({})",
                self.gap, self.step_width
            )));
        }
        if !(self.rounded.is_finite() && self.rounded >= 0.0) {
            return Err(WaveformError::InvalidLayout(format!(
                "corner radius must not be negative (got {})",
                self.rounded
            )));
        }
        if self.precision > MAX_PRECISION {
            return Err(WaveformError::InvalidLayout(format!(
                "precision must be at most {MAX_PRECISION} digits (got {})",
                self.precision
            )));
        }
        if self.sample_rate == 0 {
            return Err(WaveformError::InvalidLayout(
                "sample rate must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Width of a single drawn bar (`step_width - gap`).
    pub fn bar_width(&self) -> f32 {
        self.step_width - self.gap
    }

    /// Canvas `(width, height)` = `(steps * step_width, height)`.
    pub fn canvas_size(&self) -> (f32, f32) {
        (self.steps as f32 * self.step_width, self.height)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
