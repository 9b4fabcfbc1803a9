//! Errors raised by the waveform core.

use thiserror::Error;

// ---------------------------------------------------------------------------
// WaveformError
// ---------------------------------------------------------------------------

/// Reason a waveform could not be produced.
///
/// Configuration variants are detected before any reduction work starts;
/// arithmetic variants are raised by the normalizer.  Neither is retried.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum WaveformError {
    /// `steps` must be at least one.
    #[error("step count must be at least 1 (got {0})")]
    InvalidSteps(usize),

    /// The signal is shorter than the requested number of windows, so the
    /// window length would be zero.
    #[error("signal has {samples} samples, fewer than the {steps} requested steps")]
    NotEnoughSamples { samples: usize, steps: usize },

    /// The reduction mode string is not one of `avg`, `rnd_avg` or `max`.
    #[error("unknown reduction mode {0:?} (expected \"avg\", \"rnd_avg\" or \"max\")")]
    UnknownMode(String),

    /// A geometric layout field is out of range.
    #[error("invalid layout: {0}")]
    InvalidLayout(String),

    /// Every reduced window is zero, so there is no maximum to scale by.
    #[error("cannot normalize a silent signal (all reduced values are zero)")]
    SilentSignal,

    /// The reduced buffer contains NaN or an infinite value.
    #[error("cannot normalize: reduced buffer contains a non-finite value ({0})")]
    NonFinite(f32),
}

impl WaveformError {
    /// `true` for errors caused by the caller's configuration rather than by
    /// the content of the signal.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::InvalidSteps(_)
                | Self::NotEnoughSamples { .. }
                | Self::UnknownMode(_)
                | Self::InvalidLayout(_)
        )
    }
}
