//! Windowed sample reduction.
//!
//! The signal is cut into `steps` windows of `delta = len / steps` samples.
//! Window `j` covers `[j * delta, (j + 1) * delta)`; the trailing
//! `len - steps * delta` samples are dropped, never folded into the last
//! window.

use crate::audio::Signal;

use super::{LayoutConfig, ReductionMode, WaveformError, MAX_PRECISION};

// ---------------------------------------------------------------------------
// ReducedBuffer
// ---------------------------------------------------------------------------

/// One scalar per window, in temporal order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReducedBuffer(Vec<f32>);

impl ReducedBuffer {
    pub fn values(&self) -> &[f32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Largest absolute value; `0.0` for an empty buffer.  NaN propagates so
    /// the normalizer can reject it.
    pub fn max_abs(&self) -> f32 {
        max_magnitude(self.0.iter().copied())
    }

    pub fn into_inner(self) -> Vec<f32> {
        self.0
    }
}

impl From<Vec<f32>> for ReducedBuffer {
    fn from(values: Vec<f32>) -> Self {
        Self(values)
    }
}

/// Largest `|v|` of `values`, or NaN as soon as one value is NaN
/// (`f32::max` would silently skip it).
pub(crate) fn max_magnitude(values: impl IntoIterator<Item = f32>) -> f32 {
    values.into_iter().fold(0.0_f32, |acc, v| {
        if acc.is_nan() || v.is_nan() {
            f32::NAN
        } else {
            acc.max(v.abs())
        }
    })
}

// ---------------------------------------------------------------------------
// WindowReducer
// ---------------------------------------------------------------------------

/// Reduces a signal to exactly `steps` scalars.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowReducer {
    steps: usize,
    mode: ReductionMode,
    precision: u32,
}

impl WindowReducer {
    /// Fails with [`WaveformError::InvalidSteps`] when `steps == 0`.
    pub fn new(steps: usize, mode: ReductionMode, precision: u32) -> Result<Self, WaveformError> {
        if steps < 1 {
            return Err(WaveformError::InvalidSteps(steps));
        }
        if precision > MAX_PRECISION {
            return Err(WaveformError::InvalidLayout(format!(
                "precision must be at most {MAX_PRECISION} digits (got {precision})"
            )));
        }
        Ok(Self {
            steps,
            mode,
            precision,
        })
    }

    pub fn from_layout(layout: &LayoutConfig) -> Result<Self, WaveformError> {
        Self::new(layout.steps, layout.mode, layout.precision)
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn mode(&self) -> ReductionMode {
        self.mode
    }

    /// Window length for a signal of `samples` samples.
    pub fn window_len(&self, samples: usize) -> Result<usize, WaveformError> {
        let delta = samples / self.steps;
        if delta < 1 {
            return Err(WaveformError::NotEnoughSamples {
                samples,
                steps: self.steps,
            });
        }
        Ok(delta)
    }

    /// Reduce a signal.  Multi-channel signals are first mixed to mono by
    /// per-sample averaging; a single channel is used as is.
    pub fn reduce(&self, signal: &Signal) -> Result<ReducedBuffer, WaveformError> {
        let mono = signal.to_mono();
        self.reduce_samples(&mono)
    }

    /// Reduce one channel of samples.
    pub fn reduce_samples(&self, samples: &[f32]) -> Result<ReducedBuffer, WaveformError> {
        let delta = self.window_len(samples.len())?;
        let used = self.steps * delta;
        log::debug!(
            "Reducing {} samples into {} windows of {} ({} mode, {} trailing samples dropped)",
            samples.len(),
            self.steps,
            delta,
            self.mode,
            samples.len() - used
        );

        let values = samples[..used]
            .chunks_exact(delta)
            .map(|window| self.mode.apply(window, self.precision))
            .collect();

        Ok(ReducedBuffer(values))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn reducer(steps: usize, mode: ReductionMode) -> WindowReducer {
        WindowReducer::new(steps, mode, 3).unwrap()
    }

    #[test]
    fn precision_above_limit_is_rejected() {
        assert!(WindowReducer::new(4, ReductionMode::RoundedAverage, MAX_PRECISION).is_ok());
        assert!(matches!(
            WindowReducer::new(4, ReductionMode::RoundedAverage, MAX_PRECISION + 1),
            Err(WaveformError::InvalidLayout(_))
        ));
    }

    #[test]
    fn worked_example_max_mode() {
        let samples = [0.0_f32, 1.0, -1.0, 0.0, 0.5, -0.5, 0.0, 1.0];
        let out = reducer(4, ReductionMode::Max).reduce_samples(&samples).unwrap();
        assert_eq!(out.values(), &[1.0, 1.0, 0.5, 1.0]);
    }

    #[test]
    fn output_length_matches_steps() {
        let samples: Vec<f32> = (0..1_003).map(|i| (i as f32 * 0.01).sin()).collect();
        for steps in [1, 2, 7, 64, 1_003] {
            let out = reducer(steps, ReductionMode::Average)
                .reduce_samples(&samples)
                .unwrap();
            assert_eq!(out.len(), steps);
        }
    }

    #[test]
    fn trailing_remainder_is_dropped() {
        // delta = 2; the final 9.0 must not leak into the last window.
        let samples = [0.1_f32, 0.1, 0.2, 0.2, 9.0];
        let out = reducer(2, ReductionMode::Max).reduce_samples(&samples).unwrap();
        assert_eq!(out.values(), &[0.1, 0.2]);
    }

    #[test]
    fn zero_steps_rejected() {
        assert_eq!(
            WindowReducer::new(0, ReductionMode::Max, 3),
            Err(WaveformError::InvalidSteps(0))
        );
    }

    #[test]
    fn fewer_samples_than_steps_rejected() {
        let err = reducer(10, ReductionMode::Max)
            .reduce_samples(&[0.5; 9])
            .unwrap_err();
        assert_eq!(
            err,
            WaveformError::NotEnoughSamples {
                samples: 9,
                steps: 10
            }
        );
    }

    #[test]
    fn stereo_signal_is_downmixed_before_reduction() {
        // Frames (1, -1) and (0.5, 0.5) mix to [0.0, 0.5]; averaging the
        // per-channel magnitudes instead would give 0.75.
        let signal = Signal::new(vec![vec![1.0, 0.5], vec![-1.0, 0.5]], 48_000).unwrap();
        let out = reducer(1, ReductionMode::Average).reduce(&signal).unwrap();
        assert!((out.values()[0] - 0.25).abs() < 1e-6, "{:?}", out);
    }

    #[test]
    fn reduction_is_deterministic() {
        let samples: Vec<f32> = (0..4_096).map(|i| ((i * 37) % 101) as f32 / 100.0 - 0.5).collect();
        let r = reducer(32, ReductionMode::RoundedAverage);
        assert_eq!(
            r.reduce_samples(&samples).unwrap(),
            r.reduce_samples(&samples).unwrap()
        );
    }

    #[test]
    fn max_abs_of_buffer() {
        let buf = ReducedBuffer::from(vec![0.2, -0.7, 0.5]);
        assert_eq!(buf.max_abs(), 0.7);
        assert_eq!(ReducedBuffer::default().max_abs(), 0.0);
        assert!(ReducedBuffer::from(vec![0.2, f32::NAN]).max_abs().is_nan());
    }
}
