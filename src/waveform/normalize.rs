//! Global normalization of a reduced buffer.

use super::{ReducedBuffer, WaveformError};

// ---------------------------------------------------------------------------
// NormalizedBuffer
// ---------------------------------------------------------------------------

/// A reduced buffer divided by a non-zero, finite reference maximum.
///
/// [`normalize`] uses the buffer's own maximum, so its peak is exactly `1.0`.
/// Per-channel rendering divides every channel by the loudest one instead,
/// which leaves quieter channels peaking below `1.0`.  Values stay in
/// `[0, 1]` either way.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedBuffer(Vec<f32>);

impl NormalizedBuffer {
    pub fn values(&self) -> &[f32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        self.0.iter().copied()
    }
}

impl From<NormalizedBuffer> for ReducedBuffer {
    fn from(buf: NormalizedBuffer) -> Self {
        ReducedBuffer::from(buf.0)
    }
}

// ---------------------------------------------------------------------------
// normalize
// ---------------------------------------------------------------------------

/// Divide every value by the buffer's largest absolute value.
///
/// # Errors
///
/// * [`WaveformError::SilentSignal`] when that maximum is zero (this includes
///   an empty buffer).
/// * [`WaveformError::NonFinite`] when the buffer holds NaN or infinity.
///
/// # Example
///
/// ```rust
/// use waveman::waveform::{normalize, ReducedBuffer};
///
/// let out = normalize(&ReducedBuffer::from(vec![0.25, 0.5, 0.125])).unwrap();
/// assert_eq!(out.values(), &[0.5, 1.0, 0.25]);
/// ```
pub fn normalize(reduced: &ReducedBuffer) -> Result<NormalizedBuffer, WaveformError> {
    normalize_by(reduced, reduced.max_abs())
}

/// Divide every value by an externally supplied maximum.  Used when several
/// buffers must share one scale.
pub(crate) fn normalize_by(
    reduced: &ReducedBuffer,
    max: f32,
) -> Result<NormalizedBuffer, WaveformError> {
    if !max.is_finite() {
        return Err(WaveformError::NonFinite(max));
    }
    if max == 0.0 {
        return Err(WaveformError::SilentSignal);
    }
    log::debug!("Normalizing {} values by {max}", reduced.len());
    Ok(NormalizedBuffer(
        reduced.values().iter().map(|v| v / max).collect(),
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn max_of(buf: &NormalizedBuffer) -> f32 {
        buf.iter().map(f32::abs).fold(0.0, f32::max)
    }

    #[test]
    fn scales_to_unit_maximum() {
        let out = normalize(&ReducedBuffer::from(vec![0.1, 0.4, 0.2])).unwrap();
        assert!((max_of(&out) - 1.0).abs() < 1e-6);
        assert!((out.values()[0] - 0.25).abs() < 1e-6);
        assert!((out.values()[2] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn already_normalized_buffer_is_unchanged() {
        let input = vec![1.0_f32, 1.0, 0.5, 1.0];
        let out = normalize(&ReducedBuffer::from(input.clone())).unwrap();
        assert_eq!(out.values(), input.as_slice());
    }

    #[test]
    fn normalization_is_idempotent() {
        let once = normalize(&ReducedBuffer::from(vec![0.3, 0.9, 0.45, 0.6])).unwrap();
        let twice = normalize(&ReducedBuffer::from(once.clone())).unwrap();
        assert!((max_of(&twice) - 1.0).abs() < 1e-6);
        for (a, b) in once.iter().zip(twice.iter()) {
            assert!((a - b).abs() < 1e-6, "{a} vs {b}");
        }
    }

    #[test]
    fn all_zero_buffer_is_an_error() {
        let err = normalize(&ReducedBuffer::from(vec![0.0; 8])).unwrap_err();
        assert_eq!(err, WaveformError::SilentSignal);
        assert!(!err.is_configuration());
    }

    #[test]
    fn empty_buffer_is_an_error() {
        assert_eq!(
            normalize(&ReducedBuffer::default()),
            Err(WaveformError::SilentSignal)
        );
    }

    #[test]
    fn non_finite_values_are_rejected() {
        let err = normalize(&ReducedBuffer::from(vec![0.5, f32::INFINITY])).unwrap_err();
        assert!(matches!(err, WaveformError::NonFinite(_)), "{err}");

        let err = normalize(&ReducedBuffer::from(vec![f32::NAN, 0.5])).unwrap_err();
        assert!(matches!(err, WaveformError::NonFinite(_)), "{err}");
    }
}
