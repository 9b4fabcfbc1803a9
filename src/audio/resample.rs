//! Resampling and channel mixing utilities.
//!
//! The decoder delivers audio at whatever rate the file was recorded at; the
//! waveform layout asks for a fixed rate (48 kHz by default).  This module
//! provides the two conversion steps:
//!
//! 1. [`downmix_interleaved`] / [`downmix_channels`]: average any number of
//!    channels down to mono, sample by sample.
//! 2. [`resample`]: linear-interpolation resampling between two rates.

// ---------------------------------------------------------------------------
// downmix
// ---------------------------------------------------------------------------

/// Average interleaved frames down to one channel.
///
/// A trailing partial frame is ignored.  `channels == 0` yields nothing and
/// `channels == 1` copies the input.
///
/// ```rust
/// use waveman::audio::downmix_interleaved;
///
/// // L R L R
/// assert_eq!(downmix_interleaved(&[1.0, -1.0, 0.5, 0.5], 2), vec![0.0, 0.5]);
/// ```
pub fn downmix_interleaved(samples: &[f32], channels: u16) -> Vec<f32> {
    let width = usize::from(channels);
    if width <= 1 {
        return if width == 1 { samples.to_vec() } else { Vec::new() };
    }
    let scale = 1.0 / width as f32;
    samples
        .chunks_exact(width)
        .map(|frame| frame.iter().copied().sum::<f32>() * scale)
        .collect()
}

/// Planar counterpart of [`downmix_interleaved`]: `out[i]` is the mean of
/// `channels[c][i]` over all `c`.  The output is as long as the shortest
/// channel.
pub fn downmix_channels(channels: &[Vec<f32>]) -> Vec<f32> {
    let Some(len) = channels.iter().map(Vec::len).min() else {
        return Vec::new();
    };
    let scale = 1.0 / channels.len() as f32;
    (0..len)
        .map(|i| channels.iter().map(|c| c[i]).sum::<f32>() * scale)
        .collect()
}

// ---------------------------------------------------------------------------
// resample
// ---------------------------------------------------------------------------

/// Convert `samples` from `source_rate` to `target_rate` by linear
/// interpolation between neighbouring input samples.
///
/// Equal rates copy the input.  Empty input or a zero rate yields nothing.
/// Otherwise the output holds `ceil(len * target_rate / source_rate)` samples.
///
/// ```rust
/// use waveman::audio::resample;
///
/// let lo = resample(&[0.5; 480], 48_000, 16_000);
/// assert_eq!(lo.len(), 160);
/// ```
pub fn resample(samples: &[f32], source_rate: u32, target_rate: u32) -> Vec<f32> {
    if source_rate == target_rate {
        return samples.to_vec();
    }
    let Some(&last) = samples.last() else {
        return Vec::new();
    };
    if source_rate == 0 || target_rate == 0 {
        return Vec::new();
    }

    // Input samples advanced per output sample.
    let step = f64::from(source_rate) / f64::from(target_rate);
    let out_len = (samples.len() as f64 / step).ceil() as usize;

    let output: Vec<f32> = (0..out_len)
        .map(|i| {
            let pos = i as f64 * step;
            let left = pos.floor() as usize;
            let t = (pos - left as f64) as f32;
            match (samples.get(left), samples.get(left + 1)) {
                (Some(&a), Some(&b)) => a + (b - a) * t,
                (Some(&a), None) => a,
                _ => last,
            }
        })
        .collect();

    log::debug!(
        "Resampled {} samples @ {source_rate} Hz to {} samples @ {target_rate} Hz",
        samples.len(),
        output.len()
    );
    output
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
