//! Decoded, in-memory audio signal.

use std::borrow::Cow;

use thiserror::Error;

use super::resample::downmix_channels;

// ---------------------------------------------------------------------------
// AudioError
// ---------------------------------------------------------------------------

/// Failure while building or decoding a [`Signal`].
#[derive(Debug, Error)]
pub enum AudioError {
    /// The signal would contain no samples.
    #[error("audio signal is empty")]
    Empty,

    /// A signal needs at least one channel.
    #[error("audio signal has no channels")]
    ZeroChannels,

    /// All channels of a signal must have the same length.
    #[error("channel {channel} has {got} samples, expected {expected}")]
    ChannelLengthMismatch {
        channel: usize,
        expected: usize,
        got: usize,
    },

    /// Interleaved data does not divide evenly into frames.
    #[error("{samples} interleaved samples do not form whole {channels}-channel frames")]
    PartialFrame { samples: usize, channels: u16 },

    #[error("sample rate must be positive")]
    ZeroSampleRate,

    /// The container or sample data could not be decoded.
    #[error("could not decode audio: {0}")]
    Decode(#[from] hound::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// Signal
// ---------------------------------------------------------------------------

/// Planar `f32` samples for one or more channels at a fixed sample rate.
///
/// Invariants: at least one channel, every channel equally long, at least one
/// sample per channel, non-zero sample rate.  A `Signal` is never mutated
/// after construction.
///
/// # Example
///
/// ```rust
/// use waveman::audio::Signal;
///
/// // L R L R
/// let signal = Signal::from_interleaved(&[1.0, -1.0, 0.5, 0.5], 2, 44_100).unwrap();
/// assert_eq!(signal.channel_count(), 2);
/// assert_eq!(&*signal.to_mono(), &[0.0_f32, 0.5]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    channels: Vec<Vec<f32>>,
    sample_rate: u32,
}

impl Signal {
    /// Build a signal from planar channel data.
    pub fn new(channels: Vec<Vec<f32>>, sample_rate: u32) -> Result<Self, AudioError> {
        if sample_rate == 0 {
            return Err(AudioError::ZeroSampleRate);
        }
        let expected = match channels.first() {
            None => return Err(AudioError::ZeroChannels),
            Some(first) if first.is_empty() => return Err(AudioError::Empty),
            Some(first) => first.len(),
        };
        if let Some((channel, got)) = channels
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|&(_, len)| len != expected)
        {
            return Err(AudioError::ChannelLengthMismatch {
                channel,
                expected,
                got,
            });
        }
        Ok(Self {
            channels,
            sample_rate,
        })
    }

    /// Single-channel signal.
    pub fn mono(samples: Vec<f32>, sample_rate: u32) -> Result<Self, AudioError> {
        Self::new(vec![samples], sample_rate)
    }

    /// Split interleaved frames (`L R L R …`) into planar channels.
    pub fn from_interleaved(
        samples: &[f32],
        channels: u16,
        sample_rate: u32,
    ) -> Result<Self, AudioError> {
        if channels == 0 {
            return Err(AudioError::ZeroChannels);
        }
        let n = channels as usize;
        if samples.len() % n != 0 {
            return Err(AudioError::PartialFrame {
                samples: samples.len(),
                channels,
            });
        }
        let frames = samples.len() / n;
        let mut planar = vec![Vec::with_capacity(frames); n];
        for frame in samples.chunks_exact(n) {
            for (channel, &sample) in planar.iter_mut().zip(frame) {
                channel.push(sample);
            }
        }
        Self::new(planar, sample_rate)
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Samples per channel.
    pub fn len(&self) -> usize {
        self.channels[0].len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn duration_secs(&self) -> f32 {
        self.len() as f32 / self.sample_rate as f32
    }

    pub fn channel(&self, index: usize) -> Option<&[f32]> {
        self.channels.get(index).map(Vec::as_slice)
    }

    pub fn channels(&self) -> impl Iterator<Item = &[f32]> + '_ {
        self.channels.iter().map(Vec::as_slice)
    }

    /// Per-sample average of all channels.  Borrows when the signal is
    /// already mono.
    pub fn to_mono(&self) -> Cow<'_, [f32]> {
        match self.channels.as_slice() {
            [only] => Cow::Borrowed(only.as_slice()),
            many => Cow::Owned(downmix_channels(many)),
        }
    }

    /// Consume the signal, returning a single-channel version of it.
    pub fn into_mono(self) -> Self {
        if self.channels.len() == 1 {
            return self;
        }
        let mono = downmix_channels(&self.channels);
        Self {
            channels: vec![mono],
            sample_rate: self.sample_rate,
        }
    }

    /// Consume the signal, returning its planar channel data.
    pub fn into_channels(self) -> Vec<Vec<f32>> {
        self.channels
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
