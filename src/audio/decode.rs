//! Turning audio files into a [`Signal`].
//!
//! [`Decoder`] is the seam between the waveform core and whatever produces
//! samples.  [`WavDecoder`] is the built-in implementation for RIFF/WAVE
//! files; other container formats are expected to be transcoded to WAV
//! before they reach this crate.

use std::io::Read;
use std::path::Path;

use hound::{SampleFormat, WavReader};

use super::resample::resample;
use super::{AudioError, Signal};
use crate::waveform::LayoutConfig;

// ---------------------------------------------------------------------------
// Decoder trait
// ---------------------------------------------------------------------------

/// Produces a [`Signal`] from a file on disk.
///
/// Implementations must be `Send + Sync` so a runner can share one decoder
/// between worker threads.
pub trait Decoder: Send + Sync {
    fn decode(&self, path: &Path) -> Result<Signal, AudioError>;
}

// ---------------------------------------------------------------------------
// WavDecoder
// ---------------------------------------------------------------------------

/// WAV decoder backed by `hound`.
///
/// Integer PCM is scaled into `[-1.0, 1.0)` by `2^(bits - 1)`; float PCM is
/// used as stored.  The result is optionally downmixed to mono and then
/// resampled to `target_rate`.
///
/// # Example
///
/// ```rust,no_run
/// use std::path::Path;
/// use waveman::audio::{Decoder, WavDecoder};
///
/// let decoder = WavDecoder::new(48_000, true);
/// let signal = decoder.decode(Path::new("song.wav")).unwrap();
/// assert_eq!(signal.channel_count(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavDecoder {
    /// Output sample rate in Hz.
    pub target_rate: u32,
    /// Downmix all channels into one.
    pub mono: bool,
}

impl Default for WavDecoder {
    fn default() -> Self {
        Self {
            target_rate: 48_000,
            mono: true,
        }
    }
}

impl WavDecoder {
    pub fn new(target_rate: u32, mono: bool) -> Self {
        Self { target_rate, mono }
    }

    /// Decoder matching a layout's `sample_rate` and `mono` settings.
    pub fn from_layout(layout: &LayoutConfig) -> Self {
        Self::new(layout.sample_rate, layout.mono)
    }

    /// Decode WAV data from any byte stream.
    pub fn decode_reader<R: Read>(&self, reader: R) -> Result<Signal, AudioError> {
        self.decode_wav(WavReader::new(reader)?)
    }

    fn decode_wav<R: Read>(&self, reader: WavReader<R>) -> Result<Signal, AudioError> {
        if self.target_rate == 0 {
            return Err(AudioError::ZeroSampleRate);
        }

        let spec = reader.spec();
        let interleaved: Vec<f32> = match spec.sample_format {
            SampleFormat::Int => {
                let scale = (1_i64 << (spec.bits_per_sample.saturating_sub(1))) as f32;
                reader
                    .into_samples::<i32>()
                    .map(|s| s.map(|v| v as f32 / scale))
                    .collect::<Result<_, _>>()?
            }
            SampleFormat::Float => reader.into_samples::<f32>().collect::<Result<_, _>>()?,
        };

        let mut signal = Signal::from_interleaved(&interleaved, spec.channels, spec.sample_rate)?;
        log::info!(
            "Decoded WAV: {} Hz, {} ch, {}-bit {:?}, {:.2} s",
            spec.sample_rate,
            spec.channels,
            spec.bits_per_sample,
            spec.sample_format,
            signal.duration_secs()
        );

        if self.mono {
            signal = signal.into_mono();
        }

        if signal.sample_rate() != self.target_rate {
            let source_rate = signal.sample_rate();
            let channels = signal
                .into_channels()
                .iter()
                .map(|c| resample(c, source_rate, self.target_rate))
                .collect();
            signal = Signal::new(channels, self.target_rate)?;
        }

        Ok(signal)
    }
}

impl Decoder for WavDecoder {
    fn decode(&self, path: &Path) -> Result<Signal, AudioError> {
        log::debug!("Opening {}", path.display());
        self.decode_wav(WavReader::open(path)?)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use hound::{WavSpec, WavWriter};
    use std::io::Cursor;
    use tempfile::tempdir;

    fn int_spec(channels: u16, sample_rate: u32) -> WavSpec {
        WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        }
    }

    fn wav_bytes(spec: WavSpec, samples: &[i16]) -> Vec<u8> {
        let mut buf = Vec::new();
        {
            let mut writer = WavWriter::new(Cursor::new(&mut buf), spec).unwrap();
            for &s in samples {
                writer.write_sample(s).unwrap();
            }
            writer.finalize().unwrap();
        }
        buf
    }

    #[test]
    fn decodes_16_bit_mono_file() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("mono.wav");
        let mut writer = WavWriter::create(&path, int_spec(1, 8_000)).unwrap();
        for s in [0_i16, 16_384, -16_384, 8_192] {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();

        let signal = WavDecoder::new(8_000, true).decode(&path).unwrap();
        assert_eq!(signal.sample_rate(), 8_000);
        assert_eq!(signal.channel(0), Some(&[0.0_f32, 0.5, -0.5, 0.25][..]));
    }

    #[test]
    fn stereo_is_downmixed_when_mono_requested() {
        let bytes = wav_bytes(int_spec(2, 8_000), &[16_384, -16_384, 16_384, 16_384]);
        let signal = WavDecoder::new(8_000, true)
            .decode_reader(Cursor::new(bytes))
            .unwrap();
        assert_eq!(signal.channel_count(), 1);
        assert_eq!(signal.channel(0), Some(&[0.0_f32, 0.5][..]));
    }

    #[test]
    fn stereo_is_kept_when_mono_not_requested() {
        let bytes = wav_bytes(int_spec(2, 8_000), &[16_384, -16_384, 16_384, 16_384]);
        let signal = WavDecoder::new(8_000, false)
            .decode_reader(Cursor::new(bytes))
            .unwrap();
        assert_eq!(signal.channel_count(), 2);
        assert_eq!(signal.channel(1), Some(&[-0.5_f32, 0.5][..]));
    }

    #[test]
    fn float_samples_pass_through_and_get_resampled() {
        let spec = WavSpec {
            channels: 1,
            sample_rate: 24_000,
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        };
        let mut buf = Vec::new();
        {
            let mut writer = WavWriter::new(Cursor::new(&mut buf), spec).unwrap();
            for _ in 0..240 {
                writer.write_sample(0.25_f32).unwrap();
            }
            writer.finalize().unwrap();
        }

        let signal = WavDecoder::new(48_000, true)
            .decode_reader(Cursor::new(buf))
            .unwrap();
        assert_eq!(signal.sample_rate(), 48_000);
        assert_eq!(signal.len(), 480);
        assert!(signal.channels().flatten().all(|&s| (s - 0.25).abs() < 1e-6));
    }

    #[test]
    fn garbage_bytes_are_a_decode_error() {
        let err = WavDecoder::default()
            .decode_reader(Cursor::new(b"definitely not a wav file".to_vec()))
            .unwrap_err();
        assert!(matches!(err, AudioError::Decode(_)), "{err}");
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempdir().expect("temp dir");
        let result = WavDecoder::default().decode(&dir.path().join("absent.wav"));
        assert!(result.is_err());
    }

    #[test]
    fn empty_wav_is_rejected() {
        let bytes = wav_bytes(int_spec(1, 8_000), &[]);
        let err = WavDecoder::new(8_000, true)
            .decode_reader(Cursor::new(bytes))
            .unwrap_err();
        assert!(matches!(err, AudioError::Empty), "{err}");
    }
}
