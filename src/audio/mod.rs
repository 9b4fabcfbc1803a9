//! Audio input: decoding → channel mixing → resampling → [`Signal`].
//!
//! # Pipeline
//!
//! ```text
//! WAV file / byte stream → WavDecoder (hound) → interleaved f32
//!           → Signal::from_interleaved → [into_mono] → resample(target_rate)
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use waveman::audio::{Decoder, WavDecoder};
//!
//! let decoder = WavDecoder::new(48_000, true);
//! let signal = decoder.decode(Path::new("input.wav")).unwrap();
//! println!("{} samples @ {} Hz", signal.len(), signal.sample_rate());
//! ```

pub mod decode;
pub mod resample;
pub mod signal;

pub use decode::{Decoder, WavDecoder};
pub use resample::{downmix_channels, downmix_interleaved, resample};
pub use signal::{AudioError, Signal};
