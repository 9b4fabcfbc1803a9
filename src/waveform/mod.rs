//! Waveform core: window reduction → normalization → bar geometry.
//!
//! # Pipeline
//!
//! ```text
//! Signal ──▶ WindowReducer ──▶ ReducedBuffer ──▶ normalize ──▶ NormalizedBuffer
//!                                                                   │
//!                      Waveform { bars, width, height } ◀── Alignment::bar (per value)
//! ```
//!
//! Every stage is a pure function of its input and the [`LayoutConfig`];
//! nothing here performs I/O or keeps state between runs.
//!
//! # Quick Start
//!
//! ```rust
//! use waveman::audio::Signal;
//! use waveman::waveform::{render, LayoutConfig};
//!
//! let samples: Vec<f32> = (0..48_000).map(|i| (i as f32 * 0.01).sin()).collect();
//! let signal = Signal::mono(samples, 48_000).unwrap();
//!
//! let waveform = render(&signal, &LayoutConfig::default()).unwrap();
//! assert_eq!(waveform.bars.len(), 64);
//! assert_eq!(waveform.width, 64.0 * 20.0);
//! ```

pub mod align;
pub mod builder;
pub mod error;
pub mod layout;
pub mod mode;
pub mod normalize;
pub mod reducer;

pub use align::{Alignment, BarGeometry};
pub use builder::{render, Waveform, WaveformBuilder};
pub use error::WaveformError;
pub use layout::LayoutConfig;
pub use mode::{ReductionMode, DEFAULT_PRECISION, MAX_PRECISION};
pub use normalize::{normalize, NormalizedBuffer};
pub use reducer::{ReducedBuffer, WindowReducer};
