//! Orchestration: reduce → normalize → align.
//!
//! Each stage runs to completion before the next one starts.  The normalizer
//! needs the global maximum, and the alignment step assumes normalized input.

use crate::audio::Signal;

use super::normalize::normalize_by;
use super::reducer::max_magnitude;
use super::{
    normalize, BarGeometry, LayoutConfig, NormalizedBuffer, ReducedBuffer, WaveformError,
    WindowReducer,
};

// ---------------------------------------------------------------------------
// Waveform
// ---------------------------------------------------------------------------

/// The pipeline's output: bars in temporal order plus what a renderer needs
/// to draw them.
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    /// `bars[i]` belongs to window `i`.
    pub bars: Vec<BarGeometry>,
    /// Canvas width, `steps * step_width`.
    pub width: f32,
    /// Canvas height.
    pub height: f32,
    /// Corner radius, copied from the layout.
    pub corner_radius: f32,
    /// Fill colour token, copied from the layout.
    pub color: String,
}

impl Waveform {
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}

// ---------------------------------------------------------------------------
// WaveformBuilder
// ---------------------------------------------------------------------------

/// Runs the waveform pipeline for one validated [`LayoutConfig`].
///
/// A builder holds no mutable state; one instance may render any number of
/// signals, and separate instances share nothing.
///
/// # Example
///
/// ```rust
/// use waveman::audio::Signal;
/// use waveman::waveform::{Alignment, LayoutConfig, ReductionMode, WaveformBuilder};
///
/// let signal = Signal::mono(vec![0.0, 1.0, -1.0, 0.0, 0.5, -0.5, 0.0, 1.0], 48_000).unwrap();
/// let layout = LayoutConfig {
///     steps: 4,
///     step_width: 10.0,
///     height: 100.0,
///     gap: 1.0,
///     mode: ReductionMode::Max,
///     align: Alignment::Bottom,
///     ..Default::default()
/// };
///
/// let waveform = WaveformBuilder::new(layout).unwrap().render(&signal).unwrap();
/// assert_eq!(waveform.bars.len(), 4);
/// assert_eq!((waveform.bars[2].x, waveform.bars[2].y), (20.0, 50.0));
/// ```
#[derive(Debug, Clone)]
pub struct WaveformBuilder {
    layout: LayoutConfig,
    reducer: WindowReducer,
}

impl WaveformBuilder {
    /// Validate `layout` and prepare the reducer.  All configuration errors
    /// surface here, before any sample is touched.
    pub fn new(layout: LayoutConfig) -> Result<Self, WaveformError> {
        layout.validate()?;
        let reducer = WindowReducer::from_layout(&layout)?;
        Ok(Self { layout, reducer })
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Render a signal (downmixed to mono when it has several channels).
    pub fn render(&self, signal: &Signal) -> Result<Waveform, WaveformError> {
        let reduced = self.reducer.reduce(signal)?;
        let normalized = normalize(&reduced)?;
        Ok(self.draw(&normalized))
    }

    /// Render every channel of `signal` separately, without downmixing.
    ///
    /// All channels are scaled by the loudest window across the whole
    /// signal, so a quiet channel stays visibly quieter than a loud one.
    pub fn render_channels(&self, signal: &Signal) -> Result<Vec<Waveform>, WaveformError> {
        let reduced = signal
            .channels()
            .map(|channel| self.reducer.reduce_samples(channel))
            .collect::<Result<Vec<_>, _>>()?;

        let global_max = max_magnitude(reduced.iter().map(ReducedBuffer::max_abs));
        log::debug!(
            "Rendering {} channels separately (shared max {global_max})",
            reduced.len()
        );

        reduced
            .iter()
            .map(|r| normalize_by(r, global_max).map(|n| self.draw(&n)))
            .collect()
    }

    /// Map normalized values to bars.
    pub fn draw(&self, normalized: &NormalizedBuffer) -> Waveform {
        let align = self.layout.align;
        let bars = normalized
            .iter()
            .enumerate()
            .map(|(i, v)| align.bar(v, i, &self.layout))
            .collect();
        let (width, height) = self.layout.canvas_size();
        Waveform {
            bars,
            width,
            height,
            corner_radius: self.layout.rounded,
            color: self.layout.color.clone(),
        }
    }
}

/// One-shot convenience: validate `layout`, then render `signal`.
pub fn render(signal: &Signal, layout: &LayoutConfig) -> Result<Waveform, WaveformError> {
    WaveformBuilder::new(layout.clone())?.render(signal)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
