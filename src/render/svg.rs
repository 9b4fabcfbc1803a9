//! SVG markup output.

use std::fmt::Write;

use super::{RenderError, Renderer};
use crate::waveform::Waveform;

// ---------------------------------------------------------------------------
// SvgOptions
// ---------------------------------------------------------------------------

/// Document-level settings that do not affect bar geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgOptions {
    /// Value of the root `preserveAspectRatio` attribute, e.g. `none` or
    /// `xMidYMid meet`.
    pub preserve_aspect_ratio: String,
    /// One element per line with indentation instead of a single line.
    pub pretty: bool,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            preserve_aspect_ratio: "none".into(),
            pretty: false,
        }
    }
}

impl SvgOptions {
    /// Check `preserve_aspect_ratio` against the SVG grammar:
    /// `none` or `x{Min,Mid,Max}Y{Min,Mid,Max}`, optionally followed by
    /// `meet` or `slice`.
    pub fn validate(&self) -> Result<(), RenderError> {
        let mut parts = self.preserve_aspect_ratio.split_whitespace();
        let align_ok = match parts.next() {
            Some("none") => true,
            Some(align) => {
                let axis = ["Min", "Mid", "Max"];
                align
                    .strip_prefix('x')
                    .and_then(|rest| rest.get(..3).zip(rest.get(3..)))
                    .and_then(|(x, rest)| rest.strip_prefix('Y').map(|y| (x, y)))
                    .is_some_and(|(x, y)| axis.contains(&x) && axis.contains(&y))
            }
            None => false,
        };
        let tail_ok = match (parts.next(), parts.next()) {
            (None, _) => true,
            (Some("meet" | "slice"), None) => true,
            _ => false,
        };
        if align_ok && tail_ok {
            Ok(())
        } else {
            Err(RenderError::InvalidAspectRatio(
                self.preserve_aspect_ratio.clone(),
            ))
        }
    }
}

// ---------------------------------------------------------------------------
// SvgRenderer
// ---------------------------------------------------------------------------

/// Writes a [`Waveform`] as an SVG 1.2 Tiny document with one `<rect>` per
/// bar.  The `viewBox` equals the canvas, so the document scales to whatever
/// box it is placed in.
///
/// # Example
///
/// ```rust
/// use waveman::render::{Renderer, SvgRenderer};
/// use waveman::waveform::{BarGeometry, Waveform};
///
/// let waveform = Waveform {
///     bars: vec![BarGeometry { x: 0.0, y: 25.0, width: 9.0, height: 50.0 }],
///     width: 10.0,
///     height: 100.0,
///     corner_radius: 0.0,
///     color: "black".into(),
/// };
/// let svg = SvgRenderer::default().render(&waveform).unwrap();
/// assert!(svg.contains(r#"viewBox="0 0 10 100""#));
/// assert!(svg.contains(r#"<rect x="0" y="25" width="9" height="50""#));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SvgRenderer {
    pub options: SvgOptions,
}

impl SvgRenderer {
    pub fn new(options: SvgOptions) -> Self {
        Self { options }
    }
}

impl Renderer for SvgRenderer {
    fn render(&self, waveform: &Waveform) -> Result<String, RenderError> {
        self.options.validate()?;

        let (newline, indent) = if self.options.pretty {
            ("\n", "  ")
        } else {
            ("", "")
        };
        let fill = escape_attr(&waveform.color);
        let r = waveform.corner_radius;

        // ~110 bytes per rect.
        let mut out = String::with_capacity(256 + waveform.bars.len() * 110);
        write!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" version="1.2" baseProfile="tiny" width="100%" height="100%" viewBox="0 0 {} {}" preserveAspectRatio="{}">{newline}"#,
            waveform.width,
            waveform.height,
            escape_attr(&self.options.preserve_aspect_ratio),
        )?;
        for bar in &waveform.bars {
            write!(
                out,
                r#"{indent}<rect x="{}" y="{}" width="{}" height="{}" rx="{r}" ry="{r}" fill="{fill}"/>{newline}"#,
                bar.x, bar.y, bar.width, bar.height,
            )?;
        }
        write!(out, "</svg>{newline}")?;

        log::debug!(
            "Rendered {} bars into {} bytes of SVG",
            waveform.bars.len(),
            out.len()
        );
        Ok(out)
    }

    fn extension(&self) -> &'static str {
        "svg"
    }
}

/// Escape the characters that may not appear verbatim in a double-quoted
/// XML attribute.
fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
