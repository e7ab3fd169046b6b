//! Value types shared by the facade and its backends.
//!
//! Font options that the native context only exposes as strings are modelled
//! as closed enums here; parsing from strings is total and reports the full
//! set of valid options on failure.

use crate::error::{C2dError, Result};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ─── Text alignment ──────────────────────────────────────────────────────

/// Horizontal anchor for text drawn at a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Right,
    #[default]
    Center,
    Start,
    End,
}

const TEXT_ALIGN_OPTIONS: &str = r#""left", "right", "center", "start", or "end""#;

impl TextAlign {
    pub const ALL: [TextAlign; 5] = [Self::Left, Self::Right, Self::Center, Self::Start, Self::End];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Center => "center",
            Self::Start => "start",
            Self::End => "end",
        }
    }
}

impl FromStr for TextAlign {
    type Err = C2dError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| C2dError::invalid("text align option", s, TEXT_ALIGN_OPTIONS))
    }
}

impl fmt::Display for TextAlign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Text baseline ───────────────────────────────────────────────────────

/// Vertical anchor for text drawn at a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextBaseline {
    Top,
    Hanging,
    #[default]
    Middle,
    Alphabetic,
    Ideographic,
    Bottom,
}

const TEXT_BASELINE_OPTIONS: &str =
    r#""top", "hanging", "middle", "alphabetic", "ideographic", or "bottom""#;

impl TextBaseline {
    pub const ALL: [TextBaseline; 6] = [
        Self::Top,
        Self::Hanging,
        Self::Middle,
        Self::Alphabetic,
        Self::Ideographic,
        Self::Bottom,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Hanging => "hanging",
            Self::Middle => "middle",
            Self::Alphabetic => "alphabetic",
            Self::Ideographic => "ideographic",
            Self::Bottom => "bottom",
        }
    }
}

impl FromStr for TextBaseline {
    type Err = C2dError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|b| b.as_str() == s)
            .ok_or_else(|| C2dError::invalid("font baseline option", s, TEXT_BASELINE_OPTIONS))
    }
}

impl fmt::Display for TextBaseline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Text render mode ────────────────────────────────────────────────────

/// Which paint operations `text` issues, and in what order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextMode {
    #[default]
    Fill,
    Stroke,
    /// Fill, then stroke on top.
    Both,
    /// Stroke, then fill on top. Written `"-both"`.
    StrokeThenFill,
}

const TEXT_MODE_OPTIONS: &str = r#"'stroke', 'fill', 'both', or '-both'"#;

impl TextMode {
    pub const ALL: [TextMode; 4] = [Self::Fill, Self::Stroke, Self::Both, Self::StrokeThenFill];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fill => "fill",
            Self::Stroke => "stroke",
            Self::Both => "both",
            Self::StrokeThenFill => "-both",
        }
    }
}

impl FromStr for TextMode {
    type Err = C2dError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| C2dError::invalid("text style", s, TEXT_MODE_OPTIONS))
    }
}

// ─── Font configuration ──────────────────────────────────────────────────

/// Font settings cached beside the native context, which only exposes
/// size and family as one composed string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontConfig {
    /// Pixel size.
    pub size: f64,
    /// Family name, e.g. `serif` or `"Fira Code", monospace`.
    pub family: String,
    pub align: TextAlign,
    pub baseline: TextBaseline,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            size: 48.0,
            family: "serif".to_string(),
            align: TextAlign::Center,
            baseline: TextBaseline::Middle,
        }
    }
}

/// Compose the CSS font shorthand for `font`.
pub fn compose_font(font: &FontConfig) -> String {
    format!("{}px {}", font.size, font.family)
}

// ─── Surface configuration ───────────────────────────────────────────────

/// Creation-time settings for a surface.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceConfig {
    /// Pixel width; `None` means the viewport's inner width.
    pub width: Option<u32>,
    /// Pixel height; `None` means the viewport's inner height.
    pub height: Option<u32>,
    pub fill: String,
    pub stroke: String,
    pub font: FontConfig,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            fill: "#fff".to_string(),
            stroke: "#000".to_string(),
            font: FontConfig::default(),
        }
    }
}

impl SurfaceConfig {
    pub fn with_size(width: Option<u32>, height: Option<u32>) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Resolve missing dimensions against the viewport size. Zero counts
    /// as missing.
    pub fn resolve_size(&self, viewport: (u32, u32)) -> (u32, u32) {
        let pick = |v: Option<u32>, fallback| v.filter(|&v| v != 0).unwrap_or(fallback);
        (pick(self.width, viewport.0), pick(self.height, viewport.1))
    }
}

// ─── Pixels ──────────────────────────────────────────────────────────────

/// One RGBA pixel record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Pixel {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Group a channel-interleaved RGBA buffer into pixel records.
/// A trailing partial group is dropped.
pub fn pixels_from_rgba(data: &[u8]) -> Vec<Pixel> {
    data.chunks_exact(4)
        .map(|c| Pixel::new(c[0], c[1], c[2], c[3]))
        .collect()
}

/// Overwrite `data` record by record. Returns how many pixels were written.
pub fn write_pixels(data: &mut [u8], pixels: &[Pixel]) -> usize {
    let mut written = 0;
    for (chunk, p) in data.chunks_exact_mut(4).zip(pixels) {
        chunk.copy_from_slice(&[p.r, p.g, p.b, p.a]);
        written += 1;
    }
    written
}

// ─── Pointer input ───────────────────────────────────────────────────────

/// Anything carrying viewport ("client") coordinates, such as a pointer event.
pub trait ClientPosition {
    fn client_x(&self) -> f64;
    fn client_y(&self) -> f64;

    fn client_point(&self) -> Point {
        Point::new(self.client_x(), self.client_y())
    }
}

impl ClientPosition for Point {
    fn client_x(&self) -> f64 {
        self.x
    }

    fn client_y(&self) -> f64 {
        self.y
    }
}

impl ClientPosition for (f64, f64) {
    fn client_x(&self) -> f64 {
        self.0
    }

    fn client_y(&self) -> f64 {
        self.1
    }
}
