//! The drawing-surface facade.
//!
//! [`Surface`] wraps one backend and keeps the font configuration on the
//! Rust side. Every font mutation re-serialises the whole configuration into
//! the backend, so the native font string never lags behind the cache.

use crate::backend::RenderBackend;
use crate::error::Result;
use crate::model::{
    ClientPosition, FontConfig, Pixel, SurfaceConfig, TextAlign, TextBaseline, TextMode,
    compose_font, pixels_from_rgba, write_pixels,
};
use kurbo::Point;
use std::f64::consts::TAU;

/// A drawing surface plus its cached font state.
pub struct Surface<B: RenderBackend> {
    backend: B,
    font: FontConfig,
}

impl<B: RenderBackend> Surface<B> {
    /// Wrap an already-sized backend and apply the default paint and font
    /// settings from `config`.
    pub fn new(mut backend: B, config: &SurfaceConfig) -> Self {
        let fill = backend.paint_from_css(&config.fill);
        let stroke = backend.paint_from_css(&config.stroke);
        backend.set_fill_style(&fill);
        backend.set_stroke_style(&stroke);

        let mut surface = Self {
            backend,
            font: config.font.clone(),
        };
        surface.sync_font();
        log::debug!(
            "surface ready: {}x{}, font {:?}",
            surface.width(),
            surface.height(),
            surface.font_string()
        );
        surface
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    // ─── Dimensions ──────────────────────────────────────────────────────

    pub fn width(&self) -> u32 {
        self.backend.width()
    }

    /// Resize horizontally. The platform wipes the raster and paint state;
    /// the cached font is written back afterwards.
    pub fn set_width(&mut self, width: u32) {
        self.backend.set_width(width);
        self.sync_font();
    }

    pub fn height(&self) -> u32 {
        self.backend.height()
    }

    /// See [`Surface::set_width`].
    pub fn set_height(&mut self, height: u32) {
        self.backend.set_height(height);
        self.sync_font();
    }

    // ─── Paint styles ────────────────────────────────────────────────────

    pub fn fill(&self) -> B::Paint {
        self.backend.fill_style()
    }

    pub fn set_fill(&mut self, paint: &B::Paint) {
        self.backend.set_fill_style(paint);
    }

    pub fn stroke(&self) -> B::Paint {
        self.backend.stroke_style()
    }

    pub fn set_stroke(&mut self, paint: &B::Paint) {
        self.backend.set_stroke_style(paint);
    }

    // ─── Coordinates ─────────────────────────────────────────────────────

    /// Translate an event's viewport coordinates into surface-local ones.
    pub fn event_to_local(&self, event: &impl ClientPosition) -> Point {
        let origin = self.backend.client_origin();
        event.client_point() - origin.to_vec2()
    }

    // ─── Font ────────────────────────────────────────────────────────────

    pub fn font(&self) -> &FontConfig {
        &self.font
    }

    /// The composed font string last written to the backend.
    pub fn font_string(&self) -> String {
        compose_font(&self.font)
    }

    pub fn font_size(&self) -> f64 {
        self.font.size
    }

    pub fn set_font_size(&mut self, size: f64) {
        self.font.size = size;
        self.sync_font();
    }

    /// Font family name.
    pub fn font_style(&self) -> &str {
        &self.font.family
    }

    pub fn set_font_style(&mut self, family: impl Into<String>) {
        self.font.family = family.into();
        self.sync_font();
    }

    pub fn font_align(&self) -> TextAlign {
        self.font.align
    }

    pub fn set_font_align(&mut self, align: TextAlign) {
        self.font.align = align;
        self.sync_font();
    }

    /// Parse and apply an alignment name. Nothing changes on error.
    pub fn set_font_align_str(&mut self, align: &str) -> Result<()> {
        self.set_font_align(align.parse()?);
        Ok(())
    }

    pub fn font_baseline(&self) -> TextBaseline {
        self.font.baseline
    }

    pub fn set_font_baseline(&mut self, baseline: TextBaseline) {
        self.font.baseline = baseline;
        self.sync_font();
    }

    /// Parse and apply a baseline name. Nothing changes on error.
    pub fn set_font_baseline_str(&mut self, baseline: &str) -> Result<()> {
        self.set_font_baseline(baseline.parse()?);
        Ok(())
    }

    /// Write the cached font configuration into the backend.
    pub fn sync_font(&mut self) {
        let composed = compose_font(&self.font);
        log::debug!(
            "font sync: {composed:?} align={} baseline={}",
            self.font.align,
            self.font.baseline
        );
        self.backend.set_font(&composed);
        self.backend.set_text_align(self.font.align);
        self.backend.set_text_baseline(self.font.baseline);
    }

    // ─── Pixels ──────────────────────────────────────────────────────────

    /// Raw RGBA bytes for the full surface, row-major from the top-left.
    pub fn pixel_data(&self) -> Result<Vec<u8>> {
        self.backend.get_image_data(0, 0, self.width(), self.height())
    }

    /// The surface as one record per pixel.
    pub fn pixels(&self) -> Result<Vec<Pixel>> {
        Ok(pixels_from_rgba(&self.pixel_data()?))
    }

    /// Write `pixels` back in one full-surface replace.
    ///
    /// Records map to pixels in row-major order. A short buffer leaves the
    /// trailing pixels as they were; surplus records are ignored.
    pub fn set_pixels(&mut self, pixels: &[Pixel]) -> Result<()> {
        let (w, h) = (self.width(), self.height());
        let expected = w as usize * h as usize;
        if pixels.len() != expected {
            log::warn!(
                "set_pixels: got {} records for a {w}x{h} surface ({expected} pixels)",
                pixels.len()
            );
        }
        let mut data = self.backend.get_image_data(0, 0, w, h)?;
        write_pixels(&mut data, pixels);
        self.backend.put_image_data(&data, 0, 0, w, h)
    }

    // ─── Drawing primitives ──────────────────────────────────────────────

    /// Fill and stroke an axis-aligned ellipse centred at (`x`, `y`).
    /// A missing, zero or NaN `ry` means a circle of radius `rx`.
    pub fn ellipse(&mut self, x: f64, y: f64, rx: f64, ry: Option<f64>) -> Result<()> {
        let ry = ry.filter(|r| *r != 0.0 && !r.is_nan()).unwrap_or(rx);
        log::trace!("ellipse ({x}, {y}) r=({rx}, {ry})");
        self.backend.begin_path();
        self.backend.ellipse(x, y, rx, ry, 0.0, 0.0, TAU)?;
        self.backend.close_path();
        self.backend.fill();
        self.backend.stroke();
        Ok(())
    }

    /// Fill and stroke a rectangle with its top-left at (`x`, `y`).
    pub fn rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        log::trace!("rect ({x}, {y}) {w}x{h}");
        self.backend.begin_path();
        self.backend.rect(x, y, w, h);
        self.backend.close_path();
        self.backend.fill();
        self.backend.stroke();
    }

    /// Stroke a single segment.
    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        log::trace!("line ({x1}, {y1}) -> ({x2}, {y2})");
        self.backend.begin_path();
        self.backend.move_to(x1, y1);
        self.backend.line_to(x2, y2);
        self.backend.close_path();
        self.backend.stroke();
    }

    /// Draw `text` anchored at (`x`, `y`) using the current alignment and
    /// baseline.
    pub fn text(&mut self, text: &str, x: f64, y: f64, mode: TextMode) -> Result<()> {
        log::trace!("text {text:?} at ({x}, {y}) mode={}", mode.as_str());
        match mode {
            TextMode::Fill => self.backend.fill_text(text, x, y),
            TextMode::Stroke => self.backend.stroke_text(text, x, y),
            TextMode::Both => {
                self.backend.fill_text(text, x, y)?;
                self.backend.stroke_text(text, x, y)
            }
            TextMode::StrokeThenFill => {
                self.backend.stroke_text(text, x, y)?;
                self.backend.fill_text(text, x, y)
            }
        }
    }

    /// [`Surface::text`] with the mode given by name
    /// (`"fill"`, `"stroke"`, `"both"`, `"-both"`).
    pub fn text_str(&mut self, text: &str, x: f64, y: f64, mode: &str) -> Result<()> {
        self.text(text, x, y, mode.parse()?)
    }
}
