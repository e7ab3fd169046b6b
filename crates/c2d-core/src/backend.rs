//! The native operations a [`Surface`](crate::Surface) forwards to.

use crate::error::Result;
use crate::model::{TextAlign, TextBaseline};
use kurbo::Point;

/// An immediate-mode 2D drawing surface and its rendering context.
///
/// Methods mirror the browser's `CanvasRenderingContext2d` one-to-one.
/// Implementations forward without validating; fallible calls report the
/// platform's own failure.
pub trait RenderBackend {
    /// Paint value accepted by fill/stroke styles (colour string, gradient,
    /// pattern, ...).
    type Paint;

    fn width(&self) -> u32;
    fn height(&self) -> u32;
    /// Resize the surface. Clears the raster and resets paint and text state
    /// to platform defaults.
    fn set_width(&mut self, width: u32);
    /// See [`RenderBackend::set_width`].
    fn set_height(&mut self, height: u32);

    fn fill_style(&self) -> Self::Paint;
    fn set_fill_style(&mut self, paint: &Self::Paint);
    fn stroke_style(&self) -> Self::Paint;
    fn set_stroke_style(&mut self, paint: &Self::Paint);

    /// Paint value for a CSS colour string.
    fn paint_from_css(&self, css: &str) -> Self::Paint;

    fn set_font(&mut self, font: &str);
    fn set_text_align(&mut self, align: TextAlign);
    fn set_text_baseline(&mut self, baseline: TextBaseline);

    /// Top-left corner of the surface in viewport coordinates.
    fn client_origin(&self) -> Point;

    /// RGBA bytes of the `w` × `h` region at (`x`, `y`).
    fn get_image_data(&self, x: u32, y: u32, w: u32, h: u32) -> Result<Vec<u8>>;
    /// Replace the `w` × `h` region at (`x`, `y`) with `data`.
    fn put_image_data(&mut self, data: &[u8], x: u32, y: u32, w: u32, h: u32) -> Result<()>;

    fn begin_path(&mut self);
    fn close_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    #[allow(clippy::too_many_arguments)]
    fn ellipse(
        &mut self,
        x: f64,
        y: f64,
        rx: f64,
        ry: f64,
        rotation: f64,
        start_angle: f64,
        end_angle: f64,
    ) -> Result<()>;
    fn fill(&mut self);
    fn stroke(&mut self);
    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> Result<()>;
    fn stroke_text(&mut self, text: &str, x: f64, y: f64) -> Result<()>;
}
