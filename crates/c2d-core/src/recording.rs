//! In-memory backend.
//!
//! Keeps an RGBA raster that only `put_image_data` writes to, the paint and
//! text state a browser context would report, and a log of every path and
//! paint call. Path geometry is recorded as `kurbo` shapes rather than
//! rasterised.

use crate::backend::RenderBackend;
use crate::color::Color;
use crate::error::{C2dError, Result};
use crate::model::{TextAlign, TextBaseline};
use kurbo::{Ellipse, Line, Point, Rect};

const DEFAULT_PAINT: &str = "#000000";
const DEFAULT_FONT: &str = "10px sans-serif";

/// One recorded context call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    BeginPath,
    ClosePath,
    MoveTo(Point),
    LineTo(Point),
    Rect(Rect),
    Ellipse { shape: Ellipse, sweep: (f64, f64) },
    Fill,
    Stroke,
    FillText { text: String, at: Point },
    StrokeText { text: String, at: Point },
}

/// Backend that records instead of drawing.
#[derive(Debug, Clone)]
pub struct RecordingBackend {
    width: u32,
    height: u32,
    data: Vec<u8>,
    fill: String,
    stroke: String,
    font: String,
    align: TextAlign,
    baseline: TextBaseline,
    origin: Point,
    ops: Vec<DrawOp>,
}

impl RecordingBackend {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; raster_len(width, height)],
            fill: DEFAULT_PAINT.to_string(),
            stroke: DEFAULT_PAINT.to_string(),
            font: DEFAULT_FONT.to_string(),
            align: TextAlign::Start,
            baseline: TextBaseline::Alphabetic,
            origin: Point::ZERO,
            ops: Vec::new(),
        }
    }

    /// Place the surface's top-left corner at `origin` in viewport space.
    pub fn with_origin(mut self, origin: impl Into<Point>) -> Self {
        self.origin = origin.into();
        self
    }

    pub fn font(&self) -> &str {
        &self.font
    }

    pub fn text_align(&self) -> TextAlign {
        self.align
    }

    pub fn text_baseline(&self) -> TextBaseline {
        self.baseline
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    fn reset(&mut self) {
        self.data = vec![0; raster_len(self.width, self.height)];
        self.fill = DEFAULT_PAINT.to_string();
        self.stroke = DEFAULT_PAINT.to_string();
        self.font = DEFAULT_FONT.to_string();
        self.align = TextAlign::Start;
        self.baseline = TextBaseline::Alphabetic;
        self.ops.clear();
    }

    fn check_region(&self, x: u32, y: u32, w: u32, h: u32) -> Result<()> {
        let fits = x.checked_add(w).is_some_and(|r| r <= self.width)
            && y.checked_add(h).is_some_and(|b| b <= self.height);
        if fits {
            Ok(())
        } else {
            Err(C2dError::Backend(format!(
                "region {w}x{h}+{x}+{y} outside {}x{} surface",
                self.width, self.height
            )))
        }
    }
}

fn raster_len(width: u32, height: u32) -> usize {
    width as usize * height as usize * 4
}

/// Browsers ignore paint values they cannot parse.
fn normalise_paint(current: &mut String, value: &str) {
    match Color::parse_css(value) {
        Some(c) => *current = c.to_css(),
        None => log::debug!("ignoring unparseable paint {value:?}"),
    }
}

impl RenderBackend for RecordingBackend {
    type Paint = String;

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn set_width(&mut self, width: u32) {
        self.width = width;
        self.reset();
    }

    fn set_height(&mut self, height: u32) {
        self.height = height;
        self.reset();
    }

    fn fill_style(&self) -> String {
        self.fill.clone()
    }

    fn set_fill_style(&mut self, paint: &String) {
        normalise_paint(&mut self.fill, paint);
    }

    fn stroke_style(&self) -> String {
        self.stroke.clone()
    }

    fn set_stroke_style(&mut self, paint: &String) {
        normalise_paint(&mut self.stroke, paint);
    }

    fn paint_from_css(&self, css: &str) -> String {
        css.to_string()
    }

    fn set_font(&mut self, font: &str) {
        self.font = font.to_string();
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.align = align;
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.baseline = baseline;
    }

    fn client_origin(&self) -> Point {
        self.origin
    }

    fn get_image_data(&self, x: u32, y: u32, w: u32, h: u32) -> Result<Vec<u8>> {
        self.check_region(x, y, w, h)?;
        let stride = self.width as usize * 4;
        let mut out = Vec::with_capacity(raster_len(w, h));
        for row in y as usize..(y + h) as usize {
            let start = row * stride + x as usize * 4;
            out.extend_from_slice(&self.data[start..start + w as usize * 4]);
        }
        Ok(out)
    }

    fn put_image_data(&mut self, data: &[u8], x: u32, y: u32, w: u32, h: u32) -> Result<()> {
        self.check_region(x, y, w, h)?;
        if data.len() != raster_len(w, h) {
            return Err(C2dError::Backend(format!(
                "image data holds {} bytes, {w}x{h} needs {}",
                data.len(),
                raster_len(w, h)
            )));
        }
        let stride = self.width as usize * 4;
        let row_len = w as usize * 4;
        for (i, src) in data.chunks_exact(row_len.max(1)).enumerate().take(h as usize) {
            let start = (y as usize + i) * stride + x as usize * 4;
            self.data[start..start + row_len].copy_from_slice(src);
        }
        Ok(())
    }

    fn begin_path(&mut self) {
        self.ops.push(DrawOp::BeginPath);
    }

    fn close_path(&mut self) {
        self.ops.push(DrawOp::ClosePath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.ops.push(DrawOp::MoveTo(Point::new(x, y)));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.ops.push(DrawOp::LineTo(Point::new(x, y)));
    }

    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.ops.push(DrawOp::Rect(Rect::new(x, y, x + w, y + h)));
    }

    fn ellipse(
        &mut self,
        x: f64,
        y: f64,
        rx: f64,
        ry: f64,
        rotation: f64,
        start_angle: f64,
        end_angle: f64,
    ) -> Result<()> {
        if rx < 0.0 || ry < 0.0 {
            return Err(C2dError::Backend(format!("negative ellipse radius ({rx}, {ry})")));
        }
        self.ops.push(DrawOp::Ellipse {
            shape: Ellipse::new((x, y), (rx, ry), rotation),
            sweep: (start_angle, end_angle),
        });
        Ok(())
    }

    fn fill(&mut self) {
        self.ops.push(DrawOp::Fill);
    }

    fn stroke(&mut self) {
        self.ops.push(DrawOp::Stroke);
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> Result<()> {
        self.ops.push(DrawOp::FillText {
            text: text.to_string(),
            at: Point::new(x, y),
        });
        Ok(())
    }

    fn stroke_text(&mut self, text: &str, x: f64, y: f64) -> Result<()> {
        self.ops.push(DrawOp::StrokeText {
            text: text.to_string(),
            at: Point::new(x, y),
        });
        Ok(())
    }
}

impl DrawOp {
    /// The first segment recorded as `MoveTo` followed by `LineTo`.
    pub fn segment(ops: &[DrawOp]) -> Option<Line> {
        ops.windows(2).find_map(|pair| match pair {
            [DrawOp::MoveTo(a), DrawOp::LineTo(b)] => Some(Line::new(*a, *b)),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn image_data_region_is_row_major() {
        let mut b = RecordingBackend::new(2, 2);
        let data: Vec<u8> = (0..16).collect();
        b.put_image_data(&data, 0, 0, 2, 2).unwrap();
        assert_eq!(b.get_image_data(1, 0, 1, 2).unwrap(), vec![4, 5, 6, 7, 12, 13, 14, 15]);
    }

    #[test]
    fn out_of_bounds_region_is_a_backend_error() {
        let b = RecordingBackend::new(2, 2);
        assert!(matches!(b.get_image_data(1, 1, 2, 2), Err(C2dError::Backend(_))));
    }

    #[test]
    fn invalid_paint_is_ignored() {
        let mut b = RecordingBackend::new(1, 1);
        b.set_fill_style(&"#abc".to_string());
        b.set_fill_style(&"not a colour".to_string());
        assert_eq!(b.fill_style(), "#aabbcc");
    }

    #[test]
    fn resize_clears_raster_and_state() {
        let mut b = RecordingBackend::new(1, 1);
        b.put_image_data(&[1, 2, 3, 4], 0, 0, 1, 1).unwrap();
        b.set_font("20px serif");
        b.begin_path();
        b.set_height(2);
        assert_eq!(b.get_image_data(0, 0, 1, 2).unwrap(), vec![0; 8]);
        assert_eq!(b.font(), DEFAULT_FONT);
        assert!(b.ops().is_empty());
    }

    #[test]
    fn segment_pairs_move_and_line() {
        let ops = [
            DrawOp::BeginPath,
            DrawOp::MoveTo(Point::new(1.0, 2.0)),
            DrawOp::LineTo(Point::new(3.0, 4.0)),
        ];
        assert_eq!(DrawOp::segment(&ops), Some(Line::new((1.0, 2.0), (3.0, 4.0))));
    }
}
