//! `RenderBackend` over a DOM `<canvas>` and its `CanvasRenderingContext2d`.

use c2d_core::{C2dError, Point, RenderBackend, Surface, SurfaceConfig, TextAlign, TextBaseline};
use wasm_bindgen::prelude::*;
use wasm_bindgen::{Clamped, JsCast};
use web_sys::{CanvasGradient, CanvasRenderingContext2d, HtmlCanvasElement, ImageData};

/// A `<canvas>` element plus its 2D context.
#[derive(Clone)]
pub struct CanvasBackend {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

fn backend_err(e: JsValue) -> C2dError {
    C2dError::Backend(e.as_string().unwrap_or_else(|| format!("{e:?}")))
}

impl CanvasBackend {
    pub fn new(canvas: HtmlCanvasElement, ctx: CanvasRenderingContext2d) -> Self {
        Self { canvas, ctx }
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    pub fn context(&self) -> &CanvasRenderingContext2d {
        &self.ctx
    }

    fn read_style(&self, prop: &str) -> JsValue {
        js_sys::Reflect::get(&self.ctx, &JsValue::from_str(prop)).unwrap_or(JsValue::UNDEFINED)
    }

    /// Strings and gradients go through the typed setters; anything else
    /// (patterns, invalid values) is handed to the property as-is.
    fn write_style(&self, prop: &str, paint: &JsValue) {
        if let Some(css) = paint.as_string() {
            match prop {
                "fillStyle" => self.ctx.set_fill_style_str(&css),
                _ => self.ctx.set_stroke_style_str(&css),
            }
        } else if let Some(grad) = paint.dyn_ref::<CanvasGradient>() {
            match prop {
                "fillStyle" => self.ctx.set_fill_style_canvas_gradient(grad),
                _ => self.ctx.set_stroke_style_canvas_gradient(grad),
            }
        } else if let Err(e) = js_sys::Reflect::set(&self.ctx, &JsValue::from_str(prop), paint) {
            log::warn!("{prop} rejected: {e:?}");
        }
    }
}

impl RenderBackend for CanvasBackend {
    type Paint = JsValue;

    fn width(&self) -> u32 {
        self.canvas.width()
    }

    fn height(&self) -> u32 {
        self.canvas.height()
    }

    fn set_width(&mut self, width: u32) {
        self.canvas.set_width(width);
    }

    fn set_height(&mut self, height: u32) {
        self.canvas.set_height(height);
    }

    fn fill_style(&self) -> JsValue {
        self.read_style("fillStyle")
    }

    fn set_fill_style(&mut self, paint: &JsValue) {
        self.write_style("fillStyle", paint);
    }

    fn stroke_style(&self) -> JsValue {
        self.read_style("strokeStyle")
    }

    fn set_stroke_style(&mut self, paint: &JsValue) {
        self.write_style("strokeStyle", paint);
    }

    fn paint_from_css(&self, css: &str) -> JsValue {
        JsValue::from_str(css)
    }

    fn set_font(&mut self, font: &str) {
        self.ctx.set_font(font);
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.ctx.set_text_align(align.as_str());
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.ctx.set_text_baseline(baseline.as_str());
    }

    fn client_origin(&self) -> Point {
        let rect = self.canvas.get_bounding_client_rect();
        Point::new(rect.x(), rect.y())
    }

    fn get_image_data(&self, x: u32, y: u32, w: u32, h: u32) -> c2d_core::Result<Vec<u8>> {
        let image = self
            .ctx
            .get_image_data(x as f64, y as f64, w as f64, h as f64)
            .map_err(backend_err)?;
        Ok(image.data().0)
    }

    fn put_image_data(
        &mut self,
        data: &[u8],
        x: u32,
        y: u32,
        w: u32,
        h: u32,
    ) -> c2d_core::Result<()> {
        let image =
            ImageData::new_with_u8_clamped_array_and_sh(Clamped(data), w, h).map_err(backend_err)?;
        self.ctx
            .put_image_data(&image, x as f64, y as f64)
            .map_err(backend_err)
    }

    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }

    fn close_path(&mut self) {
        self.ctx.close_path();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.ctx.move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.ctx.line_to(x, y);
    }

    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.ctx.rect(x, y, w, h);
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
    ) -> c2d_core::Result<()> {
        self.ctx
            .ellipse(x, y, rx, ry, rotation, start_angle, end_angle)
            .map_err(backend_err)
    }

    fn fill(&mut self) {
        self.ctx.fill();
    }

    fn stroke(&mut self) {
        self.ctx.stroke();
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> c2d_core::Result<()> {
        self.ctx.fill_text(text, x, y).map_err(backend_err)
    }

    fn stroke_text(&mut self, text: &str, x: f64, y: f64) -> c2d_core::Result<()> {
        self.ctx.stroke_text(text, x, y).map_err(backend_err)
    }
}

/// Inner size of the browser window, in CSS pixels.
pub fn viewport_size() -> Result<(u32, u32), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let w = window.inner_width()?.as_f64().unwrap_or(0.0);
    let h = window.inner_height()?.as_f64().unwrap_or(0.0);
    Ok((w as u32, h as u32))
}

/// Create a `<canvas>`, append it to `document.body`, and wrap it.
///
/// Missing dimensions default to the viewport size at call time.
pub fn create_surface(config: &SurfaceConfig) -> Result<Surface<CanvasBackend>, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("document has no body"))?;

    let canvas: HtmlCanvasElement = document
        .create_element("canvas")?
        .dyn_into()
        .map_err(|_| JsValue::from_str("created element is not a canvas"))?;

    let (width, height) = config.resolve_size(viewport_size()?);
    canvas.set_width(width);
    canvas.set_height(height);
    body.append_child(&canvas)?;

    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
        .dyn_into()
        .map_err(|_| JsValue::from_str("context is not a CanvasRenderingContext2d"))?;

    log::debug!("created <canvas> {width}x{height}");
    Ok(Surface::new(CanvasBackend::new(canvas, ctx), config))
}
