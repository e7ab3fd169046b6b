//! WASM bridge for C2D. Exposes the surface facade to JavaScript.
//!
//! Compiled via `wasm-pack build --target web`. JS sees a single `C2D`
//! namespace whose static methods operate on the active canvas: the first
//! one created by `C2D.createCanvas`.

mod canvas;

pub use canvas::{CanvasBackend, create_surface, viewport_size};

use c2d_core::{C2dError, Pixel, Point, RenderBackend, Surface, SurfaceConfig, TextMode};
use serde::Serialize;
use std::cell::RefCell;
use wasm_bindgen::prelude::*;

thread_local! {
    static ACTIVE: RefCell<Option<Surface<CanvasBackend>>> = const { RefCell::new(None) };
}

fn js_err(e: C2dError) -> JsValue {
    js_sys::Error::new(&e.to_string()).into()
}

const NO_ACTIVE_CANVAS: &str = "no active canvas; call createCanvas first";

/// Store `surface` in `slot` unless a surface is already there.
/// Returns whether it was installed.
fn install<B: RenderBackend>(slot: &RefCell<Option<Surface<B>>>, surface: Surface<B>) -> bool {
    let mut slot = slot.borrow_mut();
    if slot.is_some() {
        return false;
    }
    *slot = Some(surface);
    true
}

/// Run `f` against the surface in `slot`.
fn with_slot<B: RenderBackend, R>(
    slot: &RefCell<Option<Surface<B>>>,
    f: impl FnOnce(&mut Surface<B>) -> R,
) -> Result<R, &'static str> {
    slot.borrow_mut().as_mut().map(f).ok_or(NO_ACTIVE_CANVAS)
}

/// Run `f` against the active surface.
fn with_active<R>(
    f: impl FnOnce(&mut Surface<CanvasBackend>) -> Result<R, JsValue>,
) -> Result<R, JsValue> {
    ACTIVE.with(|slot| {
        with_slot(slot, f)
            .map_err(|msg| JsValue::from(js_sys::Error::new(msg)))
            .and_then(|result| result)
    })
}

/// Parse an optional JS text-mode argument, defaulting to `"fill"`.
fn text_mode(mode: Option<String>) -> Result<TextMode, C2dError> {
    mode.as_deref().map_or(Ok(TextMode::Fill), str::parse)
}

#[derive(Serialize)]
struct LocalPoint {
    x: f64,
    y: f64,
}

/// Read `clientX`/`clientY` from a pointer event or any object carrying them.
/// Missing or non-numeric coordinates read as NaN.
fn client_point(event: &JsValue) -> Result<Point, JsValue> {
    let read = |key: &str| -> Result<f64, JsValue> {
        Ok(coordinate(js_sys::Reflect::get(event, &JsValue::from_str(key))?.as_f64()))
    };
    Ok(Point::new(read("clientX")?, read("clientY")?))
}

fn coordinate(value: Option<f64>) -> f64 {
    value.unwrap_or(f64::NAN)
}

/// The `C2D` namespace. Never constructed; all methods are static.
#[wasm_bindgen(js_name = C2D)]
pub struct C2d {
    _private: (),
}

#[wasm_bindgen(js_class = C2D)]
impl C2d {
    /// Create and attach a new canvas, returning `{canvas, ctx}`.
    ///
    /// The first canvas created becomes the active one; later canvases are
    /// still created and returned but every other `C2D` method keeps
    /// targeting the first.
    #[wasm_bindgen(js_name = createCanvas)]
    pub fn create_canvas(width: Option<u32>, height: Option<u32>) -> Result<JsValue, JsValue> {
        init_once();

        let surface = create_surface(&SurfaceConfig::with_size(width, height))?;
        let result = js_sys::Object::new();
        js_sys::Reflect::set(&result, &"canvas".into(), surface.backend().canvas())?;
        js_sys::Reflect::set(&result, &"ctx".into(), surface.backend().context())?;

        if !ACTIVE.with(|slot| install(slot, surface)) {
            log::warn!("createCanvas: an active canvas already exists; keeping it");
        }
        Ok(result.into())
    }

    // ─── Dimensions ──────────────────────────────────────────────────────

    pub fn width() -> Result<u32, JsValue> {
        with_active(|s| Ok(s.width()))
    }

    #[wasm_bindgen(js_name = setWidth)]
    pub fn set_width(width: u32) -> Result<(), JsValue> {
        with_active(|s| {
            s.set_width(width);
            Ok(())
        })
    }

    pub fn height() -> Result<u32, JsValue> {
        with_active(|s| Ok(s.height()))
    }

    #[wasm_bindgen(js_name = setHeight)]
    pub fn set_height(height: u32) -> Result<(), JsValue> {
        with_active(|s| {
            s.set_height(height);
            Ok(())
        })
    }

    // ─── Paint ───────────────────────────────────────────────────────────

    pub fn fill() -> Result<JsValue, JsValue> {
        with_active(|s| Ok(s.fill()))
    }

    #[wasm_bindgen(js_name = setFill)]
    pub fn set_fill(paint: JsValue) -> Result<(), JsValue> {
        with_active(|s| {
            s.set_fill(&paint);
            Ok(())
        })
    }

    pub fn stroke() -> Result<JsValue, JsValue> {
        with_active(|s| Ok(s.stroke()))
    }

    #[wasm_bindgen(js_name = setStroke)]
    pub fn set_stroke(paint: JsValue) -> Result<(), JsValue> {
        with_active(|s| {
            s.set_stroke(&paint);
            Ok(())
        })
    }

    /// Map a pointer event's client coordinates into canvas space as `{x, y}`.
    #[wasm_bindgen(js_name = eventToMouse)]
    pub fn event_to_mouse(event: JsValue) -> Result<JsValue, JsValue> {
        let client = client_point(&event)?;
        let local = with_active(|s| Ok(s.event_to_local(&client)))?;
        Ok(serde_wasm_bindgen::to_value(&LocalPoint {
            x: local.x,
            y: local.y,
        })?)
    }

    // ─── Font ────────────────────────────────────────────────────────────

    #[wasm_bindgen(js_name = fontSize)]
    pub fn font_size() -> Result<f64, JsValue> {
        with_active(|s| Ok(s.font_size()))
    }

    #[wasm_bindgen(js_name = setFontSize)]
    pub fn set_font_size(size: f64) -> Result<(), JsValue> {
        with_active(|s| {
            s.set_font_size(size);
            Ok(())
        })
    }

    #[wasm_bindgen(js_name = fontStyle)]
    pub fn font_style() -> Result<String, JsValue> {
        with_active(|s| Ok(s.font_style().to_string()))
    }

    #[wasm_bindgen(js_name = setFontStyle)]
    pub fn set_font_style(family: String) -> Result<(), JsValue> {
        with_active(|s| {
            s.set_font_style(family);
            Ok(())
        })
    }

    #[wasm_bindgen(js_name = fontAlign)]
    pub fn font_align() -> Result<String, JsValue> {
        with_active(|s| Ok(s.font_align().as_str().to_string()))
    }

    /// Throws for anything outside left/right/center/start/end.
    #[wasm_bindgen(js_name = setFontAlign)]
    pub fn set_font_align(align: &str) -> Result<(), JsValue> {
        with_active(|s| s.set_font_align_str(align).map_err(js_err))
    }

    #[wasm_bindgen(js_name = fontBaseline)]
    pub fn font_baseline() -> Result<String, JsValue> {
        with_active(|s| Ok(s.font_baseline().as_str().to_string()))
    }

    /// Throws for anything outside top/hanging/middle/alphabetic/ideographic/bottom.
    #[wasm_bindgen(js_name = setFontBaseline)]
    pub fn set_font_baseline(baseline: &str) -> Result<(), JsValue> {
        with_active(|s| s.set_font_baseline_str(baseline).map_err(js_err))
    }

    /// Cached font configuration as JSON.
    #[wasm_bindgen(js_name = fontConfig)]
    pub fn font_config() -> Result<String, JsValue> {
        with_active(|s| {
            serde_json::to_string(s.font())
                .map_err(|e| js_sys::Error::new(&format!("Serialization error: {e}")).into())
        })
    }

    // ─── Pixels ──────────────────────────────────────────────────────────

    /// Raw RGBA bytes of the whole canvas.
    #[wasm_bindgen(js_name = getPixelData)]
    pub fn get_pixel_data() -> Result<js_sys::Uint8ClampedArray, JsValue> {
        with_active(|s| {
            let data = s.pixel_data().map_err(js_err)?;
            Ok(js_sys::Uint8ClampedArray::from(data.as_slice()))
        })
    }

    /// The canvas as an array of `{r, g, b, a}` records.
    #[wasm_bindgen(js_name = getPixels)]
    pub fn get_pixels() -> Result<JsValue, JsValue> {
        with_active(|s| {
            let pixels = s.pixels().map_err(js_err)?;
            Ok(serde_wasm_bindgen::to_value(&pixels)?)
        })
    }

    /// Write back an array of `{r, g, b, a}` records, one per pixel.
    #[wasm_bindgen(js_name = setPixels)]
    pub fn set_pixels(pixels: JsValue) -> Result<(), JsValue> {
        let pixels: Vec<Pixel> = serde_wasm_bindgen::from_value(pixels)?;
        with_active(|s| s.set_pixels(&pixels).map_err(js_err))
    }

    // ─── Drawing ─────────────────────────────────────────────────────────

    pub fn ellipse(x: f64, y: f64, w: f64, h: Option<f64>) -> Result<(), JsValue> {
        with_active(|s| s.ellipse(x, y, w, h).map_err(js_err))
    }

    pub fn rect(x: f64, y: f64, w: f64, h: f64) -> Result<(), JsValue> {
        with_active(|s| {
            s.rect(x, y, w, h);
            Ok(())
        })
    }

    pub fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> Result<(), JsValue> {
        with_active(|s| {
            s.line(x1, y1, x2, y2);
            Ok(())
        })
    }

    /// Draw text; `mode` is `"fill"` (default), `"stroke"`, `"both"` or `"-both"`.
    pub fn text(text: &str, x: f64, y: f64, mode: Option<String>) -> Result<(), JsValue> {
        let mode = text_mode(mode).map_err(js_err)?;
        with_active(|s| s.text(text, x, y, mode).map_err(js_err))
    }
}

// ─── Logging and panic hook ─────────────────────────────────────────────

fn init_once() {
    use std::sync::Once;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"C2D: logger already installed".into());
        }
        #[cfg(target_arch = "wasm32")]
        std::panic::set_hook(Box::new(|info| {
            let msg = format!("C2D WASM panic: {info}");
            web_sys::console::error_1(&msg.into());
        }));
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use c2d_core::RecordingBackend;
    use pretty_assertions::assert_eq;

    fn recording(w: u32, h: u32) -> Surface<RecordingBackend> {
        Surface::new(RecordingBackend::new(w, h), &SurfaceConfig::default())
    }

    #[test]
    fn first_installed_surface_stays_active() {
        let slot = RefCell::new(None);
        assert!(install(&slot, recording(100, 50)));
        assert!(!install(&slot, recording(300, 200)));
        assert_eq!(with_slot(&slot, |s| (s.width(), s.height())), Ok((100, 50)));
    }

    #[test]
    fn empty_slot_reports_missing_canvas() {
        let slot: RefCell<Option<Surface<RecordingBackend>>> = RefCell::new(None);
        assert_eq!(with_slot(&slot, |s| s.width()), Err(NO_ACTIVE_CANVAS));
    }

    #[test]
    fn missing_coordinate_maps_to_nan_without_error() {
        let x = coordinate(None);
        assert!(x.is_nan());
        assert_eq!(coordinate(Some(110.0)), 110.0);

        let backend = RecordingBackend::new(200, 100).with_origin((100.0, 50.0));
        let s = Surface::new(backend, &SurfaceConfig::default());
        let local = s.event_to_local(&Point::new(x, 60.0));
        assert!(local.x.is_nan());
        assert_eq!(local.y, 10.0);
    }

    #[test]
    fn text_mode_defaults_to_fill() {
        assert_eq!(text_mode(None).unwrap(), TextMode::Fill);
        assert_eq!(text_mode(Some("-both".into())).unwrap(), TextMode::StrokeThenFill);
    }

    #[test]
    fn text_mode_rejects_unknown_names() {
        let err = text_mode(Some("glow".into())).unwrap_err();
        assert!(err.to_string().contains("\"glow\""));
    }
}
