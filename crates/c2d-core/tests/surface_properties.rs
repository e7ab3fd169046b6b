//! Integration tests: the `Surface` facade against the recording backend.
//!
//! Covers dimension pass-through, paint normalisation, font validation and
//! re-sync, pixel round-trips, text render modes, and event mapping.

use c2d_core::*;
use pretty_assertions::assert_eq;

const VIEWPORT: (u32, u32) = (800, 600);

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Size a recording backend the way the browser factory does.
fn create(config: &SurfaceConfig) -> Surface<RecordingBackend> {
    init_logging();
    let (w, h) = config.resolve_size(VIEWPORT);
    Surface::new(RecordingBackend::new(w, h), config)
}

fn checkerboard(w: u32, h: u32) -> Vec<Pixel> {
    (0..w * h)
        .map(|i| {
            let v = (i % 251) as u8;
            Pixel::new(v, 255 - v, v / 2, if i % 2 == 0 { 255 } else { 7 })
        })
        .collect()
}

// ─── Dimensions ─────────────────────────────────────────────────────────

#[test]
fn explicit_size_is_reported_back() {
    let s = create(&SurfaceConfig::with_size(Some(320), Some(200)));
    assert_eq!((s.width(), s.height()), (320, 200));
}

#[test]
fn missing_size_defaults_to_viewport() {
    let s = create(&SurfaceConfig::default());
    assert_eq!((s.width(), s.height()), VIEWPORT);
}

#[test]
fn resize_clears_raster() {
    let mut s = create(&SurfaceConfig::with_size(Some(2), Some(2)));
    s.set_pixels(&checkerboard(2, 2)).unwrap();
    s.set_height(3);
    assert_eq!(s.pixels().unwrap(), vec![Pixel::default(); 6]);
}

// ─── Paint ──────────────────────────────────────────────────────────────

#[test]
fn fill_round_trips_hex_colour() {
    let mut s = create(&SurfaceConfig::with_size(Some(4), Some(4)));
    s.set_fill(&"#123456".to_string());
    assert_eq!(s.fill(), "#123456");
    s.set_stroke(&"rgba(0, 0, 255, 0.5)".to_string());
    assert_eq!(s.stroke(), "rgba(0, 0, 255, 0.5)");
}

// ─── Font ───────────────────────────────────────────────────────────────

#[test]
fn font_align_accepts_center_rejects_diagonal() {
    let mut s = create(&SurfaceConfig::with_size(Some(4), Some(4)));
    s.set_font_align_str("right").unwrap();
    s.set_font_align_str("center").unwrap();
    assert_eq!(s.font_align(), TextAlign::Center);

    let err = s.set_font_align_str("diagonal").unwrap_err();
    match err {
        C2dError::InvalidArgument { value, .. } => assert_eq!(value, "diagonal"),
        other => panic!("expected InvalidArgument, got {other:?}"),
    }
}

#[test]
fn font_baseline_validation() {
    let mut s = create(&SurfaceConfig::with_size(Some(4), Some(4)));
    s.set_font_baseline_str("ideographic").unwrap();
    assert_eq!(s.backend().text_baseline(), TextBaseline::Ideographic);
    assert!(s.set_font_baseline_str("0").is_err());
    assert_eq!(s.font_baseline(), TextBaseline::Ideographic);
}

#[test]
fn font_string_tracks_every_mutation() {
    let mut s = create(&SurfaceConfig::with_size(Some(4), Some(4)));
    s.set_font_size(31.0);
    assert_eq!(s.backend().font(), "31px serif");
    s.set_font_style("Georgia");
    assert_eq!(s.backend().font(), "31px Georgia");
    s.set_font_align(TextAlign::End);
    s.set_font_baseline(TextBaseline::Bottom);
    assert_eq!(s.backend().font(), "31px Georgia");
    s.set_width(8);
    assert_eq!(s.backend().font(), s.font_string());
    assert_eq!(s.backend().text_align(), TextAlign::End);
    assert_eq!(s.backend().text_baseline(), TextBaseline::Bottom);
}

// ─── Pixels ─────────────────────────────────────────────────────────────

#[test]
fn pixel_data_has_four_bytes_per_pixel() {
    let s = create(&SurfaceConfig::with_size(Some(3), Some(5)));
    assert_eq!(s.pixel_data().unwrap().len(), 3 * 5 * 4);
    assert_eq!(s.pixels().unwrap().len(), 15);
}

#[test]
fn get_then_set_pixels_is_idempotent() {
    let mut s = create(&SurfaceConfig::with_size(Some(6), Some(4)));
    s.set_pixels(&checkerboard(6, 4)).unwrap();
    let before = s.pixels().unwrap();
    s.set_pixels(&before).unwrap();
    assert_eq!(s.pixels().unwrap(), before);
}

#[test]
fn pixels_round_trip_channel_for_channel() {
    let mut s = create(&SurfaceConfig::with_size(Some(5), Some(3)));
    let pixels = checkerboard(5, 3);
    s.set_pixels(&pixels).unwrap();
    assert_eq!(s.pixels().unwrap(), pixels);

    let bytes = s.pixel_data().unwrap();
    assert_eq!(&bytes[4..8], &[1, 254, 0, 7]);
}

#[test]
fn short_pixel_buffer_leaves_tail_untouched() {
    let mut s = create(&SurfaceConfig::with_size(Some(2), Some(2)));
    let full = checkerboard(2, 2);
    s.set_pixels(&full).unwrap();

    let red = Pixel::new(255, 0, 0, 255);
    s.set_pixels(&[red]).unwrap();
    let after = s.pixels().unwrap();
    assert_eq!(after[0], red);
    assert_eq!(&after[1..], &full[1..]);
}

// ─── Drawing ────────────────────────────────────────────────────────────

#[test]
fn text_accepts_four_modes_and_rejects_a_fifth() {
    let mut s = create(&SurfaceConfig::with_size(Some(20), Some(20)));
    for mode in ["fill", "stroke", "both", "-both"] {
        s.text_str("X", 10.0, 10.0, mode).unwrap();
    }
    let err = s.text_str("X", 10.0, 10.0, "outline").unwrap_err();
    match err {
        C2dError::InvalidArgument { value, expected, .. } => {
            assert_eq!(value, "outline");
            assert!(expected.contains("'-both'"));
        }
        other => panic!("expected InvalidArgument, got {other:?}"),
    }
}

#[test]
fn rect_fills_then_strokes() {
    let mut s = create(&SurfaceConfig::with_size(Some(20), Some(20)));
    s.rect(1.0, 2.0, 3.0, 4.0);
    assert_eq!(
        s.backend().ops(),
        &[
            DrawOp::BeginPath,
            DrawOp::Rect(kurbo::Rect::new(1.0, 2.0, 4.0, 6.0)),
            DrawOp::ClosePath,
            DrawOp::Fill,
            DrawOp::Stroke,
        ]
    );
}

#[test]
fn line_records_one_segment() {
    let mut s = create(&SurfaceConfig::with_size(Some(20), Some(20)));
    s.line(0.0, 1.0, 10.0, 11.0);
    let seg = DrawOp::segment(s.backend().ops()).unwrap();
    assert_eq!(seg.p0, Point::new(0.0, 1.0));
    assert_eq!(seg.p1, Point::new(10.0, 11.0));
}

#[test]
fn negative_radius_surfaces_backend_error() {
    let mut s = create(&SurfaceConfig::with_size(Some(20), Some(20)));
    assert!(matches!(s.ellipse(0.0, 0.0, -1.0, None), Err(C2dError::Backend(_))));
}

// ─── Coordinates ────────────────────────────────────────────────────────

#[test]
fn event_maps_to_surface_local() {
    init_logging();
    let backend = RecordingBackend::new(200, 100).with_origin((100.0, 50.0));
    let s = Surface::new(backend, &SurfaceConfig::default());
    assert_eq!(s.event_to_local(&(110.0, 60.0)), Point::new(10.0, 10.0));
}
