//! C2D core: a thin facade over an immediate-mode 2D drawing surface.
//!
//! [`Surface`] owns a [`RenderBackend`] (the native surface and its
//! rendering context) plus the cached [`FontConfig`], and forwards paint,
//! path, text and pixel operations to it. The browser backend lives in
//! `c2d-wasm`; [`RecordingBackend`] runs anywhere.

pub mod backend;
pub mod color;
pub mod error;
pub mod model;
pub mod recording;
pub mod surface;

pub use backend::RenderBackend;
pub use color::Color;
pub use error::{C2dError, Result};
pub use model::*;
pub use recording::{DrawOp, RecordingBackend};
pub use surface::Surface;

// Re-export kurbo so downstream crates don't need a direct dependency
pub use kurbo::Point;
