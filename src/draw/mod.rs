//! Annotation model, undo history and Cairo rendering.
//!
//! This module defines the core drawing types used for screen-share annotation:
//! - [`Annotation`]: one stroke with its points and style
//! - [`AnnotationStore`]: all annotations in draw order
//! - [`History`]: undo log of completed strokes
//! - [`DrawingSurface`]: the pixel buffer strokes are painted onto

pub mod annotation;
pub mod color;
pub mod history;
pub mod render;
pub mod store;
pub mod surface;

pub use annotation::{Annotation, AnnotationId, Point, StrokeStyle};
pub use color::Color;
pub use history::{History, HistoryAction, HistoryEntry};
pub use render::Brush;
pub use store::AnnotationStore;
pub use surface::{DrawingSurface, SurfaceError};

pub use color::{BLACK, BLUE, GREEN, RED, WHITE, YELLOW};
