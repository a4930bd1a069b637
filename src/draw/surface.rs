//! Pixel surface the overlay paints onto.

use super::annotation::{Annotation, Point};
use super::render::{self, Brush};
use cairo::{Context, Format, ImageSurface};
use log::debug;
use std::fs::File;
use std::path::Path;
use thiserror::Error;

/// Errors raised by the drawing surface.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("invalid surface size {width}x{height}")]
    InvalidSize { width: i32, height: i32 },

    #[error("cairo error: {0}")]
    Cairo(#[from] cairo::Error),

    #[error("surface data is borrowed elsewhere: {0}")]
    Borrow(#[from] cairo::BorrowError),

    #[error("failed to encode PNG: {0}")]
    Png(#[from] cairo::IoError),

    #[error("failed to write image: {0}")]
    Io(#[from] std::io::Error),
}

/// Full-bleed ARGB32 overlay surface.
///
/// No Cairo context outlives a single paint call, so the pixel buffer can be
/// borrowed exclusively between events.
pub struct DrawingSurface {
    surface: ImageSurface,
    width: i32,
    height: i32,
}

impl DrawingSurface {
    /// Creates a transparent surface of the given size.
    pub fn new(width: i32, height: i32) -> Result<Self, SurfaceError> {
        if width <= 0 || height <= 0 {
            return Err(SurfaceError::InvalidSize { width, height });
        }
        let surface = ImageSurface::create(Format::ARgb32, width, height)?;
        Ok(Self {
            surface,
            width,
            height,
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Bytes per row of the pixel buffer.
    pub fn stride(&self) -> i32 {
        self.surface.stride()
    }

    fn paint(&self, f: impl FnOnce(&Context)) -> Result<(), SurfaceError> {
        let ctx = Context::new(&self.surface)?;
        f(&ctx);
        drop(ctx);
        self.surface.flush();
        Ok(())
    }

    /// Paints the starting dot of a stroke.
    pub fn paint_dot(&self, brush: &Brush, at: Point) -> Result<(), SurfaceError> {
        self.paint(|ctx| render::render_dot(ctx, brush, at))
    }

    /// Paints a single stroke segment.
    pub fn paint_segment(&self, brush: &Brush, from: Point, to: Point) -> Result<(), SurfaceError> {
        self.paint(|ctx| render::render_segment(ctx, brush, from, to))
    }

    /// Clears the surface and replays every annotation from scratch.
    pub fn redraw_all<'a>(
        &self,
        annotations: impl IntoIterator<Item = &'a Annotation>,
    ) -> Result<(), SurfaceError> {
        self.paint(|ctx| {
            render::clear(ctx);
            render::render_annotations(ctx, annotations);
        })
    }

    /// Replaces the surface with a blank one of the new size.
    ///
    /// Callers replay the store afterwards.
    pub fn resize(&mut self, width: i32, height: i32) -> Result<(), SurfaceError> {
        if width == self.width && height == self.height {
            return Ok(());
        }
        debug!(
            "Resizing surface {}x{} -> {}x{}",
            self.width, self.height, width, height
        );
        *self = Self::new(width, height)?;
        Ok(())
    }

    /// Copy of the raw premultiplied ARGB32 buffer (`stride * height` bytes).
    pub fn pixels(&mut self) -> Result<Vec<u8>, SurfaceError> {
        self.surface.flush();
        let data = self.surface.data()?;
        Ok(data.to_vec())
    }

    /// Alpha channel of the pixel at `(x, y)`, or `None` when out of bounds.
    pub fn alpha_at(&mut self, x: i32, y: i32) -> Result<Option<u8>, SurfaceError> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return Ok(None);
        }
        let stride = self.stride() as usize;
        let data = self.surface.data()?;
        let offset = y as usize * stride + x as usize * 4;
        // ARGB32 is stored native-endian; alpha is the high byte of the u32
        let pixel = u32::from_ne_bytes([
            data[offset],
            data[offset + 1],
            data[offset + 2],
            data[offset + 3],
        ]);
        Ok(Some((pixel >> 24) as u8))
    }

    /// Writes the current surface as a PNG file.
    pub fn write_png(&self, path: &Path) -> Result<(), SurfaceError> {
        let mut file = File::create(path)?;
        self.surface.write_to_png(&mut file)?;
        Ok(())
    }
}
