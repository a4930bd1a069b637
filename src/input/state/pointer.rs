use crate::draw::{Brush, Point, SurfaceError};
use crate::util;
use log::debug;

use super::{DrawingState, InputState};

impl InputState {
    /// Processes a pointer-down event.
    ///
    /// # Behavior
    /// - Pointer tool active: no-op (view-only mode)
    /// - Otherwise: starts a new annotation with the active tool's style and
    ///   paints its starting dot
    /// - A stroke left in progress (pointer-up never arrived) is finalized first
    pub fn on_pointer_down(&mut self, point: Point) -> Result<(), SurfaceError> {
        let tool = self.tools.active();
        if !tool.draws() {
            return Ok(());
        }

        if let DrawingState::Drawing { id, .. } = &self.state {
            let dangling = id.clone();
            debug!("Pointer-down while {} in progress; finalizing it", dangling);
            self.finalize(&dangling);
        }

        let style = self.tools.active_style();
        let id = self
            .store
            .create(tool, point, &style, &self.author, util::now_millis());
        self.state = DrawingState::Drawing {
            id: id.clone(),
            tool,
        };

        if let Some(annotation) = self.store.get(&id) {
            self.surface
                .paint_dot(&Brush::for_annotation(annotation), point)?;
        }
        self.needs_redraw = true;
        Ok(())
    }

    /// Processes pointer motion with the button held.
    ///
    /// Appends the point to the stroke in progress and paints the segment from
    /// the previous point. No-op when idle.
    pub fn on_pointer_move(&mut self, point: Point) -> Result<(), SurfaceError> {
        let DrawingState::Drawing { id, .. } = &self.state else {
            return Ok(());
        };

        let Some(previous) = self.store.append(id, point) else {
            return Ok(());
        };
        if let Some(annotation) = self.store.get(id) {
            self.surface
                .paint_segment(&Brush::for_annotation(annotation), previous, point)?;
        }
        self.needs_redraw = true;
        Ok(())
    }

    /// Processes pointer release: the stroke in progress moves into history.
    pub fn on_pointer_up(&mut self) {
        if let DrawingState::Drawing { id, .. } = &self.state {
            let id = id.clone();
            self.finalize(&id);
        }
    }

    /// Processes pointer cancellation (focus loss, touch cancel).
    ///
    /// Keeps what was drawn so far, exactly as a pointer-up would.
    pub fn on_pointer_cancel(&mut self) {
        if matches!(self.state, DrawingState::Drawing { .. }) {
            debug!("Pointer cancelled mid-stroke; keeping stroke");
        }
        self.on_pointer_up();
    }
}
