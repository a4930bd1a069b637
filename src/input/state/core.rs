//! Annotation state and the operations every input path funnels into.

use crate::collab::{CollabEvent, EventSink, NullSink};
use crate::config::{Action, Config, KeyBinding};
use crate::draw::{
    Annotation, AnnotationId, AnnotationStore, Color, DrawingSurface, History, SurfaceError,
};
use crate::input::modifiers::Modifiers;
use crate::input::tool::{Cursor, Tool, ToolSelector};
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::collections::HashMap;

/// Current stroke state machine: `Idle -> Drawing -> Idle` per stroke.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawingState {
    /// Not actively drawing - waiting for pointer-down
    Idle,
    /// Pointer held down; points are appended to `id`
    Drawing {
        /// Annotation being drawn
        id: AnnotationId,
        /// Tool recorded when the stroke started
        tool: Tool,
    },
}

/// Asks the user to confirm a destructive action.
pub trait Confirm {
    fn confirm(&self, message: &str) -> bool;
}

/// Confirms everything; used when no interactive prompt is available.
#[derive(Debug, Default)]
pub struct AutoConfirm;

impl Confirm for AutoConfirm {
    fn confirm(&self, _message: &str) -> bool {
        true
    }
}

/// Main input state containing the whole annotation session.
///
/// Collaborators (event relay, confirmation prompt, key map) are injected
/// through the builder methods rather than looked up globally.
pub struct InputState {
    /// Every annotation, in draw order (includes the stroke in progress)
    pub store: AnnotationStore,
    /// Undo log of finalized strokes
    pub history: History,
    /// Active tool and per-tool styles
    pub tools: ToolSelector,
    /// Stroke state machine
    pub state: DrawingState,
    /// Pixel buffer strokes are painted onto
    pub surface: DrawingSurface,
    /// Author stamped on locally drawn annotations
    pub author: String,
    /// Current modifier key state
    pub modifiers: Modifiers,
    /// Whether the surface changed since the host last presented it
    pub needs_redraw: bool,
    created_count: u64,
    pending_save: bool,
    events: Box<dyn EventSink>,
    confirm: Box<dyn Confirm>,
    action_map: HashMap<KeyBinding, Action>,
}

impl InputState {
    /// Creates a state drawing onto `surface` with the given tools.
    ///
    /// Events go nowhere, clear-all is auto-confirmed and no keys are bound
    /// until the corresponding `with_*` builders are used.
    pub fn new(surface: DrawingSurface, tools: ToolSelector, author: impl Into<String>) -> Self {
        Self {
            store: AnnotationStore::new(),
            history: History::new(),
            tools,
            state: DrawingState::Idle,
            surface,
            author: author.into(),
            modifiers: Modifiers::new(),
            needs_redraw: false,
            created_count: 0,
            pending_save: false,
            events: Box::new(NullSink),
            confirm: Box::new(AutoConfirm),
            action_map: HashMap::new(),
        }
    }

    /// Builds a state from user configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let surface = DrawingSurface::new(config.canvas.width, config.canvas.height)
            .context("failed to create drawing surface")?;
        let tools = ToolSelector::new(config.initial_tool(), config.tools.build_styles());
        let action_map = config
            .keybindings
            .build_action_map()
            .map_err(anyhow::Error::msg)
            .context("invalid keybindings")?;
        Ok(Self::new(surface, tools, config.drawing.author.clone()).with_action_map(action_map))
    }

    /// Routes collaboration events to `sink`.
    pub fn with_event_sink(mut self, sink: Box<dyn EventSink>) -> Self {
        self.events = sink;
        self
    }

    /// Uses `confirm` to gate clear-all.
    pub fn with_confirm(mut self, confirm: Box<dyn Confirm>) -> Self {
        self.confirm = confirm;
        self
    }

    /// Installs the keybinding lookup table.
    pub fn with_action_map(mut self, action_map: HashMap<KeyBinding, Action>) -> Self {
        self.action_map = action_map;
        self
    }

    pub(super) fn find_action(&self, binding: &KeyBinding) -> Option<Action> {
        self.action_map.get(binding).copied()
    }

    pub(super) fn request_save(&mut self) {
        self.pending_save = true;
    }

    /// Returns true once after a save shortcut was pressed.
    pub fn take_pending_save(&mut self) -> bool {
        std::mem::take(&mut self.pending_save)
    }

    /// Number of strokes finalized this session.
    pub fn created_count(&self) -> u64 {
        self.created_count
    }

    /// Cursor the host should show over the surface.
    pub fn cursor(&self) -> Cursor {
        self.tools.cursor()
    }

    /// Annotations in draw order.
    pub fn annotations(&self) -> &[Annotation] {
        self.store.as_slice()
    }

    /// Moves the stroke in progress into history and announces it.
    ///
    /// Only the stroke currently being drawn can be finalized; any other id
    /// (unknown, loaded, or already finalized) is ignored, so each stroke
    /// gets exactly one history entry.
    pub fn finalize(&mut self, id: &str) {
        if !matches!(&self.state, DrawingState::Drawing { id: current, .. } if current == id) {
            debug!("Ignoring finalize for {} (not the stroke in progress)", id);
            return;
        }
        self.state = DrawingState::Idle;

        let Some(annotation) = self.store.get(id).cloned() else {
            debug!("Ignoring finalize for unknown annotation {}", id);
            return;
        };

        debug!(
            "Finalized annotation {} ({} points)",
            annotation.id,
            annotation.points.len()
        );
        self.history.push_add(annotation.clone());
        self.created_count += 1;
        self.events.emit(CollabEvent::Created(annotation));
    }

    /// Removes the most recently finalized stroke and redraws.
    ///
    /// Empty history is a no-op. There is no redo.
    pub fn undo(&mut self) -> Result<(), SurfaceError> {
        let Some(entry) = self.history.pop() else {
            debug!("Nothing to undo");
            return Ok(());
        };

        match self.store.remove(&entry.annotation.id) {
            Some(removed) => {
                debug!("Undid annotation {}", removed.id);
                self.events.emit(CollabEvent::Deleted(removed));
            }
            None => debug!(
                "Undo target {} already gone from store",
                entry.annotation.id
            ),
        }
        self.redraw_all()
    }

    /// Empties store and history after confirmation, cancelling any stroke.
    ///
    /// A declined confirmation or an already-empty session is a no-op.
    pub fn clear_all(&mut self) -> Result<(), SurfaceError> {
        if self.store.is_empty() && self.history.is_empty() {
            return Ok(());
        }
        if !self.confirm.confirm("Clear all annotations?") {
            debug!("Clear all declined");
            return Ok(());
        }

        info!("Clearing {} annotations", self.store.len());
        self.store.clear();
        self.history.clear();
        self.state = DrawingState::Idle;
        self.events.emit(CollabEvent::Cleared);
        self.redraw_all()
    }

    /// Replaces every annotation with `annotations` and redraws.
    ///
    /// History and any stroke in progress are discarded. Returns the number
    /// of records dropped for having no points.
    pub fn load(&mut self, annotations: Vec<Annotation>) -> Result<usize, SurfaceError> {
        let dropped = self.store.replace_all(annotations);
        if dropped > 0 {
            warn!("Dropped {} loaded annotations without points", dropped);
        }
        self.history.clear();
        self.state = DrawingState::Idle;
        info!("Loaded {} annotations", self.store.len());
        self.redraw_all()?;
        Ok(dropped)
    }

    /// Clears the surface and replays every stored annotation.
    pub fn redraw_all(&mut self) -> Result<(), SurfaceError> {
        self.surface.redraw_all(self.store.iter())?;
        self.needs_redraw = true;
        Ok(())
    }

    /// Resizes the surface to the shared screen and replays the store.
    pub fn resize(&mut self, width: i32, height: i32) -> Result<(), SurfaceError> {
        self.surface.resize(width, height)?;
        self.redraw_all()
    }

    /// Selects the active tool. Any stroke in progress keeps its own tool.
    pub fn select_tool(&mut self, tool: Tool) {
        self.tools.select(tool);
    }

    /// Selects a tool by identifier; unknown identifiers select the pointer.
    pub fn select_tool_named(&mut self, name: &str) {
        self.tools.select_named(name);
    }

    /// Sets the active tool's color. Unparseable colors are ignored.
    pub fn set_color(&mut self, color: &str) {
        if Color::parse_css(color).is_none() {
            warn!("Ignoring unparseable color '{}'", color);
            return;
        }
        self.tools.active_style_mut().color = color.trim().to_string();
    }

    /// Sets the active tool's width, clamped to 1.0 - 50.0.
    pub fn set_width(&mut self, width: f64) {
        self.tools.active_style_mut().width = width.clamp(1.0, 50.0);
    }

    /// Adjusts the active tool's width by `delta`.
    pub fn adjust_width(&mut self, delta: f64) {
        let width = self.tools.active_style().width + delta;
        self.set_width(width);
    }

    /// Sets the active tool's opacity, clamped to 0.0 - 1.0.
    pub fn set_opacity(&mut self, opacity: f64) {
        self.tools.active_style_mut().opacity = opacity.clamp(0.0, 1.0);
    }
}
