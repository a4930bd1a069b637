use crate::config::{Action, KeyBinding};
use crate::draw::{Annotation, Point, SurfaceError};
use crate::input::{events::Key, tool::Tool};
use log::debug;
use serde::{Deserialize, Serialize};

use super::InputState;

/// Width step applied by the increase/decrease width shortcuts.
const WIDTH_STEP: f64 = 1.0;

/// A state transition request.
///
/// Pointer events, toolbar clicks, keyboard shortcuts and replay scripts all
/// become commands, and [`InputState::dispatch`] is the only place that
/// applies them.
///
/// Serialized as `{"command": "pointer_down", "x": 10, "y": 20}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    PointerDown { x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    PointerUp,
    PointerCancel,
    SelectTool { tool: String },
    SetColor { color: String },
    SetWidth { width: f64 },
    SetOpacity { opacity: f64 },
    Undo,
    ClearAll,
    Load { annotations: Vec<Annotation> },
    Resize { width: i32, height: i32 },
}

impl InputState {
    /// Applies a command: state transition, then paint or full redraw.
    pub fn dispatch(&mut self, command: Command) -> Result<(), SurfaceError> {
        match command {
            Command::PointerDown { x, y } => self.on_pointer_down(Point::new(x, y))?,
            Command::PointerMove { x, y } => self.on_pointer_move(Point::new(x, y))?,
            Command::PointerUp => self.on_pointer_up(),
            Command::PointerCancel => self.on_pointer_cancel(),
            Command::SelectTool { tool } => self.select_tool_named(&tool),
            Command::SetColor { color } => self.set_color(&color),
            Command::SetWidth { width } => self.set_width(width),
            Command::SetOpacity { opacity } => self.set_opacity(opacity),
            Command::Undo => self.undo()?,
            Command::ClearAll => self.clear_all()?,
            Command::Load { annotations } => {
                self.load(annotations)?;
            }
            Command::Resize { width, height } => self.resize(width, height)?,
        }
        Ok(())
    }

    /// Applies a sequence of commands, stopping at the first surface error.
    pub fn dispatch_all(
        &mut self,
        commands: impl IntoIterator<Item = Command>,
    ) -> Result<(), SurfaceError> {
        for command in commands {
            self.dispatch(command)?;
        }
        Ok(())
    }

    /// Processes a key press: tracks modifiers and runs any bound action.
    pub fn on_key_press(&mut self, key: Key) -> Result<(), SurfaceError> {
        if self.modifiers.update(key, true) {
            return Ok(());
        }

        let Some(name) = key.name() else {
            return Ok(());
        };
        let binding = KeyBinding {
            key: name.to_lowercase(),
            ctrl: self.modifiers.ctrl,
            shift: self.modifiers.shift,
            alt: self.modifiers.alt,
        };
        match self.find_action(&binding) {
            Some(action) => self.handle_action(action),
            None => {
                debug!("No action bound to {:?}", binding);
                Ok(())
            }
        }
    }

    /// Processes a key release.
    pub fn on_key_release(&mut self, key: Key) {
        self.modifiers.update(key, false);
    }

    /// Runs a keybinding action.
    pub fn handle_action(&mut self, action: Action) -> Result<(), SurfaceError> {
        let tool = match action {
            Action::Undo => return self.dispatch(Command::Undo),
            Action::ClearAll => return self.dispatch(Command::ClearAll),
            Action::Save => {
                self.request_save();
                return Ok(());
            }
            Action::IncreaseWidth => {
                self.adjust_width(WIDTH_STEP);
                return Ok(());
            }
            Action::DecreaseWidth => {
                self.adjust_width(-WIDTH_STEP);
                return Ok(());
            }
            Action::SelectPointer => Tool::Pointer,
            Action::SelectPen => Tool::Pen,
            Action::SelectHighlighter => Tool::Highlighter,
            Action::SelectEraser => Tool::Eraser,
            Action::SelectRectangle => Tool::Rectangle,
            Action::SelectCircle => Tool::Circle,
            Action::SelectArrow => Tool::Arrow,
            Action::SelectText => Tool::Text,
        };
        self.select_tool(tool);
        Ok(())
    }
}
