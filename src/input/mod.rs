//! Input handling and annotation state machine.
//!
//! This module translates pointer and keyboard events into drawing commands.
//! It owns the annotation store, the undo history, the tool selector and the
//! drawing surface, and routes every change through a single dispatcher.

pub mod events;
pub mod modifiers;
pub mod state;
pub mod tool;

// Re-export commonly used types at module level
pub use events::Key;
pub use modifiers::Modifiers;
pub use state::{AutoConfirm, Command, Confirm, DrawingState, InputState};
pub use tool::{Cursor, Tool, ToolSelector};
