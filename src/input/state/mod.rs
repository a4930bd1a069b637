mod actions;
mod core;
mod pointer;

pub use actions::Command;
pub use self::core::{AutoConfirm, Confirm, DrawingState, InputState};
