//! Annotation engine for drawing on top of a shared screen.
//!
//! Strokes are recorded as [`draw::Annotation`]s, painted incrementally onto
//! a [`draw::DrawingSurface`] and replayed from the store whenever history
//! changes. [`input::InputState`] owns a session and is the single entry
//! point for pointer, toolbar and keyboard input; [`session`] saves and loads
//! annotation documents.

pub mod capture;
pub mod collab;
pub mod config;
pub mod draw;
pub mod input;
pub mod notification;
pub mod session;
pub mod util;

pub use config::Config;
