//! Input Module
//!
//! Maps keyboard input to widget actions.

pub mod handler;
pub mod keymap;

// Re-exports
pub use handler::{FocusTarget, InputHandler, Routed};
pub use keymap::{FieldAction, GlobalAction, TableAction};
