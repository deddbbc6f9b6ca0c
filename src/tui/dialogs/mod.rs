//! Dialog modules for the TUI
//!
//! Modal dialogs drawn over the movement table.

pub mod confirm;
pub mod help;
pub mod movement;
pub mod path_prompt;

pub use movement::{MovementField, MovementFormState};
pub use path_prompt::{PathAction, PathPromptState};
