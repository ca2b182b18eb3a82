//! Hosts that drive the shell loop.

pub mod terminal;

pub use terminal::{TerminalHost, EDIT_MODE_VAR};
