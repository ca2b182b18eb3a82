//! Boundary between the shell loop and whatever drives it.
//!
//! The loop in [`crate::repl`] only talks to an [`IoHost`], so the same
//! command handling runs under a terminal or an in-memory test host.

pub mod types;

#[cfg(test)]
pub mod test_host;

pub use types::*;

#[cfg(test)]
pub use test_host::TestHost;

/// Error type for I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for IoError {
    fn from(e: std::io::Error) -> Self {
        IoError::Io(e.to_string())
    }
}

/// Host interface for shell I/O.
pub trait IoHost {
    /// Block until a line or a signal is available.
    fn wait_for_input(&mut self) -> Result<(), IoError>;

    /// Take the pending input line, if any.
    fn read_input(&mut self) -> Result<Option<InputLine>, IoError>;

    /// Take the pending signal (Ctrl+C, Ctrl+D), if any.
    fn read_signal(&mut self) -> Result<Option<Signal>, IoError>;

    fn write_output(&mut self, output: Output) -> Result<(), IoError>;

    /// Prompt state to render before the next input.
    fn write_prompt(&mut self, config: PromptConfig) -> Result<(), IoError>;

    fn flush(&mut self) -> Result<(), IoError> {
        Ok(())
    }
}
