//! Values exchanged between the shell loop and its host.

/// One line typed at the prompt.
#[derive(Debug, Clone)]
pub struct InputLine {
    pub line: String,
}

/// Key chords that end or interrupt a read instead of producing a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// Ctrl+C: drop the current line and keep going.
    Interrupt,
    /// Ctrl+D: leave the shell.
    Eof,
}

/// How the host should render an [`Output`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputStyle {
    /// Command output, shown as is.
    #[default]
    Normal,
    /// A failed command; the host adds its own prefix.
    Error,
    Info,
    Banner,
}

/// Text the shell wants shown.
#[derive(Debug, Clone)]
pub struct Output {
    pub text: String,
    pub style: OutputStyle,
}

impl Output {
    fn styled(text: impl Into<String>, style: OutputStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn normal(text: impl Into<String>) -> Self {
        Self::styled(text, OutputStyle::Normal)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::styled(text, OutputStyle::Error)
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::styled(text, OutputStyle::Info)
    }

    pub fn banner(text: impl Into<String>) -> Self {
        Self::styled(text, OutputStyle::Banner)
    }
}

/// Prompt state sent from the loop to the host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptConfig {
    /// Entries in the store, root included.
    pub entry_count: usize,
    /// Current directory, always absolute.
    pub current_path: String,
}

/// Why the shell loop returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// `exit`, `quit` or `q`.
    UserExit,
    /// Ctrl+D, or the host ran out of input.
    Eof,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_style() {
        let outputs = [
            (Output::normal("a"), OutputStyle::Normal),
            (Output::error("b"), OutputStyle::Error),
            (Output::info("c"), OutputStyle::Info),
            (Output::banner("d"), OutputStyle::Banner),
        ];
        for (output, style) in outputs {
            assert_eq!(output.style, style);
        }
        assert_eq!(Output::error("/x: no such entry").text, "/x: no such entry");
    }

    #[test]
    fn default_prompt_is_empty() {
        let prompt = PromptConfig::default();
        assert_eq!(prompt.entry_count, 0);
        assert!(prompt.current_path.is_empty());
        assert_eq!(OutputStyle::default(), OutputStyle::Normal);
    }
}
