use nu_ansi_term::{Color, Style};
use reedline::{Highlighter, StyledText};

use crate::completer::COMMANDS;

/// Syntax highlighter for the shell
pub struct ReplHighlighter;

impl ReplHighlighter {
    pub fn new() -> Self {
        Self
    }

    fn is_command(command: &str) -> bool {
        COMMANDS.contains(&command) || command == "q" || command == "?"
    }
}

impl Default for ReplHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter for ReplHighlighter {
    fn highlight(&self, line: &str, _cursor: usize) -> StyledText {
        let mut styled = StyledText::new();

        if line.is_empty() {
            return styled;
        }

        let (command, rest) = match line.find(char::is_whitespace) {
            Some(pos) => (&line[..pos], &line[pos..]),
            None => (line, ""),
        };

        let cmd_lower = command.to_lowercase();
        let cmd_style = if Self::is_command(&cmd_lower) {
            Style::new().bold().fg(Color::Cyan)
        } else {
            Style::new().fg(Color::Red)
        };
        styled.push((cmd_style, command.to_string()));

        if rest.is_empty() {
            return styled;
        }

        let path_style = Style::new().fg(Color::Yellow);
        match cmd_lower.as_str() {
            // Path, then the offset, then free text
            "write" | "append" => {
                let skip = if cmd_lower == "write" { 2 } else { 1 };
                let split = argument_end(rest, skip);
                styled.push((path_style, rest[..split].to_string()));
                if split < rest.len() {
                    styled.push((Style::new().fg(Color::Green), rest[split..].to_string()));
                }
            }
            "help" | "?" | "exit" | "quit" | "q" | "pwd" | "tree" => {
                styled.push((Style::new(), rest.to_string()));
            }
            _ if Self::is_command(&cmd_lower) => {
                styled.push((path_style, rest.to_string()));
            }
            _ => {
                styled.push((Style::new(), rest.to_string()));
            }
        }

        styled
    }
}

/// Byte offset just past the first `count` whitespace-separated arguments in
/// `rest`, including the whitespace that follows them.
fn argument_end(rest: &str, count: usize) -> usize {
    let mut seen = 0;
    let mut in_word = false;
    for (i, c) in rest.char_indices() {
        if c.is_whitespace() {
            if in_word {
                seen += 1;
                in_word = false;
            }
        } else if !in_word {
            if seen == count {
                return i;
            }
            in_word = true;
        }
    }
    rest.len()
}
