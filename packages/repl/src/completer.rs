use pksfs_path_store::SharedFs;
use reedline::{Completer, Span, Suggestion};

pub(crate) const COMMANDS: &[&str] = &[
    "help", "exit", "quit", "ls", "stat", "mkdir", "touch", "open", "cat", "write", "append", "rm",
    "rmdir", "cd", "pwd", "tree",
];

/// Command and absolute-path completer for the shell
pub struct ReplCompleter {
    fs: Option<SharedFs>,
}

impl ReplCompleter {
    /// A completer that only knows command names.
    pub fn new() -> Self {
        Self { fs: None }
    }

    /// Also complete absolute path arguments from `fs`.
    pub fn with_fs(fs: SharedFs) -> Self {
        Self { fs: Some(fs) }
    }

    fn complete_path(&self, word: &str, start: usize, pos: usize) -> Vec<Suggestion> {
        let Some(fs) = &self.fs else {
            return Vec::new();
        };
        let Some(split) = word.rfind('/') else {
            return Vec::new();
        };

        let (dir, prefix) = (&word[..split], &word[split + 1..]);
        let dir_path = if dir.is_empty() { "/" } else { dir };
        let Ok(matches) = fs.with(|fs| {
            fs.children(dir_path).map(|children| {
                children
                    .filter(|(name, _)| name.starts_with(prefix))
                    .map(|(name, entry)| (format!("{}/{}", dir, name), entry))
                    // Prefix siblings (`/ab` listed under `/a`) would complete
                    // to a path that does not exist
                    .filter(|(value, entry)| value == entry.path())
                    .map(|(value, entry)| (value, entry.is_dir()))
                    .collect::<Vec<_>>()
            })
        }) else {
            return Vec::new();
        };

        matches
            .into_iter()
            .map(|(value, is_dir)| {
                Suggestion {
                    value: if is_dir { format!("{}/", value) } else { value },
                    description: None,
                    style: None,
                    extra: None,
                    span: Span::new(start, pos),
                    append_whitespace: !is_dir,
                    match_indices: None,
                }
            })
            .collect()
    }
}

impl Default for ReplCompleter {
    fn default() -> Self {
        Self::new()
    }
}

impl Completer for ReplCompleter {
    fn complete(&mut self, line: &str, pos: usize) -> Vec<Suggestion> {
        let line_to_pos = &line[..pos];
        let words: Vec<&str> = line_to_pos.split_whitespace().collect();

        if words.is_empty() || (words.len() == 1 && !line_to_pos.ends_with(char::is_whitespace)) {
            // Completing the command itself
            let prefix = words.first().copied().unwrap_or("");
            let start = line_to_pos.rfind(prefix).unwrap_or(0);

            return COMMANDS
                .iter()
                .filter(|cmd| cmd.starts_with(prefix))
                .map(|cmd| Suggestion {
                    value: cmd.to_string(),
                    description: Some(command_description(cmd).to_string()),
                    style: None,
                    extra: None,
                    span: Span::new(start, pos),
                    append_whitespace: true,
                    match_indices: None,
                })
                .collect();
        }

        // Completing a path argument
        let word = if line_to_pos.ends_with(char::is_whitespace) {
            ""
        } else {
            words.last().copied().unwrap_or("")
        };
        if !word.starts_with('/') {
            return Vec::new();
        }
        self.complete_path(word, pos - word.len(), pos)
    }
}

fn command_description(cmd: &str) -> &'static str {
    match cmd {
        "help" => "Show help",
        "exit" | "quit" => "Exit the shell",
        "ls" => "List a directory",
        "stat" => "Show entry attributes",
        "mkdir" => "Create a directory",
        "touch" => "Create an empty file",
        "open" => "Open or create a file",
        "cat" => "Print file contents",
        "write" => "Write text at an offset",
        "append" => "Append text to a file",
        "rm" | "rmdir" => "Remove an entry",
        "cd" => "Change directory",
        "pwd" => "Print working directory",
        "tree" => "Dump the raw store",
        _ => "",
    }
}
