use nu_ansi_term::{Color, Style};
use pksfs_path_store::{EntryKind, Error as FsError, ErrorKind, FsCallbacks};

use crate::context::ShellContext;

/// Result of executing a command
pub enum CommandResult {
    /// Command succeeded, with optional output to display
    Ok { display: Option<String> },
    /// Command failed with an error message
    Error(String),
    /// User requested to exit
    Exit,
    /// Show help
    Help,
}

/// Why a command could not run.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// The filesystem refused the operation; shown as the path and the
    /// signal text a protocol layer would report.
    #[error("{}: {}", .0.path(), .0.signal())]
    Fs(#[from] FsError),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("not a number: '{0}'")]
    InvalidNumber(String),
}

type CommandOutput = Result<Option<String>, CommandError>;

/// Execute a command line against the shell context.
pub fn execute(input: &str, ctx: &mut ShellContext) -> CommandResult {
    let input = input.trim();
    if input.is_empty() {
        return CommandResult::Ok { display: None };
    }

    let (command, args) = next_word(input);
    log::debug!("command {:?} args {:?}", command, args);

    let output = match command.to_lowercase().as_str() {
        "help" | "?" => return CommandResult::Help,
        "exit" | "quit" | "q" => return CommandResult::Exit,
        "ls" => cmd_ls(args, ctx),
        "stat" => cmd_stat(args, ctx),
        "mkdir" => cmd_mkdir(args, ctx),
        "touch" => cmd_touch(args, ctx),
        "open" => cmd_open(args, ctx),
        "cat" => cmd_cat(args, ctx),
        "write" => cmd_write(args, ctx),
        "append" => cmd_append(args, ctx),
        "rm" => cmd_rm(args, ctx),
        "rmdir" => cmd_rmdir(args, ctx),
        "cd" => cmd_cd(args, ctx),
        "pwd" => Ok(Some(ctx.current_path().to_string())),
        "tree" => cmd_tree(ctx),
        _ => {
            return CommandResult::Error(format!(
                "Unknown command: '{}'. Type 'help' for available commands.",
                command
            ))
        }
    };

    match output {
        Ok(display) => CommandResult::Ok { display },
        Err(e) => CommandResult::Error(e.to_string()),
    }
}

/// Split off the first whitespace-delimited word. The remainder keeps its
/// inner spacing and loses only leading whitespace.
fn next_word(input: &str) -> (&str, &str) {
    let input = input.trim_start();
    match input.find(char::is_whitespace) {
        Some(pos) => (&input[..pos], input[pos..].trim_start()),
        None => (input, ""),
    }
}

fn required_path<'a>(args: &'a str, usage: &'static str) -> Result<&'a str, CommandError> {
    let (path, _) = next_word(args);
    if path.is_empty() {
        return Err(CommandError::Usage(usage));
    }
    Ok(path)
}

fn parse_number<T: std::str::FromStr>(word: &str) -> Result<T, CommandError> {
    word.parse().map_err(|_| CommandError::InvalidNumber(word.to_string()))
}

fn cmd_ls(args: &str, ctx: &mut ShellContext) -> CommandOutput {
    let (target, _) = next_word(args);
    let path = if target.is_empty() {
        ctx.current_path().to_string()
    } else {
        ctx.resolve(target)
    };

    // Kinds come from the scanned entries themselves: a prefix sibling like
    // `/ab` listed under `/a` has no entry at `/a/b` to stat.
    let entries = ctx.fs().with(|fs| {
        fs.children(&path).map(|children| {
            children
                .map(|(name, e)| (name.to_string(), e.is_dir()))
                .collect::<Vec<_>>()
        })
    })?;

    let mut listing = vec![(".".to_string(), true)];
    if path != "/" {
        listing.push(("..".to_string(), true));
    }
    listing.extend(entries);

    let dir_style = Style::new().bold().fg(Color::Blue);
    let lines: Vec<String> = listing
        .into_iter()
        .map(|(name, is_dir)| {
            if is_dir {
                dir_style.paint(name).to_string()
            } else {
                name
            }
        })
        .collect();

    Ok(Some(lines.join("\n")))
}

fn cmd_stat(args: &str, ctx: &mut ShellContext) -> CommandOutput {
    let path = ctx.resolve(required_path(args, "stat <path>")?);
    let attrs = ctx.fs().getattr(&path)?;

    let kind = match attrs.kind {
        EntryKind::File => "file",
        EntryKind::Directory => "directory",
    };
    Ok(Some(format!(
        "  path: {}\n  kind: {}\n  size: {}\n  mode: {:o}\n nlink: {}",
        path, kind, attrs.size, attrs.mode, attrs.nlink
    )))
}

fn cmd_mkdir(args: &str, ctx: &mut ShellContext) -> CommandOutput {
    let path = ctx.resolve(required_path(args, "mkdir <path>")?);
    ctx.fs().mkdir(&path)?;
    Ok(None)
}

fn cmd_touch(args: &str, ctx: &mut ShellContext) -> CommandOutput {
    let path = ctx.resolve(required_path(args, "touch <path>")?);
    let fs = ctx.fs();
    match fs.mknod(&path) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {}
        Err(e) => return Err(e.into()),
    }
    fs.utimens(&path)?;
    Ok(None)
}

fn cmd_open(args: &str, ctx: &mut ShellContext) -> CommandOutput {
    let path = ctx.resolve(required_path(args, "open <path>")?);
    ctx.fs().open(&path)?;
    Ok(None)
}

fn cmd_cat(args: &str, ctx: &mut ShellContext) -> CommandOutput {
    const USAGE: &str = "cat <path> [offset] [size]";

    let (target, rest) = next_word(args);
    if target.is_empty() {
        return Err(CommandError::Usage(USAGE));
    }
    let path = ctx.resolve(target);

    let (offset, rest) = next_word(rest);
    let offset: u64 = if offset.is_empty() {
        0
    } else {
        parse_number(offset)?
    };

    let fs = ctx.fs();
    let (size, _) = next_word(rest);
    let size: usize = if size.is_empty() {
        // Whole file; a directory falls through to the read's own error
        let attrs = fs.getattr(&path)?;
        usize::try_from(attrs.size).unwrap_or(usize::MAX)
    } else {
        parse_number(size)?
    };

    let data = fs.read(&path, offset, size)?;
    Ok(Some(String::from_utf8_lossy(&data).into_owned()))
}

fn cmd_write(args: &str, ctx: &mut ShellContext) -> CommandOutput {
    const USAGE: &str = "write <path> <offset> <text>";

    let (target, rest) = next_word(args);
    let (offset, text) = next_word(rest);
    if target.is_empty() || offset.is_empty() {
        return Err(CommandError::Usage(USAGE));
    }
    let offset: u64 = parse_number(offset)?;

    let path = ctx.resolve(target);
    let written = ctx.fs().write(&path, offset, text.as_bytes())?;
    Ok(Some(format!("wrote {} bytes at {}", written, offset)))
}

fn cmd_append(args: &str, ctx: &mut ShellContext) -> CommandOutput {
    let (target, text) = next_word(args);
    if target.is_empty() {
        return Err(CommandError::Usage("append <path> <text>"));
    }

    let path = ctx.resolve(target);
    let fs = ctx.fs();
    let offset = fs.getattr(&path)?.size;
    let written = fs.write(&path, offset, text.as_bytes())?;
    Ok(Some(format!("wrote {} bytes at {}", written, offset)))
}

fn cmd_rm(args: &str, ctx: &mut ShellContext) -> CommandOutput {
    let path = ctx.resolve(required_path(args, "rm <path>")?);
    ctx.fs().unlink(&path)?;
    Ok(None)
}

fn cmd_rmdir(args: &str, ctx: &mut ShellContext) -> CommandOutput {
    let path = ctx.resolve(required_path(args, "rmdir <path>")?);
    ctx.fs().rmdir(&path)?;
    Ok(None)
}

fn cmd_cd(args: &str, ctx: &mut ShellContext) -> CommandOutput {
    let (target, _) = next_word(args);
    ctx.change_dir(if target.is_empty() { "/" } else { target })?;
    Ok(None)
}

/// Dump the store in key order, with no hierarchy applied.
fn cmd_tree(ctx: &mut ShellContext) -> CommandOutput {
    let lines = ctx.fs().with(|fs| {
        fs.store()
            .iter()
            .map(|entry| match entry.kind() {
                EntryKind::Directory => format!("{}  (dir)", entry.path()),
                EntryKind::File => format!("{}  ({} bytes)", entry.path(), entry.len()),
            })
            .collect::<Vec<_>>()
    });
    Ok(Some(lines.join("\n")))
}

/// Format help text
pub fn format_help() -> String {
    let cmd_style = Style::new().bold().fg(Color::Cyan);
    let arg_style = Style::new().fg(Color::Yellow);
    let desc_style = Style::new().fg(Color::White);

    let mut help = String::new();
    help.push_str(&format!(
        "{}\n\n",
        Style::new().bold().paint("pksfs Shell Commands")
    ));

    let commands = [
        ("ls", "[path]", "List a directory"),
        ("stat", "<path>", "Show entry attributes"),
        ("mkdir", "<path>", "Create a directory"),
        ("touch", "<path>", "Create an empty file if absent"),
        ("open", "<path>", "Open a file, creating it if absent"),
        ("cat", "<path> [offset] [size]", "Print file contents"),
        ("write", "<path> <offset> <text>", "Write text at an offset"),
        ("append", "<path> <text>", "Write text at the end of a file"),
        ("rm", "<path>", "Remove an entry"),
        ("rmdir", "<path>", "Remove an entry"),
        ("", "", ""),
        ("cd", "[path]", "Change current directory"),
        ("pwd", "", "Print current directory"),
        ("tree", "", "Dump every stored path in order"),
        ("", "", ""),
        ("help", "", "Show this help message"),
        ("exit", "", "Exit the shell (alias: quit, q, Ctrl-D)"),
    ];

    for (cmd, args, desc) in commands {
        if cmd.is_empty() {
            help.push('\n');
        } else {
            help.push_str(&format!(
                "  {:<8} {:<26} {}\n",
                cmd_style.paint(cmd),
                arg_style.paint(args),
                desc_style.paint(desc)
            ));
        }
    }

    help.push_str(&format!("\n{}\n", Style::new().bold().paint("Mirroring")));
    help.push_str(&format!(
        "  A write to {} is copied to {} when that file exists.\n",
        arg_style.paint("/a/b/c"),
        arg_style.paint("/b/a/c")
    ));

    help
}

#[cfg(test)]
mod tests {
    use super::*;
    use pksfs_path_store::SharedFs;

    fn run(ctx: &mut ShellContext, input: &str) -> Option<String> {
        match execute(input, ctx) {
            CommandResult::Ok { display } => display,
            CommandResult::Error(e) => panic!("{} failed: {}", input, e),
            _ => panic!("{} did not produce output", input),
        }
    }

    fn run_err(ctx: &mut ShellContext, input: &str) -> String {
        match execute(input, ctx) {
            CommandResult::Error(e) => e,
            _ => panic!("{} should have failed", input),
        }
    }

    fn plain(s: &str) -> String {
        // Strip ANSI escapes from styled listings
        let mut out = String::new();
        let mut chars = s.chars();
        while let Some(c) = chars.next() {
            if c == '\u{1b}' {
                for c in chars.by_ref() {
                    if c == 'm' {
                        break;
                    }
                }
            } else {
                out.push(c);
            }
        }
        out
    }

    fn ctx() -> ShellContext {
        ShellContext::new(SharedFs::default())
    }

    #[test]
    fn next_word_keeps_inner_spacing() {
        assert_eq!(next_word("write /f 0 a  b"), ("write", "/f 0 a  b"));
        assert_eq!(next_word("  pwd  "), ("pwd", ""));
        assert_eq!(next_word(""), ("", ""));
    }

    #[test]
    fn empty_line_is_noop() {
        let mut ctx = ctx();
        assert!(run(&mut ctx, "   ").is_none());
    }

    #[test]
    fn help_and_exit() {
        let mut ctx = ctx();
        assert!(matches!(execute("help", &mut ctx), CommandResult::Help));
        assert!(matches!(execute("?", &mut ctx), CommandResult::Help));
        assert!(matches!(execute("exit", &mut ctx), CommandResult::Exit));
        assert!(matches!(execute("QUIT", &mut ctx), CommandResult::Exit));
    }

    #[test]
    fn unknown_command() {
        let mut ctx = ctx();
        assert!(run_err(&mut ctx, "frobnicate").contains("Unknown command"));
    }

    #[test]
    fn mkdir_touch_ls() {
        let mut ctx = ctx();
        run(&mut ctx, "mkdir /a");
        run(&mut ctx, "touch /a/f");

        let listing = plain(&run(&mut ctx, "ls /a").unwrap());
        assert_eq!(listing, ".\n..\nf");

        let root = plain(&run(&mut ctx, "ls").unwrap());
        assert_eq!(root, ".\na");
    }

    #[test]
    fn ls_styles_directories() {
        let mut ctx = ctx();
        run(&mut ctx, "mkdir /d");
        run(&mut ctx, "touch /f");

        let listing = run(&mut ctx, "ls /").unwrap();
        let styled = Style::new().bold().fg(Color::Blue).paint("d").to_string();
        assert!(listing.contains(&styled));
        assert!(listing.ends_with("\nf"));
    }

    #[test]
    fn ls_styles_prefix_siblings_by_their_own_kind() {
        let mut ctx = ctx();
        run(&mut ctx, "mkdir /a");
        run(&mut ctx, "touch /a/f");
        run(&mut ctx, "mkdir /ab");

        let listing = run(&mut ctx, "ls /a").unwrap();
        let dir = |name: &str| Style::new().bold().fg(Color::Blue).paint(name).to_string();
        let lines: Vec<&str> = listing.lines().collect();
        assert_eq!(lines, vec![dir(".").as_str(), dir("..").as_str(), "f", dir("b").as_str()]);
    }

    #[test]
    fn touch_existing_file_succeeds() {
        let mut ctx = ctx();
        run(&mut ctx, "open /f");
        run(&mut ctx, "write /f 0 keep");
        run(&mut ctx, "touch /f");
        assert_eq!(run(&mut ctx, "cat /f").unwrap(), "keep");
    }

    #[test]
    fn write_and_cat() {
        let mut ctx = ctx();
        run(&mut ctx, "open /f");
        assert_eq!(
            run(&mut ctx, "write /f 0 hello  world").unwrap(),
            "wrote 12 bytes at 0"
        );
        assert_eq!(run(&mut ctx, "cat /f").unwrap(), "hello  world");
        assert_eq!(run(&mut ctx, "cat /f 7").unwrap(), "world");
        assert_eq!(run(&mut ctx, "cat /f 0 5").unwrap(), "hello");
        assert_eq!(run(&mut ctx, "cat /f 100").unwrap(), "");
    }

    #[test]
    fn write_requires_existing_file() {
        let mut ctx = ctx();
        assert_eq!(run_err(&mut ctx, "write /f 0 x"), "/f: no such entry");
    }

    #[test]
    fn append_extends() {
        let mut ctx = ctx();
        run(&mut ctx, "open /log");
        run(&mut ctx, "append /log one,");
        assert_eq!(run(&mut ctx, "append /log two").unwrap(), "wrote 3 bytes at 4");
        assert_eq!(run(&mut ctx, "cat /log").unwrap(), "one,two");
    }

    #[test]
    fn gap_writes_read_back_as_zeros() {
        let mut ctx = ctx();
        run(&mut ctx, "open /f");
        run(&mut ctx, "write /f 3 x");
        assert_eq!(run(&mut ctx, "cat /f").unwrap(), "\0\0\0x");
    }

    #[test]
    fn stat_reports_attributes() {
        let mut ctx = ctx();
        run(&mut ctx, "mkdir /d");
        run(&mut ctx, "open /d/f");
        run(&mut ctx, "write /d/f 0 abc");

        let file = run(&mut ctx, "stat /d/f").unwrap();
        assert!(file.contains("kind: file"));
        assert!(file.contains("size: 3"));
        assert!(file.contains("mode: 100444"));

        let dir = run(&mut ctx, "stat /d").unwrap();
        assert!(dir.contains("kind: directory"));
        assert!(dir.contains("mode: 40755"));
        assert!(dir.contains("nlink: 2"));
    }

    #[test]
    fn errors_show_path_and_signal() {
        let mut ctx = ctx();
        run(&mut ctx, "mkdir /d");
        run(&mut ctx, "touch /f");

        assert_eq!(run_err(&mut ctx, "stat /nope"), "/nope: no such entry");
        assert_eq!(run_err(&mut ctx, "ls /f"), "/f: not a directory");
        assert_eq!(run_err(&mut ctx, "cat /d 0 1"), "/d: is a directory");
        assert_eq!(run_err(&mut ctx, "mkdir /d"), "/d: already exists");
        assert_eq!(run_err(&mut ctx, "rmdir /"), "/: entry is busy");
    }

    #[test]
    fn usage_and_number_errors() {
        let mut ctx = ctx();
        assert_eq!(run_err(&mut ctx, "stat"), "usage: stat <path>");
        assert_eq!(
            run_err(&mut ctx, "write /f"),
            "usage: write <path> <offset> <text>"
        );
        assert_eq!(run_err(&mut ctx, "write /f ten x"), "not a number: 'ten'");
        assert_eq!(run_err(&mut ctx, "cat /f -1"), "not a number: '-1'");
    }

    #[test]
    fn relative_paths_follow_cd() {
        let mut ctx = ctx();
        run(&mut ctx, "mkdir /a");
        run(&mut ctx, "cd a");
        assert_eq!(run(&mut ctx, "pwd").unwrap(), "/a");

        run(&mut ctx, "touch f");
        run(&mut ctx, "write ./f 0 rel");
        assert_eq!(run(&mut ctx, "cat /a/f").unwrap(), "rel");

        run(&mut ctx, "cd ..");
        assert_eq!(run(&mut ctx, "pwd").unwrap(), "/");

        run(&mut ctx, "cd a");
        run(&mut ctx, "cd");
        assert_eq!(run(&mut ctx, "pwd").unwrap(), "/");
    }

    #[test]
    fn rm_leaves_children_in_place() {
        let mut ctx = ctx();
        run(&mut ctx, "mkdir /a");
        run(&mut ctx, "touch /a/b");
        run(&mut ctx, "rmdir /a");

        assert_eq!(run_err(&mut ctx, "ls /a"), "/a: no such entry");
        let tree = run(&mut ctx, "tree").unwrap();
        assert_eq!(tree, "/  (dir)\n/a/b  (0 bytes)");
    }

    #[test]
    fn rm_removes_file() {
        let mut ctx = ctx();
        run(&mut ctx, "touch /f");
        run(&mut ctx, "rm /f");
        assert_eq!(run(&mut ctx, "tree").unwrap(), "/  (dir)");
    }

    #[test]
    fn mirrored_write_shows_in_twin() {
        let mut ctx = ctx();
        run(&mut ctx, "touch /x/y/f");
        run(&mut ctx, "touch /y/x/f");
        run(&mut ctx, "write /x/y/f 0 twin");
        assert_eq!(run(&mut ctx, "cat /y/x/f").unwrap(), "twin");
    }

    #[test]
    fn tree_is_store_order() {
        let mut ctx = ctx();
        for cmd in ["mkdir /b", "touch /a-x", "mkdir /a", "touch /a/z"] {
            run(&mut ctx, cmd);
        }
        let tree = run(&mut ctx, "tree").unwrap();
        let paths: Vec<&str> = tree
            .lines()
            .map(|l| l.split_whitespace().next().unwrap())
            .collect();
        assert_eq!(paths, vec!["/", "/a", "/a-x", "/a/z", "/b"]);
    }

    #[test]
    fn help_lists_commands() {
        let help = format_help();
        for cmd in ["ls", "stat", "cat", "write", "append", "tree", "exit"] {
            assert!(help.contains(cmd), "missing {}", cmd);
        }
    }
}
