//! Host-independent shell loop.

use pksfs_path_store::SharedFs;

use crate::commands::{self, CommandResult};
use crate::context::ShellContext;
use crate::host::TerminalHost;
use crate::io::{ExitReason, IoError, IoHost, Output, PromptConfig, Signal};

/// The shell loop and its state.
pub struct ReplCore {
    ctx: ShellContext,
}

impl ReplCore {
    pub fn new(fs: SharedFs) -> Self {
        Self {
            ctx: ShellContext::new(fs),
        }
    }

    /// Run the loop, reading and writing through `io`.
    pub fn run(&mut self, io: &mut impl IoHost) -> Result<ExitReason, IoError> {
        io.write_output(Output::banner(BANNER))?;

        loop {
            self.update_prompt(io)?;
            io.wait_for_input()?;

            if let Some(signal) = io.read_signal()? {
                match signal {
                    Signal::Eof => {
                        io.write_output(Output::info("Goodbye!"))?;
                        io.flush()?;
                        return Ok(ExitReason::Eof);
                    }
                    Signal::Interrupt => {
                        io.write_output(Output::info("^C (use 'exit' to quit)"))?;
                        continue;
                    }
                }
            }

            let input = match io.read_input()? {
                Some(input) => input,
                None => continue,
            };

            match commands::execute(&input.line, &mut self.ctx) {
                CommandResult::Ok { display: None } => {}
                CommandResult::Ok {
                    display: Some(output),
                } => {
                    io.write_output(Output::normal(output))?;
                }
                CommandResult::Error(msg) => {
                    io.write_output(Output::error(msg))?;
                }
                CommandResult::Help => {
                    io.write_output(Output::normal(commands::format_help()))?;
                }
                CommandResult::Exit => {
                    io.write_output(Output::info("Goodbye!"))?;
                    io.flush()?;
                    return Ok(ExitReason::UserExit);
                }
            }

            io.flush()?;
        }
    }

    pub fn context(&self) -> &ShellContext {
        &self.ctx
    }

    fn update_prompt(&self, io: &mut impl IoHost) -> Result<(), IoError> {
        io.write_prompt(PromptConfig {
            entry_count: self.ctx.entry_count(),
            current_path: self.ctx.current_path().to_string(),
        })
    }
}

/// Run an interactive shell over `fs` on the terminal.
pub fn run(fs: SharedFs) -> Result<ExitReason, IoError> {
    let mut host = TerminalHost::new(fs.clone())?;
    ReplCore::new(fs).run(&mut host)
}

const BANNER: &str = r#"
       _          __
 _ __ | | _____  / _|___
| '_ \| |/ / __|| |_/ __|
| |_) |   <\__ \|  _\__ \
| .__/|_|\_\___/|_| |___/
|_|

In-memory filesystem shell. Type 'help' for commands, 'exit' to quit.
"#;
