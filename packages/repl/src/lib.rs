//! # pksfs-repl
//!
//! An interactive shell over a [`pksfs_path_store::SharedFs`].
//!
//! Every command goes through the same [`FsCallbacks`](pksfs_path_store::FsCallbacks)
//! a kernel bridge would call, so the shell shows exactly what a mounted
//! filesystem would report, error signals included.
//!
//! ## Usage
//!
//! ```bash
//! pksfs --name hello
//!
//! # Inside the shell:
//! > ls
//! > cat /hello
//! > touch /a/b/f
//! > touch /b/a/f
//! > write /a/b/f 0 mirrored
//! > cat /b/a/f
//! ```

pub mod commands;
pub mod completer;
pub mod context;
pub mod highlighter;
pub mod host;
pub mod io;
pub mod repl;
pub mod seed;

pub use context::ShellContext;
pub use repl::run;
pub use seed::{seed, DEFAULT_CONTENTS};
