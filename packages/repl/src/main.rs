use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use pksfs_path_store::{FsConfig, SharedFs};
use pksfs_repl::host::EDIT_MODE_VAR;

/// pksfs - shell over an in-memory path-keyed filesystem
#[derive(Parser, Debug)]
#[command(name = "pksfs")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON filesystem configuration
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Seed a file at /<NAME> before the shell starts
    #[arg(long)]
    name: Option<String>,

    /// Contents of the seeded file
    #[arg(long, default_value = pksfs_repl::DEFAULT_CONTENTS, requires = "name")]
    contents: String,

    /// Force vi editing mode
    #[arg(long, conflicts_with = "emacs")]
    vi: bool,

    /// Force emacs editing mode
    #[arg(long)]
    emacs: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    if args.vi {
        std::env::set_var(EDIT_MODE_VAR, "vi");
    } else if args.emacs {
        std::env::set_var(EDIT_MODE_VAR, "emacs");
    }

    let config = match &args.config {
        Some(path) => match FsConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
        },
        None => FsConfig::default(),
    };
    log::info!("starting with {:?}", config);

    let fs = SharedFs::new(config);
    if let Some(name) = &args.name {
        if let Err(e) = pksfs_repl::seed(&fs, name, &args.contents) {
            eprintln!("Error: cannot seed /{}: {}", name, e);
            return ExitCode::FAILURE;
        }
    }

    match pksfs_repl::run(fs) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
