mod commands;
mod error;
mod logging;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};

use crate::commands::{Commands, GenerateArgs};
use crate::error::CliError;

#[derive(Parser)]
#[command(name = "changeset-autogen")]
#[command(bin_name = "changeset-autogen")]
#[command(about = "Generate a changeset from the latest commit", long_about = None)]
struct Cli {
    /// Path to start project discovery from (default: current directory)
    #[arg(long = "path", short = 'C', global = true)]
    path: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress outcome reporting on stdout
    #[arg(long, short = 'q', global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    generate: GenerateArgs,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let command = match select_command(cli.command, cli.generate) {
        Ok(command) => command,
        Err(e) => e.exit(),
    };
    logging::init(cli.verbose);

    let start_path = match resolve_start_path(cli.path) {
        Ok(path) => path,
        Err(e) => {
            print_error(&e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = command.execute(&start_path, cli.quiet) {
        print_error(&e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

/// Top-level generate options only apply when no subcommand is given.
fn select_command(
    command: Option<Commands>,
    generate: GenerateArgs,
) -> Result<Commands, clap::Error> {
    match command {
        None => Ok(Commands::Generate(generate)),
        Some(_) if generate.is_set() => Err(Cli::command().error(
            ErrorKind::ArgumentConflict,
            "generate options must follow the `generate` subcommand",
        )),
        Some(command) => Ok(command),
    }
}

fn resolve_start_path(path: Option<PathBuf>) -> Result<PathBuf, CliError> {
    match path {
        Some(p) => Ok(p),
        None => std::env::current_dir().map_err(CliError::CurrentDir),
    }
}

fn print_error(error: &CliError) {
    eprintln!("error: {error}");

    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        eprintln!("caused by: {cause}");
        source = std::error::Error::source(cause);
    }
}
