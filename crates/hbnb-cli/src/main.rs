//! HBNB Command Interpreter
//!
//! An interactive console for creating, inspecting and updating records
//! persisted in a JSON file.

mod repl;

use clap::Parser;
use hbnb_cli::{run_lines, Dispatcher};
use hbnb_core::{FileStorage, StorageConfig};
use std::io::{self, BufReader, IsTerminal};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// HBNB Command Interpreter
#[derive(Parser, Debug)]
#[command(name = "hbnb")]
#[command(version, about = "HBNB Command Interpreter")]
pub struct Args {
    /// Backing JSON file
    #[arg(long, default_value = hbnb_core::storage::DEFAULT_FILE)]
    pub file: PathBuf,

    /// Execute a single command and exit
    #[arg(short = 'c', long)]
    pub command: Option<String>,

    /// Execute commands from a file
    #[arg(short = 'f', long)]
    pub script: Option<PathBuf>,

    /// Indent the backing file when writing it
    #[arg(long)]
    pub pretty: bool,
}

fn main() {
    // Logs go to stderr so stdout carries only console output
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("hbnb=warn")),
        )
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = StorageConfig::new(&args.file).with_pretty(args.pretty);
    let mut dispatcher = Dispatcher::new(FileStorage::open(config)?);

    if let Some(command) = &args.command {
        // Command mode: execute one line and exit
        run_command_mode(&mut dispatcher, command)
    } else if let Some(script) = &args.script {
        // Script mode: execute lines from a file, skipping `#` comments
        let file = std::fs::File::open(script)?;
        run_lines(&mut dispatcher, BufReader::new(file), &mut io::stdout(), true)?;
        Ok(())
    } else if io::stdin().is_terminal() {
        repl::run(dispatcher)
    } else {
        // Piped input behaves like typing it, ending with end-of-input
        let stdin = io::stdin();
        let end = run_lines(&mut dispatcher, stdin.lock(), &mut io::stdout(), false)?;
        if end == hbnb_cli::SessionEnd::Exhausted {
            println!();
        }
        Ok(())
    }
}

/// Execute a single line; a console error sets a failing exit status.
fn run_command_mode(
    dispatcher: &mut Dispatcher,
    command: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    match dispatcher.execute(command) {
        Ok(outcome) => {
            hbnb_cli::session::emit(&mut io::stdout(), Ok(outcome))?;
            Ok(())
        }
        Err(e) => {
            println!("{}", e);
            std::process::exit(1);
        }
    }
}
