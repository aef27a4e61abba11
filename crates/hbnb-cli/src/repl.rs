//! Interactive REPL implementation.

use hbnb_cli::completer::HbnbHelper;
use hbnb_cli::session::emit;
use hbnb_cli::Dispatcher;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{Config, Editor};
use std::io;
use std::path::PathBuf;
use tracing::warn;

const PROMPT: &str = "(hbnb) ";

/// Get the history file path.
fn history_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".hbnb_history")
}

/// Run the interactive REPL.
pub fn run(mut dispatcher: Dispatcher) -> Result<(), Box<dyn std::error::Error>> {
    let rl_config = Config::builder()
        .history_ignore_space(true)
        .auto_add_history(true)
        .build();

    let mut rl: Editor<HbnbHelper, DefaultHistory> = Editor::with_config(rl_config)?;
    rl.set_helper(Some(HbnbHelper::new()));

    let hist_path = history_path();
    if hist_path.exists() {
        let _ = rl.load_history(&hist_path);
    }

    let mut stdout = io::stdout();
    loop {
        match rl.readline(PROMPT) {
            Ok(line) => {
                if !emit(&mut stdout, dispatcher.execute(&line))? {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => {
                println!();
                break;
            }
            Err(err) => {
                warn!(error = %err, "readline failed");
                return Err(err.into());
            }
        }
    }

    if let Err(e) = rl.save_history(&hist_path) {
        warn!(path = %hist_path.display(), error = %e, "could not save history");
    }

    Ok(())
}
