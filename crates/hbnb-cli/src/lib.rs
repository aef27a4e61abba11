//! HBNB command interpreter.
//!
//! The [`Dispatcher`] turns console lines into store operations; the `hbnb`
//! binary wraps it in a REPL, a one-shot `-c` mode and a script mode.

pub mod commands;
pub mod completer;
pub mod dispatcher;
pub mod error;
pub mod session;

pub use dispatcher::{Dispatcher, Outcome};
pub use error::CommandError;
pub use session::{run_lines, SessionEnd};
