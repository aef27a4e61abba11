//! Non-interactive sessions and outcome printing.

use crate::dispatcher::{Dispatcher, Outcome};
use crate::error::CommandError;
use std::io::{self, BufRead, Write};

/// Print the result of one line. Returns `false` when the session ends.
///
/// Errors are ordinary console output and go to the same stream.
pub fn emit<W: Write>(out: &mut W, result: Result<Outcome, CommandError>) -> io::Result<bool> {
    match result {
        Ok(Outcome::Output(text)) => writeln!(out, "{}", text)?,
        Ok(Outcome::Silent) => {}
        Ok(Outcome::Quit) => return Ok(false),
        Ok(Outcome::EndOfInput) => {
            writeln!(out)?;
            return Ok(false);
        }
        Err(e) => writeln!(out, "{}", e)?,
    }
    Ok(true)
}

/// How a line-by-line session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// A `quit` or `EOF` command ended it.
    Exited,
    /// The input ran out.
    Exhausted,
}

/// Execute every line of `input`.
///
/// With `skip_comments`, lines starting with `#` are ignored; otherwise they
/// go to the dispatcher like any typed line.
pub fn run_lines<R: BufRead, W: Write>(
    dispatcher: &mut Dispatcher,
    input: R,
    out: &mut W,
    skip_comments: bool,
) -> io::Result<SessionEnd> {
    for line in input.lines() {
        let line = line?;
        if skip_comments && line.trim_start().starts_with('#') {
            continue;
        }
        if !emit(out, dispatcher.execute(&line))? {
            return Ok(SessionEnd::Exited);
        }
    }
    Ok(SessionEnd::Exhausted)
}
