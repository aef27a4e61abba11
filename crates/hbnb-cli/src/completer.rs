//! Tab completion for the REPL.

use crate::commands;
use hbnb_core::Kind;
use hbnb_lang::Operation;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};
use std::borrow::Cow;

/// REPL helper completing command names, kinds and method names.
pub struct HbnbHelper {
    /// Kind names offered for completion.
    pub kinds: Vec<&'static str>,
}

impl HbnbHelper {
    pub fn new() -> Self {
        Self {
            kinds: Kind::ALL.iter().map(|k| k.name()).collect(),
        }
    }

    /// Candidates for the word ending at `pos`, and where that word starts.
    pub fn candidates(&self, line: &str, pos: usize) -> (usize, Vec<String>) {
        let line_to_cursor = &line[..pos];

        let word_start = line_to_cursor
            .rfind(|c: char| c.is_whitespace() || c == '(' || c == '.' || c == ',')
            .map(|i| i + 1)
            .unwrap_or(0);
        let word = &line_to_cursor[word_start..];
        let before = line_to_cursor[..word_start].trim_start();

        let options: Vec<&str> = if before.is_empty() {
            // Start of line: a command, or a kind for the method-call form
            commands::topics().chain(self.kinds.iter().copied()).collect()
        } else if before.ends_with('.') && !before[..before.len() - 1].contains(|c: char| c.is_whitespace() || c == '.') {
            // `<Kind>.` - operation names
            Operation::names().collect()
        } else if !before.trim_end().contains(char::is_whitespace) && before.ends_with(char::is_whitespace) {
            // Second word of a command
            match before.trim_end() {
                "help" => commands::topics().collect(),
                head if Operation::from_name(head).is_some() => self.kinds.clone(),
                _ => Vec::new(),
            }
        } else {
            Vec::new()
        };

        let completions = options
            .into_iter()
            .filter(|candidate| candidate.starts_with(word))
            .map(str::to_string)
            .collect();
        (word_start, completions)
    }
}

impl Default for HbnbHelper {
    fn default() -> Self {
        Self::new()
    }
}

impl Completer for HbnbHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, candidates) = self.candidates(line, pos);
        let pairs = candidates
            .into_iter()
            .map(|c| Pair {
                display: c.clone(),
                replacement: c,
            })
            .collect();
        Ok((start, pairs))
    }
}

impl Hinter for HbnbHelper {
    type Hint = String;

    fn hint(&self, _line: &str, _pos: usize, _ctx: &Context<'_>) -> Option<String> {
        None
    }
}

impl Highlighter for HbnbHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Borrowed(line)
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: rustyline::highlight::CmdKind) -> bool {
        false
    }
}

impl Validator for HbnbHelper {}

impl Helper for HbnbHelper {}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete(line: &str) -> Vec<String> {
        HbnbHelper::new().candidates(line, line.len()).1
    }

    #[test]
    fn test_helper_knows_every_kind() {
        let helper = HbnbHelper::new();
        assert_eq!(helper.kinds.len(), Kind::ALL.len());
        assert!(helper.kinds.contains(&"Review"));
    }

    #[test]
    fn test_first_word() {
        assert_eq!(complete("cr"), vec!["create"]);
        assert_eq!(complete("Pl"), vec!["Place"]);
        assert!(complete("").contains(&"quit".to_string()));
    }

    #[test]
    fn test_kind_after_command() {
        assert_eq!(complete("show U"), vec!["User"]);
        assert_eq!(complete("create "), HbnbHelper::new().kinds.iter().map(|k| k.to_string()).collect::<Vec<_>>());
        assert_eq!(complete("help up"), vec!["update"]);
        assert!(complete("show User ").is_empty());
    }

    #[test]
    fn test_method_after_dot() {
        assert_eq!(complete("User.co"), vec!["count"]);
        assert_eq!(HbnbHelper::new().candidates("User.", 5).0, 5);
        assert!(complete("User.show(a.").is_empty());
    }
}
