//! HBNB console syntax
//!
//! This crate parses console input lines into statements. Two surface
//! syntaxes reach the same operations.
//!
//! # Command Syntax
//!
//! Words are split shell-style, so quoted values may contain spaces.
//!
//! ```text
//! create User
//! show User 38f22813-2753-4d42-b37c-57a17f1e4f88
//! destroy User 38f22813-2753-4d42-b37c-57a17f1e4f88
//! all
//! all Place
//! count City
//! update User 38f22813-2753-4d42-b37c-57a17f1e4f88 first_name "Betty Bar"
//! ```
//!
//! # Method-Call Syntax
//!
//! ```text
//! User.all()
//! User.count()
//! User.show(38f22813-2753-4d42-b37c-57a17f1e4f88)
//! User.destroy(38f22813-2753-4d42-b37c-57a17f1e4f88)
//! User.update(38f22813-2753-4d42-b37c-57a17f1e4f88, first_name, "John")
//! User.update(38f22813-2753-4d42-b37c-57a17f1e4f88, {'first_name': "John", "age": 89})
//! ```
//!
//! # Session Commands
//!
//! ```text
//! help
//! help update
//! quit
//! EOF
//! ```
//!
//! # Usage
//!
//! ```rust
//! use hbnb_lang::{parse, Operation, Statement};
//!
//! match parse("User.count()").unwrap() {
//!     Statement::Invocation(inv) => assert_eq!(inv.operation, Operation::Count),
//!     _ => unreachable!(),
//! }
//! ```

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod span;

// Re-export main types
pub use ast::{Arguments, DictLiteral, Invocation, Operation, Statement, Syntax};
pub use error::{ParseError, ParseErrorKind};
pub use span::Span;

/// Parse one line of console input.
///
/// # Example
///
/// ```rust
/// use hbnb_lang::{parse, Statement};
///
/// assert_eq!(parse("quit").unwrap(), Statement::Quit);
/// ```
pub fn parse(source: &str) -> Result<Statement, ParseError> {
    parser::parse(source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_syntaxes_reach_the_same_operation() {
        let id = "38f22813-2753-4d42-b37c-57a17f1e4f88";
        let command = parse(&format!("show User {}", id)).unwrap();
        let method = parse(&format!("User.show({})", id)).unwrap();

        match (command, method) {
            (Statement::Invocation(a), Statement::Invocation(b)) => {
                assert_eq!(a.operation, b.operation);
                assert_eq!(a.kind, b.kind);
                assert_eq!(a.args, b.args);
                assert_ne!(a.syntax, b.syntax);
            }
            other => panic!("expected invocations, got {:?}", other),
        }
    }

    #[test]
    fn test_errors_carry_messages() {
        let err = parse("launch rockets").unwrap_err();
        assert_eq!(err.to_string(), "Unknown syntax: launch rockets");
    }
}
