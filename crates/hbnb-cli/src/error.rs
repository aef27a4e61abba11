//! Console error lines.

use hbnb_lang::{ParseError, ParseErrorKind};
use thiserror::Error;

/// A command failure. `Display` renders the exact line the console prints.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("** class name missing **")]
    ClassNameMissing,

    #[error("** class doesn't exist **")]
    ClassDoesNotExist,

    #[error("** instance id missing **")]
    InstanceIdMissing,

    #[error("** no instance found **")]
    NoInstanceFound,

    #[error("** attribute name missing **")]
    AttributeNameMissing,

    #[error("** value missing **")]
    ValueMissing,

    #[error("** invalid dictionary **")]
    InvalidDictionary,

    /// Input that is neither a command nor a method call.
    #[error("*** {0}")]
    UnknownSyntax(ParseError),

    /// Input that could not be split into words.
    #[error("** {0} **")]
    Syntax(ParseError),

    /// The value was rejected by the record.
    #[error("** {0} **")]
    Value(hbnb_core::Error),

    /// Reading or writing the backing file failed.
    #[error("** storage error: {0} **")]
    Storage(hbnb_core::Error),
}

impl From<ParseError> for CommandError {
    fn from(err: ParseError) -> Self {
        match err.kind {
            ParseErrorKind::UnknownSyntax => CommandError::UnknownSyntax(err),
            ParseErrorKind::UnclosedQuote | ParseErrorKind::DanglingEscape => {
                CommandError::Syntax(err)
            }
        }
    }
}

impl From<hbnb_core::Error> for CommandError {
    fn from(err: hbnb_core::Error) -> Self {
        use hbnb_core::Error;
        match err {
            Error::UnknownKind(_) => CommandError::ClassDoesNotExist,
            Error::ReadOnly(_) | Error::Coercion { .. } => CommandError::Value(err),
            Error::Io(_) | Error::Json(_) | Error::InvalidSnapshot { .. } => {
                CommandError::Storage(err)
            }
        }
    }
}
