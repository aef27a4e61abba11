//! Syntax tree types for console input.

use hbnb_core::Value;

/// A parsed input line.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// A blank line.
    Empty,
    /// `quit`: end the session.
    Quit,
    /// `EOF` typed as a command: end the session like end-of-input.
    Eof,
    /// `help [topic]`.
    Help(Option<String>),
    /// A store operation.
    Invocation(Invocation),
}

/// Store operations, shared by both surface syntaxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Create,
    Show,
    Destroy,
    Update,
    All,
    Count,
}

/// Lookup table from operation name to operation.
const OPERATIONS: &[(&str, Operation)] = &[
    ("create", Operation::Create),
    ("show", Operation::Show),
    ("destroy", Operation::Destroy),
    ("update", Operation::Update),
    ("all", Operation::All),
    ("count", Operation::Count),
];

impl Operation {
    /// Look up an operation by its command name.
    pub fn from_name(name: &str) -> Option<Operation> {
        OPERATIONS
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, op)| *op)
    }

    /// The command name.
    pub fn name(self) -> &'static str {
        OPERATIONS
            .iter()
            .find(|(_, op)| *op == self)
            .map(|(n, _)| *n)
            .unwrap_or_default()
    }

    /// Every operation name, in table order.
    pub fn names() -> impl Iterator<Item = &'static str> {
        OPERATIONS.iter().map(|(n, _)| *n)
    }
}

/// Which surface syntax produced an invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Syntax {
    /// `<operation> <kind> [<id>] ...`
    Command,
    /// `<Kind>.<operation>(...)`
    MethodCall,
}

/// An operation with its unvalidated arguments.
///
/// Presence and existence checks happen in the dispatcher, in the fixed
/// order the console reports them, so every argument here is optional.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub operation: Operation,
    pub syntax: Syntax,
    pub kind: Option<String>,
    pub args: Arguments,
}

/// Arguments following the kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Arguments {
    /// `id`, `attribute`, `value` in order; trailing ones may be absent.
    Positional {
        id: Option<String>,
        attribute: Option<String>,
        value: Option<Value>,
    },
    /// `id, {dictionary}` from the method-call form.
    Dictionary { id: String, literal: DictLiteral },
}

impl Arguments {
    /// No arguments at all.
    pub fn none() -> Self {
        Arguments::Positional {
            id: None,
            attribute: None,
            value: None,
        }
    }

    /// The id argument, if given.
    pub fn id(&self) -> Option<&str> {
        match self {
            Arguments::Positional { id, .. } => id.as_deref(),
            Arguments::Dictionary { id, .. } => Some(id),
        }
    }
}

/// A dictionary literal, kept even when malformed so the error can be
/// reported after the kind and id checks.
#[derive(Debug, Clone, PartialEq)]
pub enum DictLiteral {
    /// Parsed attribute updates, in literal order.
    Valid(Vec<(String, Value)>),
    /// The literal text did not parse as an object.
    Invalid(String),
}
