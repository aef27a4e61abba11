//! Line dispatch against the store.
//!
//! Every line yields exactly one [`Outcome`] or one [`CommandError`]. The
//! checks for an invocation run in a fixed order and the first failure wins:
//! kind given, kind known, id given, record present, then the update
//! arguments. Mutations are flushed before `execute` returns; a failed flush
//! undoes the mutation in memory.

use crate::commands;
use crate::error::CommandError;
use hbnb_core::value::repr_str;
use hbnb_core::{FileStorage, Kind, Record, Value};
use hbnb_lang::{Arguments, DictLiteral, Invocation, Operation, Statement};
use tracing::debug;

/// What a successfully handled line produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A line to print.
    Output(String),
    /// Nothing to print.
    Silent,
    /// `quit`: end the session.
    Quit,
    /// End of input: print an empty line, then end the session.
    EndOfInput,
}

impl Outcome {
    /// Whether the session ends after this outcome.
    pub fn is_exit(&self) -> bool {
        matches!(self, Outcome::Quit | Outcome::EndOfInput)
    }
}

type Handler = fn(&mut Dispatcher, Invocation) -> Result<Outcome, CommandError>;

/// Handler for each operation.
const HANDLERS: &[(Operation, Handler)] = &[
    (Operation::Create, Dispatcher::create),
    (Operation::Show, Dispatcher::show),
    (Operation::Destroy, Dispatcher::destroy),
    (Operation::Update, Dispatcher::update),
    (Operation::All, Dispatcher::all),
    (Operation::Count, Dispatcher::count),
];

/// Executes console lines against one store.
pub struct Dispatcher {
    storage: FileStorage,
}

impl Dispatcher {
    pub fn new(storage: FileStorage) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &FileStorage {
        &self.storage
    }

    /// Parse and execute one line.
    pub fn execute(&mut self, line: &str) -> Result<Outcome, CommandError> {
        let statement = hbnb_lang::parse(line).map_err(|e| {
            debug!("{}", e.format_with_source(line));
            CommandError::from(e)
        })?;

        match statement {
            Statement::Empty => Ok(Outcome::Silent),
            Statement::Quit => Ok(Outcome::Quit),
            Statement::Eof => Ok(Outcome::EndOfInput),
            Statement::Help(topic) => Ok(Outcome::Output(commands::help(topic.as_deref()))),
            Statement::Invocation(invocation) => {
                debug!(
                    operation = invocation.operation.name(),
                    kind = invocation.kind.as_deref().unwrap_or(""),
                    syntax = ?invocation.syntax,
                    "dispatch"
                );
                let handler = HANDLERS
                    .iter()
                    .find(|(op, _)| *op == invocation.operation)
                    .map(|(_, handler)| *handler)
                    .ok_or_else(|| {
                        CommandError::from(hbnb_lang::ParseError::unknown_syntax(line))
                    })?;
                handler(self, invocation)
            }
        }
    }

    fn create(&mut self, inv: Invocation) -> Result<Outcome, CommandError> {
        let kind = resolve_kind(inv.kind.as_deref())?;
        let record = Record::new(kind);
        let id = record.id().to_string();
        let key = record.key();
        self.storage.register(record);
        if let Err(e) = self.storage.flush() {
            self.storage.remove(&key);
            return Err(e.into());
        }
        Ok(Outcome::Output(id))
    }

    fn show(&mut self, inv: Invocation) -> Result<Outcome, CommandError> {
        let key = self.existing_key(&inv)?;
        let record = self.storage.get(&key).ok_or(CommandError::NoInstanceFound)?;
        Ok(Outcome::Output(record.to_string()))
    }

    fn destroy(&mut self, inv: Invocation) -> Result<Outcome, CommandError> {
        let key = self.existing_key(&inv)?;
        let index = self.storage.all().get_index_of(&key);
        if let Some((index, record)) = index.zip(self.storage.remove(&key)) {
            if let Err(e) = self.storage.flush() {
                self.storage.all_mut().shift_insert(index, key, record);
                return Err(e.into());
            }
        }
        Ok(Outcome::Silent)
    }

    fn update(&mut self, inv: Invocation) -> Result<Outcome, CommandError> {
        let key = self.existing_key(&inv)?;

        let changes = match inv.args {
            Arguments::Positional {
                attribute, value, ..
            } => {
                let attribute = attribute.ok_or(CommandError::AttributeNameMissing)?;
                let value = value.ok_or(CommandError::ValueMissing)?;
                vec![(attribute, value)]
            }
            Arguments::Dictionary { literal, .. } => match literal {
                DictLiteral::Valid(fields) => fields,
                DictLiteral::Invalid(text) => {
                    debug!(literal = %text, "rejected dictionary");
                    return Err(CommandError::InvalidDictionary);
                }
            },
        };

        let record = self
            .storage
            .get_mut(&key)
            .ok_or(CommandError::NoInstanceFound)?;
        let updated = apply_changes(record, changes)?;
        let previous = std::mem::replace(record, updated);
        if let Err(e) = self.storage.flush() {
            self.storage.register(previous);
            return Err(e.into());
        }
        Ok(Outcome::Silent)
    }

    fn all(&mut self, inv: Invocation) -> Result<Outcome, CommandError> {
        let kind = match inv.kind.as_deref() {
            Some(name) => Some(resolve_kind(Some(name))?),
            None => None,
        };
        let name = kind.map(Kind::name);
        let items: Vec<String> = self
            .storage
            .filter(name)
            .map(|record| repr_str(&record.to_string()))
            .collect();
        Ok(Outcome::Output(format!("[{}]", items.join(", "))))
    }

    fn count(&mut self, inv: Invocation) -> Result<Outcome, CommandError> {
        let kind = resolve_kind(inv.kind.as_deref())?;
        Ok(Outcome::Output(self.storage.count(kind.name()).to_string()))
    }

    /// Run the kind and id checks and return the key of an existing record.
    fn existing_key(&self, inv: &Invocation) -> Result<String, CommandError> {
        let kind = resolve_kind(inv.kind.as_deref())?;
        let id = inv
            .args
            .id()
            .filter(|id| !id.is_empty())
            .ok_or(CommandError::InstanceIdMissing)?;
        let key = format!("{}.{}", kind, id);
        if self.storage.get(&key).is_none() {
            return Err(CommandError::NoInstanceFound);
        }
        Ok(key)
    }
}

fn resolve_kind(name: Option<&str>) -> Result<Kind, CommandError> {
    let name = name
        .filter(|n| !n.is_empty())
        .ok_or(CommandError::ClassNameMissing)?;
    Ok(name.parse::<Kind>()?)
}

/// Apply every change to a copy of `record`, touching it once.
///
/// The first rejected value aborts the whole update and leaves the stored
/// record as it was.
fn apply_changes(record: &Record, changes: Vec<(String, Value)>) -> Result<Record, CommandError> {
    let mut updated = record.clone();
    for (name, value) in changes {
        updated.update(&name, value)?;
    }
    updated.touch();
    Ok(updated)
}
