//! Default attribute definitions.

use crate::value::{Value, ValueType};

/// A default attribute declared by a kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldDef {
    /// Attribute name.
    pub name: &'static str,
    /// Default value.
    pub default: DefaultValue,
}

/// Default value for a field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DefaultValue {
    /// Empty string.
    EmptyString,
    /// Zero integer.
    Zero,
    /// Zero float.
    ZeroFloat,
    /// Empty list.
    EmptyList,
}

impl FieldDef {
    pub(crate) const fn new(name: &'static str, default: DefaultValue) -> Self {
        Self { name, default }
    }

    /// Type the field's default carries.
    pub fn value_type(&self) -> ValueType {
        self.default.to_value().value_type()
    }
}

impl DefaultValue {
    /// Materialize the default as a value.
    pub fn to_value(self) -> Value {
        match self {
            DefaultValue::EmptyString => Value::String(String::new()),
            DefaultValue::Zero => Value::Int(0),
            DefaultValue::ZeroFloat => Value::Float(0.0),
            DefaultValue::EmptyList => Value::List(Vec::new()),
        }
    }
}
