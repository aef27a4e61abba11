//! Runtime attribute values.
//!
//! Records carry an open set of attributes. Each attribute holds a [`Value`],
//! a tagged variant over the JSON-representable types. Updates coming from the
//! console are re-cast to the attribute's current type through
//! [`Value::coerce_to`], which is the one place the conversion policy lives.

use crate::error::Error;
use serde_json::Number;
use std::fmt;

/// An attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Null value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// 64-bit signed integer.
    Int(i64),
    /// 64-bit floating point.
    Float(f64),
    /// UTF-8 string.
    String(String),
    /// Ordered list of values.
    List(Vec<Value>),
    /// Nested object, insertion ordered.
    Object(Vec<(String, Value)>),
}

/// The type tag of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Null,
    Bool,
    Int,
    Float,
    String,
    List,
    Object,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::Null => "NoneType",
            ValueType::Bool => "bool",
            ValueType::Int => "int",
            ValueType::Float => "float",
            ValueType::String => "str",
            ValueType::List => "list",
            ValueType::Object => "dict",
        };
        f.write_str(name)
    }
}

impl Value {
    /// Get the type tag of this value.
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Null => ValueType::Null,
            Value::Bool(_) => ValueType::Bool,
            Value::Int(_) => ValueType::Int,
            Value::Float(_) => ValueType::Float,
            Value::String(_) => ValueType::String,
            Value::List(_) => ValueType::List,
            Value::Object(_) => ValueType::Object,
        }
    }

    /// Infer a value from a bare command-line token.
    ///
    /// Integer literals become [`Value::Int`], float literals
    /// [`Value::Float`], everything else stays a string.
    pub fn infer(token: &str) -> Value {
        if let Ok(i) = token.parse::<i64>() {
            return Value::Int(i);
        }
        if looks_numeric(token) {
            if let Some(f) = token.parse::<f64>().ok().filter(|f| f.is_finite()) {
                return Value::Float(f);
            }
        }
        Value::String(token.to_string())
    }

    /// Convert this value to `target`.
    ///
    /// A `Null` target accepts anything unchanged. Conversions that would
    /// need guessing (a word into an int, a scalar into a list) fail with
    /// [`Error::Coercion`], as does any float that is not finite.
    pub fn coerce_to(self, target: ValueType) -> Result<Value, Error> {
        let fail = || Error::Coercion { target };

        match (target, self) {
            (ValueType::Null, v) => Ok(v),

            (ValueType::String, Value::String(s)) => Ok(Value::String(s)),
            (ValueType::String, v) => Ok(Value::String(v.to_display_string())),

            (ValueType::Int, Value::Int(i)) => Ok(Value::Int(i)),
            (ValueType::Int, Value::Bool(b)) => Ok(Value::Int(b as i64)),
            (ValueType::Int, Value::Float(f)) if f.is_finite() => Ok(Value::Int(f.trunc() as i64)),
            (ValueType::Int, Value::String(s)) => {
                s.trim().parse::<i64>().map(Value::Int).map_err(|_| fail())
            }

            (ValueType::Float, Value::Float(f)) if f.is_finite() => Ok(Value::Float(f)),
            (ValueType::Float, Value::Int(i)) => Ok(Value::Float(i as f64)),
            (ValueType::Float, Value::Bool(b)) => Ok(Value::Float(if b { 1.0 } else { 0.0 })),
            (ValueType::Float, Value::String(s)) => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .map(Value::Float)
                .ok_or_else(fail),

            (ValueType::Bool, Value::Bool(b)) => Ok(Value::Bool(b)),
            (ValueType::Bool, Value::Int(i)) => Ok(Value::Bool(i != 0)),
            (ValueType::Bool, Value::String(s)) => match s.trim() {
                "true" | "True" | "1" => Ok(Value::Bool(true)),
                "false" | "False" | "0" => Ok(Value::Bool(false)),
                _ => Err(fail()),
            },

            (ValueType::List, Value::List(items)) => Ok(Value::List(items)),
            (ValueType::Object, Value::Object(fields)) => Ok(Value::Object(fields)),
            (ValueType::List | ValueType::Object, Value::String(s)) => {
                let parsed: serde_json::Value =
                    serde_json::from_str(&s.replace('\'', "\"")).map_err(|_| fail())?;
                let value = Value::from(parsed);
                if value.value_type() == target {
                    Ok(value)
                } else {
                    Err(fail())
                }
            }

            _ => Err(fail()),
        }
    }

    /// Render the way `str()` would: strings bare, everything else as a literal.
    pub fn to_display_string(&self) -> String {
        match self {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }

    /// Convert to a JSON value for persistence.
    ///
    /// Non-finite floats have no JSON form and are written as `null`.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Int(i) => serde_json::Value::Number((*i).into()),
            Value::Float(f) => Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::List(items) => serde_json::Value::Array(items.iter().map(Value::to_json).collect()),
            Value::Object(fields) => serde_json::Value::Object(
                fields
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => n
                    .as_f64()
                    .filter(|f| f.is_finite())
                    .map_or(Value::Null, Value::Float),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                Value::Object(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

/// Renders the value as a Python literal (`'text'`, `True`, `None`, `[1, 2]`).
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("None"),
            Value::Bool(true) => f.write_str("True"),
            Value::Bool(false) => f.write_str("False"),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => f.write_str(&repr_float(*x)),
            Value::String(s) => f.write_str(&repr_str(s)),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Value::Object(fields) => {
                f.write_str("{")?;
                for (i, (key, value)) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", repr_str(key), value)?;
                }
                f.write_str("}")
            }
        }
    }
}

fn looks_numeric(token: &str) -> bool {
    token.chars().any(|c| c.is_ascii_digit())
        && token
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'))
}

/// Quote a string as a Python string literal.
///
/// Single quotes are preferred; double quotes are used when the text contains
/// a single quote and no double quote.
pub fn repr_str(s: &str) -> String {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if (c as u32) < 0x20 || c as u32 == 0x7f => {
                out.push_str(&format!("\\x{:02x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

/// Format a float the way Python's `repr` does.
pub fn repr_float(x: f64) -> String {
    if x.is_nan() {
        return "nan".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    // Debug already picks the shortest round-trip digits and switches to
    // scientific notation at the same magnitudes Python does.
    let debug = format!("{:?}", x);
    match debug.split_once('e') {
        Some((mantissa, exp)) => {
            let (sign, digits) = match exp.strip_prefix('-') {
                Some(d) => ('-', d),
                None => ('+', exp),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => debug,
    }
}
