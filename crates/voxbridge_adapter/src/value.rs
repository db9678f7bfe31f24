//! Dynamic values crossing the scripting boundary.

use std::fmt;

/// One argument or payload at the scripting boundary. This is the fixed
/// external representation the host runtime marshals to and from; the adapter
/// never extends it per generation.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Str(String),
    U32(u32),
    Bool(bool),
    IntList(Vec<i64>),
    FloatList(Vec<f32>),
    Bytes(Vec<u8>),
}

impl Value {
    /// Human-readable type name used in marshalling errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Str(_) => "string",
            Value::U32(_) => "u32",
            Value::Bool(_) => "bool",
            Value::IntList(_) => "int list",
            Value::FloatList(_) => "float list",
            Value::Bytes(_) => "bytes",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "{s:?}"),
            Value::U32(n) => write!(f, "{n}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::IntList(items) => write!(f, "int list of {}", items.len()),
            Value::FloatList(items) => write!(f, "float list of {}", items.len()),
            Value::Bytes(bytes) => write!(f, "{} bytes", bytes.len()),
        }
    }
}

/// Result object handed back to the scripting caller.
///
/// `code` carries the engine's integer result code where the generation has
/// one; `flag` carries the bare success flag of the boolean generations;
/// `value` is the payload, if any. Engine-reported failures travel in `code`
/// or `flag` untouched — they are data, not adapter errors.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Reply {
    pub code: Option<i32>,
    pub flag: Option<bool>,
    pub value: Option<Value>,
}

impl Reply {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn code(code: i32) -> Self {
        Self {
            code: Some(code),
            ..Self::default()
        }
    }

    pub fn value(value: Value) -> Self {
        Self {
            value: Some(value),
            ..Self::default()
        }
    }

    pub fn code_value(code: i32, value: Value) -> Self {
        Self {
            code: Some(code),
            value: Some(value),
            ..Self::default()
        }
    }

    pub fn flag_value(flag: bool, value: Value) -> Self {
        Self {
            flag: Some(flag),
            value: Some(value),
            ..Self::default()
        }
    }

    pub fn flag(flag: bool) -> Self {
        Self {
            flag: Some(flag),
            ..Self::default()
        }
    }

    /// True when the engine reported success (or the operation carries no
    /// status at all).
    pub fn is_ok(&self) -> bool {
        self.code.is_none_or(|code| code == 0) && self.flag.is_none_or(|flag| flag)
    }
}
