//! Positional, typed argument extraction.
//!
//! Every exposed operation documents its arguments as `(index, type)` pairs;
//! this module enforces that contract before anything is converted to a
//! native representation. Violations are reported with the index and both the
//! expected and the actual type so the scripting caller can fix the call
//! site.

use thiserror::Error;

use crate::value::Value;

#[derive(Debug, Error)]
pub enum MarshalError {
    #[error("argument {index} is missing; expected {expected}")]
    MissingArg { index: usize, expected: &'static str },

    #[error("argument {index} has type {actual}; expected {expected}")]
    WrongType {
        index: usize,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("argument {index} must be exactly 16 uuid bytes, got {actual}")]
    InvalidUuid { index: usize, actual: usize },

    #[error("uuid string {value:?} is not 32 hex digits")]
    InvalidUuidString { value: String },

    #[error("string argument contains an interior NUL byte")]
    NulInString,

    #[error("parallel sequences differ in length: {left_name} has {left}, {right_name} has {right}")]
    LengthMismatch {
        left_name: &'static str,
        left: usize,
        right_name: &'static str,
        right: usize,
    },
}

/// Borrowed view over the positional arguments of one call.
#[derive(Clone, Copy)]
pub struct CallArgs<'a> {
    values: &'a [Value],
}

impl<'a> CallArgs<'a> {
    pub fn new(values: &'a [Value]) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn at(&self, index: usize, expected: &'static str) -> Result<&'a Value, MarshalError> {
        self.values
            .get(index)
            .ok_or(MarshalError::MissingArg { index, expected })
    }

    pub fn str_at(&self, index: usize) -> Result<&'a str, MarshalError> {
        match self.at(index, "string")? {
            Value::Str(s) => Ok(s),
            other => Err(MarshalError::WrongType {
                index,
                expected: "string",
                actual: other.kind(),
            }),
        }
    }

    pub fn u32_at(&self, index: usize) -> Result<u32, MarshalError> {
        match self.at(index, "u32")? {
            Value::U32(n) => Ok(*n),
            other => Err(MarshalError::WrongType {
                index,
                expected: "u32",
                actual: other.kind(),
            }),
        }
    }

    pub fn bool_at(&self, index: usize) -> Result<bool, MarshalError> {
        match self.at(index, "bool")? {
            Value::Bool(b) => Ok(*b),
            other => Err(MarshalError::WrongType {
                index,
                expected: "bool",
                actual: other.kind(),
            }),
        }
    }

    pub fn int_list_at(&self, index: usize) -> Result<&'a [i64], MarshalError> {
        match self.at(index, "int list")? {
            Value::IntList(items) => Ok(items),
            other => Err(MarshalError::WrongType {
                index,
                expected: "int list",
                actual: other.kind(),
            }),
        }
    }

    pub fn float_list_at(&self, index: usize) -> Result<&'a [f32], MarshalError> {
        match self.at(index, "float list")? {
            Value::FloatList(items) => Ok(items),
            other => Err(MarshalError::WrongType {
                index,
                expected: "float list",
                actual: other.kind(),
            }),
        }
    }

    /// UUIDs cross the boundary as fixed 16-byte buffers, never as strings,
    /// so truncation and padding mismatches cannot occur.
    pub fn uuid_at(&self, index: usize) -> Result<[u8; 16], MarshalError> {
        match self.at(index, "bytes")? {
            Value::Bytes(bytes) => {
                bytes
                    .as_slice()
                    .try_into()
                    .map_err(|_| MarshalError::InvalidUuid {
                        index,
                        actual: bytes.len(),
                    })
            }
            other => Err(MarshalError::WrongType {
                index,
                expected: "bytes",
                actual: other.kind(),
            }),
        }
    }
}

/// Reject parallel sequences whose lengths differ, before any native buffer
/// is sized from them.
pub fn check_same_length(
    left_name: &'static str,
    left: usize,
    right_name: &'static str,
    right: usize,
) -> Result<(), MarshalError> {
    if left == right {
        Ok(())
    } else {
        Err(MarshalError::LengthMismatch {
            left_name,
            left,
            right_name,
            right,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_contract_is_enforced() {
        let values = [Value::Str("dict".into()), Value::U32(3)];
        let args = CallArgs::new(&values);

        assert_eq!(args.str_at(0).unwrap(), "dict");
        assert_eq!(args.u32_at(1).unwrap(), 3);

        let err = args.u32_at(0).unwrap_err();
        assert!(matches!(
            err,
            MarshalError::WrongType { index: 0, expected: "u32", actual: "string" }
        ));

        let err = args.bool_at(2).unwrap_err();
        assert!(matches!(err, MarshalError::MissingArg { index: 2, .. }));
    }

    #[test]
    fn test_uuid_requires_exactly_sixteen_bytes() {
        let short = [Value::Bytes(vec![0u8; 15])];
        let err = CallArgs::new(&short).uuid_at(0).unwrap_err();
        assert!(matches!(err, MarshalError::InvalidUuid { actual: 15, .. }));

        let exact = [Value::Bytes((0u8..16).collect())];
        let uuid = CallArgs::new(&exact).uuid_at(0).unwrap();
        assert_eq!(uuid[15], 15);
    }

    #[test]
    fn test_length_mismatch_is_rejected() {
        let err = check_same_length("vowel", 5, "consonant", 3).unwrap_err();
        assert!(err.to_string().contains("vowel has 5"));
        assert!(err.to_string().contains("consonant has 3"));
        assert!(check_same_length("vowel", 4, "consonant", 4).is_ok());
    }
}
