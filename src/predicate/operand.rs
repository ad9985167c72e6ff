//! Operand - the right-hand side of a constraint.
//!
//! An `Operand` is a JSON-like value. Its shape is expected to match the
//! constraint's operator (an array for `containedIn` / `containsAll`, a scalar
//! for the rest), but nothing here enforces that; see
//! [`Validator`](super::validation::Validator) for the opt-in check.
//!
//! # Example
//!
//! ```rust
//! use photonql::Operand;
//!
//! let age = Operand::from(25);
//! let name = Operand::from("dave");
//! let tags = Operand::from(vec!["admin", "ops"]);
//!
//! assert!(age.is_scalar());
//! assert_eq!(name.as_str(), Some("dave"));
//! assert!(tags.is_array());
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A constraint operand.
///
/// Serializes untagged, so the wire form is plain JSON. Integers and floats are
/// kept apart to make `25` come out as `25`, not `25.0`. Integers that only fit
/// in a `u64` land in `Unsigned`; everything else that is integral is `Integer`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Operand {
    Null,
    Boolean(bool),
    Integer(i64),
    Unsigned(u64),
    Number(f64),
    String(String),
    Array(Vec<Operand>),
    Object(BTreeMap<String, Operand>),
}

impl Operand {
    /// Check if operand is null
    pub fn is_null(&self) -> bool {
        matches!(self, Operand::Null)
    }

    /// Check if operand is an array
    pub fn is_array(&self) -> bool {
        matches!(self, Operand::Array(_))
    }

    /// Anything that is not an array.
    pub fn is_scalar(&self) -> bool {
        !self.is_array()
    }

    /// Get as string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Operand::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get as integer
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Operand::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Get as unsigned integer
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Operand::Integer(n) => u64::try_from(*n).ok(),
            Operand::Unsigned(n) => Some(*n),
            _ => None,
        }
    }

    /// Get as number, widening integers
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Operand::Integer(n) => Some(*n as f64),
            Operand::Unsigned(n) => Some(*n as f64),
            Operand::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get as boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Operand::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as array
    pub fn as_array(&self) -> Option<&[Operand]> {
        match self {
            Operand::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Get as object
    pub fn as_object(&self) -> Option<&BTreeMap<String, Operand>> {
        match self {
            Operand::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Short name of the value's kind, used in validation messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Operand::Null => "null",
            Operand::Boolean(_) => "boolean",
            Operand::Integer(_) | Operand::Unsigned(_) | Operand::Number(_) => "number",
            Operand::String(_) => "string",
            Operand::Array(_) => "array",
            Operand::Object(_) => "object",
        }
    }
}

// Conversions
impl From<bool> for Operand {
    fn from(b: bool) -> Self {
        Operand::Boolean(b)
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Operand {
                fn from(n: $ty) -> Self {
                    Operand::Integer(i64::from(n))
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for Operand {
    fn from(n: u64) -> Self {
        match i64::try_from(n) {
            Ok(n) => Operand::Integer(n),
            Err(_) => Operand::Unsigned(n),
        }
    }
}

impl From<usize> for Operand {
    fn from(n: usize) -> Self {
        Operand::from(n as u64)
    }
}

impl From<f32> for Operand {
    fn from(n: f32) -> Self {
        Operand::Number(f64::from(n))
    }
}

impl From<f64> for Operand {
    fn from(n: f64) -> Self {
        Operand::Number(n)
    }
}

impl From<String> for Operand {
    fn from(s: String) -> Self {
        Operand::String(s)
    }
}

impl From<&str> for Operand {
    fn from(s: &str) -> Self {
        Operand::String(s.to_string())
    }
}

impl<T: Into<Operand>> From<Vec<T>> for Operand {
    fn from(items: Vec<T>) -> Self {
        Operand::Array(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Operand>, const N: usize> From<[T; N]> for Operand {
    fn from(items: [T; N]) -> Self {
        Operand::Array(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Clone + Into<Operand>> From<&[T]> for Operand {
    fn from(items: &[T]) -> Self {
        Operand::Array(items.iter().cloned().map(Into::into).collect())
    }
}

impl<T: Into<Operand>> From<Option<T>> for Operand {
    fn from(value: Option<T>) -> Self {
        value.map_or(Operand::Null, Into::into)
    }
}

impl From<BTreeMap<String, Operand>> for Operand {
    fn from(obj: BTreeMap<String, Operand>) -> Self {
        Operand::Object(obj)
    }
}

impl From<serde_json::Value> for Operand {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Operand::Null,
            serde_json::Value::Bool(b) => Operand::Boolean(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Operand::Integer(i)
                } else if let Some(u) = n.as_u64() {
                    Operand::Unsigned(u)
                } else {
                    Operand::Number(n.as_f64().unwrap_or(0.0))
                }
            }
            serde_json::Value::String(s) => Operand::String(s),
            serde_json::Value::Array(arr) => {
                Operand::Array(arr.into_iter().map(Operand::from).collect())
            }
            serde_json::Value::Object(obj) => {
                Operand::Object(obj.into_iter().map(|(k, v)| (k, Operand::from(v))).collect())
            }
        }
    }
}

impl From<Operand> for serde_json::Value {
    fn from(operand: Operand) -> Self {
        match operand {
            Operand::Null => serde_json::Value::Null,
            Operand::Boolean(b) => serde_json::Value::Bool(b),
            Operand::Integer(n) => serde_json::Value::from(n),
            Operand::Unsigned(n) => serde_json::Value::from(n),
            // Non-finite floats have no JSON spelling
            Operand::Number(n) => serde_json::Number::from_f64(n)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Operand::String(s) => serde_json::Value::String(s),
            Operand::Array(arr) => {
                serde_json::Value::Array(arr.into_iter().map(serde_json::Value::from).collect())
            }
            Operand::Object(obj) => serde_json::Value::Object(
                obj.into_iter()
                    .map(|(k, v)| (k, serde_json::Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl std::fmt::Display for Operand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operand::Null => write!(f, "null"),
            Operand::Boolean(b) => write!(f, "{}", b),
            Operand::Integer(n) => write!(f, "{}", n),
            Operand::Unsigned(n) => write!(f, "{}", n),
            Operand::Number(n) => write!(f, "{}", n),
            Operand::String(s) => write!(f, "{:?}", s),
            Operand::Array(arr) => {
                write!(f, "[")?;
                for (i, item) in arr.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Operand::Object(obj) => {
                write!(f, "{{")?;
                for (i, (key, value)) in obj.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{:?}: {}", key, value)?;
                }
                write!(f, "}}")
            }
        }
    }
}
