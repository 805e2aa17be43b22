/*!
Dynamic payload values

Field bindings and method results are dynamically typed in the host
scenario this crate targets, so both are represented by a small
self-describing [`Value`](enum.Value.html) enum. This is a payload
representation only: sum-type values themselves compare by identity
(see [`variant`](../variant/index.html)), never by payload equality.
*/
use ahash::RandomState;
use indexmap::IndexMap;
use std::fmt::{self, Display, Formatter};

/// An ordered record of named values, in insertion order
pub type Record = IndexMap<String, Value, RandomState>;

/// A dynamic value: a field binding or a method/handler result
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The absence of a meaningful result
    Unit,
    /// A boolean
    Bool(bool),
    /// A signed integer
    Int(i64),
    /// A floating-point number
    Float(f64),
    /// A string
    Str(String),
    /// An ordered list of values
    List(Vec<Value>),
    /// An ordered record of named values
    Record(Record),
}

impl Value {
    /// Build a record value from name/value pairs, preserving iteration order
    pub fn record<K, I>(pairs: I) -> Value
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Value::Record(pairs.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
    /// Check whether this value is the unit value
    #[inline]
    pub fn is_unit(&self) -> bool {
        *self == Value::Unit
    }
    /// Get this value as a boolean, if it is one
    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
    /// Get this value as an integer, if it is one
    #[inline]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }
    /// Get this value as a float, if it is one
    #[inline]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(x) => Some(*x),
            _ => None,
        }
    }
    /// Get this value as a string slice, if it is a string
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }
    /// Get this value as a slice of values, if it is a list
    #[inline]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }
    /// Get this value as a record, if it is one
    #[inline]
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }
}

impl From<()> for Value {
    #[inline]
    fn from(_: ()) -> Value {
        Value::Unit
    }
}

impl From<bool> for Value {
    #[inline]
    fn from(b: bool) -> Value {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    #[inline]
    fn from(i: i64) -> Value {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    #[inline]
    fn from(i: i32) -> Value {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    #[inline]
    fn from(x: f64) -> Value {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    #[inline]
    fn from(s: &str) -> Value {
        Value::Str(s.to_owned())
    }
}

impl From<String> for Value {
    #[inline]
    fn from(s: String) -> Value {
        Value::Str(s)
    }
}

impl From<Vec<Value>> for Value {
    #[inline]
    fn from(items: Vec<Value>) -> Value {
        Value::List(items)
    }
}

impl Display for Value {
    fn fmt(&self, fmt: &mut Formatter) -> Result<(), fmt::Error> {
        match self {
            Value::Unit => write!(fmt, "()"),
            Value::Bool(b) => write!(fmt, "{}", b),
            Value::Int(i) => write!(fmt, "{}", i),
            Value::Float(x) => write!(fmt, "{}", x),
            Value::Str(s) => write!(fmt, "{}", s),
            Value::List(items) => {
                write!(fmt, "[")?;
                for (ix, item) in items.iter().enumerate() {
                    if ix > 0 {
                        write!(fmt, ", ")?;
                    }
                    write!(fmt, "{}", item)?;
                }
                write!(fmt, "]")
            }
            Value::Record(record) => {
                write!(fmt, "{{")?;
                for (ix, (name, value)) in record.iter().enumerate() {
                    if ix > 0 {
                        write!(fmt, ", ")?;
                    }
                    write!(fmt, "{}: {}", name, value)?;
                }
                write!(fmt, "}}")
            }
        }
    }
}
