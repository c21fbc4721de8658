// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! The dynamic value vocabulary synthesized members traffic in.
//!
//! Generated methods are closures over [`Value`], so a synthesized type can
//! return the nothing-sentinel, primitive data, or another instance without
//! the builder knowing anything about the caller's domain types.
//!
//! Equality is the one place this vocabulary is not purely structural:
//! comparing an [`Value::Instance`] consults the instance's type-level
//! conversions behavior, in both directions, so a null instance compares
//! equal to its configured null-equivalents.

use std::fmt;

use ecow::EcoString;

use crate::object::NullObject;

/// A dynamically typed value.
#[derive(Debug, Clone)]
pub enum Value {
    /// The nothing-sentinel — what absence looks like at runtime.
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Integer(i64),
    /// A floating-point number.
    Float(f64),
    /// A string.
    String(EcoString),
    /// An instance of a synthesized null type.
    Instance(NullObject),
}

impl Value {
    /// Whether this is the nothing-sentinel.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// A short name for the value's kind, for diagnostics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Instance(_) => "instance",
        }
    }

    /// Structural equality that never consults conversions behavior.
    ///
    /// Used when matching a candidate against a configured null-equivalent
    /// list: an [`Value::Instance`] is never literally equal to anything, so
    /// instances of *other* null types do not leak in through the
    /// nothing-sentinel entry.
    #[must_use]
    pub(crate) fn literal_eq(a: &Value, b: &Value) -> bool {
        match (a, b) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(x), Value::Bool(y)) => x == y,
            (Value::Integer(x), Value::Integer(y)) => x == y,
            (Value::Float(x), Value::Float(y)) => x == y,
            (Value::String(x), Value::String(y)) => x == y,
            _ => false,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Instance(a), b) => a.null_eq(b),
            (a, Value::Instance(b)) => b.null_eq(a),
            _ => Value::literal_eq(self, other),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::String(s) => write!(f, "{s}"),
            Value::Instance(o) => write!(f, "{}", o.inspect()),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.into())
    }
}

impl From<EcoString> for Value {
    fn from(s: EcoString) -> Self {
        Value::String(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_eq_is_structural() {
        assert!(Value::literal_eq(&Value::Null, &Value::Null));
        assert!(Value::literal_eq(&Value::Integer(3), &Value::Integer(3)));
        assert!(!Value::literal_eq(&Value::Integer(3), &Value::Float(3.0)));
        assert!(!Value::literal_eq(&Value::Null, &Value::Bool(false)));
    }

    #[test]
    fn display_forms() {
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::Integer(-4).to_string(), "-4");
        assert_eq!(Value::from("hi").to_string(), "hi");
    }

    #[test]
    fn kind_names() {
        assert_eq!(Value::Null.kind(), "null");
        assert_eq!(Value::from(1i64).kind(), "integer");
        assert_eq!(Value::from("x").kind(), "string");
    }
}
