//! Runtime value types

use super::super::computation::Callable;
use super::super::errors::GuestError;
use super::super::index::{normalize_index, normalize_slice_bounds_optional};
use serde::{Deserialize, Serialize};
use std::rc::Rc;

/// Capability tag shared by everything the guest can hold a reference to
pub trait RootValue {}

/// Runtime value type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "t", content = "v")]
pub enum Val {
    Null,
    Bool(bool),
    Int(i64),
    Str(String),
    List(Vec<Val>),
    /// Host routine registered into a module; never serialized
    #[serde(skip)]
    Func(Rc<Callable>),
}

impl RootValue for Val {}

impl Val {
    pub fn type_name(&self) -> &'static str {
        match self {
            Val::Null => "null",
            Val::Bool(_) => "bool",
            Val::Int(_) => "int",
            Val::Str(_) => "string",
            Val::List(_) => "list",
            Val::Func(_) => "function",
        }
    }

    /// Check if value is truthy (for conditionals)
    pub fn is_truthy(&self) -> bool {
        match self {
            Val::Bool(b) => *b,
            Val::Null => false,
            _ => true,
        }
    }

    pub fn as_int(&self) -> Result<i64, GuestError> {
        match self {
            Val::Int(i) => Ok(*i),
            other => Err(GuestError::type_error("int", other.type_name())),
        }
    }

    pub fn as_str(&self) -> Result<&str, GuestError> {
        match self {
            Val::Str(s) => Ok(s),
            other => Err(GuestError::type_error("string", other.type_name())),
        }
    }

    /// Length of a sequence value (lists count elements, strings count chars)
    pub fn len(&self) -> Result<usize, GuestError> {
        match self {
            Val::List(items) => Ok(items.len()),
            Val::Str(s) => Ok(s.chars().count()),
            other => Err(GuestError::type_error("sequence", other.type_name())),
        }
    }

    /// Element access with negative-index wraparound
    pub fn index(&self, i: i64) -> Result<Val, GuestError> {
        match self {
            Val::List(items) => {
                let i = normalize_index(i, items.len())?;
                Ok(items[i].clone())
            }
            Val::Str(s) => {
                let chars: Vec<char> = s.chars().collect();
                let i = normalize_index(i, chars.len())?;
                Ok(Val::Str(chars[i].to_string()))
            }
            other => Err(GuestError::type_error("sequence", other.type_name())),
        }
    }

    /// Half-open slice; absent bounds default to the whole sequence
    pub fn slice(&self, start: Option<i64>, end: Option<i64>) -> Result<Val, GuestError> {
        match self {
            Val::List(items) => {
                let (i, j) = normalize_slice_bounds_optional(start, end, items.len())?;
                Ok(Val::List(items[i..j].to_vec()))
            }
            Val::Str(s) => {
                let chars: Vec<char> = s.chars().collect();
                let (i, j) = normalize_slice_bounds_optional(start, end, chars.len())?;
                Ok(Val::Str(chars[i..j].iter().collect()))
            }
            other => Err(GuestError::type_error("sequence", other.type_name())),
        }
    }
}

impl From<i64> for Val {
    fn from(i: i64) -> Self {
        Val::Int(i)
    }
}

impl From<&str> for Val {
    fn from(s: &str) -> Self {
        Val::Str(s.to_string())
    }
}

impl From<String> for Val {
    fn from(s: String) -> Self {
        Val::Str(s)
    }
}
