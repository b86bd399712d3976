// Fri Jan 16 2026 - Alex

use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// Host-side value produced from a script result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Variant {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Sequence(Vec<Variant>),
    Mapping(IndexMap<String, Variant>),
}

impl Variant {
    pub fn sequence(items: Vec<Variant>) -> Self {
        Variant::Sequence(items)
    }

    pub fn mapping(entries: IndexMap<String, Variant>) -> Self {
        Variant::Mapping(entries)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Variant::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Variant::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Variant::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Variant::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&Vec<Variant>> {
        match self {
            Variant::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&IndexMap<String, Variant>> {
        match self {
            Variant::Mapping(entries) => Some(entries),
            _ => None,
        }
    }

    /// Looks up `key` when this is a mapping.
    pub fn get(&self, key: &str) -> Option<&Variant> {
        self.as_mapping().and_then(|entries| entries.get(key))
    }

    /// Element count for sequences and mappings, `None` for scalars.
    pub fn len(&self) -> Option<usize> {
        match self {
            Variant::Sequence(items) => Some(items.len()),
            Variant::Mapping(entries) => Some(entries.len()),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Variant::Null => "null",
            Variant::Bool(_) => "bool",
            Variant::Number(_) => "number",
            Variant::String(_) => "string",
            Variant::Sequence(_) => "sequence",
            Variant::Mapping(_) => "mapping",
        }
    }

    /// Renders the value as JSON. Non-finite numbers become `null`.
    pub fn to_json_string(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}

impl Default for Variant {
    fn default() -> Self {
        Variant::Null
    }
}

impl From<bool> for Variant {
    fn from(b: bool) -> Self {
        Variant::Bool(b)
    }
}

impl From<f64> for Variant {
    fn from(n: f64) -> Self {
        Variant::Number(n)
    }
}

impl From<i32> for Variant {
    fn from(n: i32) -> Self {
        Variant::Number(n as f64)
    }
}

impl From<&str> for Variant {
    fn from(s: &str) -> Self {
        Variant::String(s.to_string())
    }
}

impl From<String> for Variant {
    fn from(s: String) -> Self {
        Variant::String(s)
    }
}

impl From<Vec<Variant>> for Variant {
    fn from(items: Vec<Variant>) -> Self {
        Variant::Sequence(items)
    }
}

impl From<IndexMap<String, Variant>> for Variant {
    fn from(entries: IndexMap<String, Variant>) -> Self {
        Variant::Mapping(entries)
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Null => write!(f, "null"),
            Variant::Bool(b) => write!(f, "{}", b),
            Variant::Number(n) => write!(f, "{}", n),
            Variant::String(s) => write!(f, "{}", s),
            Variant::Sequence(items) => {
                write!(f, "[")?;
                for (i, v) in items.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{}", v)?;
                }
                write!(f, "]")
            }
            Variant::Mapping(entries) => {
                write!(f, "{{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{}: {}", k, v)?;
                }
                write!(f, "}}")
            }
        }
    }
}
