// Parsed path units. No reference to any target structure lives here.

use std::fmt;
use serde_json::{Map, Value};

/// Key or index of one path segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldName {
    Key(String),             // plain field, or bracket content that had no digits
    Index(i64),              // content of `[...]`, integer-prefix coerced
}

/// Container a step needs when it has to be materialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Container {
    Object,
    Array,
}

/// One parsed segment: the name plus the container type used to step through it.
///
/// The terminal field of a path normally carries no container.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field {
    pub name: FieldName,
    pub container: Option<Container>,
}

impl FieldName {
    pub fn key(name: impl Into<String>) -> Self {
        FieldName::Key(name.into())
    }

    /// Integer-prefix coercion applied to names that follow an array step.
    ///
    /// Leading whitespace and a sign are accepted, trailing garbage is ignored
    /// (`"2x"` -> `2`). Text without any leading digits stays a key.
    pub fn coerce_index(raw: String) -> Self {
        let trimmed = raw.trim_start();
        let (negative, digits) = match trimmed.as_bytes().first() {
            Some(b'-') => (true, &trimmed[1..]),
            Some(b'+') => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };
        let end = digits
            .bytes()
            .position(|b| !b.is_ascii_digit())
            .unwrap_or(digits.len());
        if end == 0 {
            return FieldName::Key(raw);
        }
        match digits[..end].parse::<i64>() {
            Ok(n) if negative => FieldName::Index(-n),
            Ok(n) => FieldName::Index(n),
            Err(_) => FieldName::Key(raw), // overflow
        }
    }

    /// Key text used when the name addresses an object.
    pub fn as_key(&self) -> std::borrow::Cow<'_, str> {
        match self {
            FieldName::Key(k) => std::borrow::Cow::Borrowed(k.as_str()),
            FieldName::Index(i) => std::borrow::Cow::Owned(i.to_string()),
        }
    }

    /// Position used when the name addresses an array.
    ///
    /// Keys only count when they are canonical non-negative decimals (`"0"`, `"12"`).
    pub fn as_position(&self) -> Option<usize> {
        match self {
            FieldName::Index(i) => usize::try_from(*i).ok(),
            FieldName::Key(k) => {
                let canonical = !k.is_empty()
                    && k.bytes().all(|b| b.is_ascii_digit())
                    && (k == "0" || !k.starts_with('0'));
                if canonical { k.parse().ok() } else { None }
            }
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldName::Key(k) => write!(f, "{k}"),
            FieldName::Index(i) => write!(f, "{i}"),
        }
    }
}

impl Container {
    /// Fresh empty container for auto-vivification.
    pub fn empty(self) -> Value {
        match self {
            Container::Object => Value::Object(Map::new()),
            Container::Array => Value::Array(Vec::new()),
        }
    }
}

impl Field {
    pub fn new(name: FieldName, container: Option<Container>) -> Self {
        Self { name, container }
    }
    pub fn terminal(name: FieldName) -> Self {
        Self { name, container: None }
    }
}
