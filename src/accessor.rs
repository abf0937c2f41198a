//! Single-path accessors built once per path string.
//!
//! A [`FieldPath`] owns the parsed descriptors and walks them against a
//! caller-owned [`serde_json::Value`]. Behavior only branches on the number of
//! segments: a one-segment path is a direct key operation on the raw text,
//! anything longer walks outer to inner.
//!
//! Reads and writes do not guard against absent intermediates; stepping into
//! one is an [`AccessError::AccessOnUndefined`]. Removal does guard, and a
//! partially missing path is simply nothing to remove.
pub mod getter;
pub mod remover;
pub mod setter;
pub(crate) mod slot;

use serde_json::Value;

use crate::error::ParseError;
use crate::field::{Field, FieldName};
use crate::parser::parse_field_types;

pub use getter::Getter;
pub use remover::Remover;
pub use setter::{Setter, Vivify};

/// Parsed path expression, immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    raw: String,
    fields: Vec<Field>,
}

impl FieldPath {
    pub fn parse(path: &str) -> Result<Self, ParseError> {
        Ok(Self {
            raw: path.to_string(),
            fields: parse_field_types(path)?,
        })
    }

    /// The path text this was parsed from.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Key used by one-segment paths: the raw text, like `target[path]`.
    fn direct_key(&self) -> Option<FieldName> {
        (self.fields.len() == 1).then(|| FieldName::Key(self.raw.clone()))
    }
}

/// Accessor pair bound to one path.
#[derive(Debug, Clone)]
pub struct Property {
    pub getter: Getter,
    pub setter: Setter,
}

impl Property {
    pub fn new(path: &str) -> Result<Self, ParseError> {
        let path = FieldPath::parse(path)?;
        Ok(Self {
            getter: Getter::from(path.clone()),
            setter: Setter::from(path),
        })
    }

    pub fn with_vivify(mut self, vivify: Vivify) -> Self {
        self.setter = self.setter.with_vivify(vivify);
        self
    }

    pub fn get<'t>(&self, target: &'t Value) -> Result<Option<&'t Value>, crate::AccessError> {
        self.getter.get(target)
    }

    pub fn set<'t>(
        &self,
        target: &'t mut Value,
        value: Value,
    ) -> Result<&'t mut Value, crate::AccessError> {
        self.setter.set(target, value)
    }
}
