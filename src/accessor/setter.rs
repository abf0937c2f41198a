use serde::Deserialize;
use serde_json::Value;

use super::{FieldPath, slot};
use crate::error::{AccessError, ParseError};
use crate::field::{Container, Field};

/// Which existing intermediate values get replaced by a fresh container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Vivify {
    /// Absent, `null`, `false`, `0` and `""` are all replaced.
    ///
    /// Setting `a.b` on `{"a": 0}` yields `{"a": {"b": ..}}`, so a legitimately
    /// falsy intermediate is lost.
    #[default]
    Falsy,
    /// Only absent and `null` are replaced.
    Absent,
}

impl Vivify {
    pub fn replaces(self, existing: &Value) -> bool {
        match self {
            Vivify::Falsy => is_falsy(existing),
            Vivify::Absent => existing.is_null(),
        }
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Writes a value at one path, creating missing intermediate containers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Setter {
    path: FieldPath,
    vivify: Vivify,
}

impl Setter {
    pub fn new(path: &str) -> Result<Self, ParseError> {
        Ok(Self::from(FieldPath::parse(path)?))
    }

    pub fn with_vivify(mut self, vivify: Vivify) -> Self {
        self.set_vivify(vivify);
        self
    }

    pub(crate) fn set_vivify(&mut self, vivify: Vivify) {
        self.vivify = vivify;
    }

    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    /// Assigns `value` and hands back the root it was written into.
    pub fn set<'t>(
        &self,
        target: &'t mut Value,
        value: Value,
    ) -> Result<&'t mut Value, AccessError> {
        self.replace(target, value)?;
        Ok(target)
    }

    /// Assigns `value` and returns the value it displaced, if any.
    ///
    /// A write that fails leaves `target` untouched: no containers are
    /// created unless the whole path can be written.
    pub fn replace(&self, target: &mut Value, value: Value) -> Result<Option<Value>, AccessError> {
        if let Some(key) = self.path.direct_key() {
            return slot::assign(target, &key, value);
        }
        let Some((last, steps)) = self.path.fields().split_last() else {
            return Ok(None);
        };
        self.check(target, steps, last)?;
        let mut cursor = target;
        for field in steps {
            // non-terminal fields always carry a container from the parser
            let container = field.container.unwrap_or(Container::Object);
            cursor = slot::step_mut(cursor, &field.name, container, self.vivify)?;
        }
        slot::assign(cursor, &last.name, value)
    }
}

/// What a step lands on during the dry run.
enum Planned<'v> {
    Existing(&'v Value),
    Fresh(Container),
}

impl Setter {
    /// Walks the path read-only and reports the error the write would hit.
    fn check(&self, target: &Value, steps: &[Field], last: &Field) -> Result<(), AccessError> {
        let mut cursor = Planned::Existing(target);
        for field in steps {
            let container = field.container.unwrap_or(Container::Object);
            cursor = match cursor {
                Planned::Existing(value) => {
                    slot::check_write(value, &field.name)?;
                    match slot::read(value, &field.name)? {
                        Some(child) if !self.vivify.replaces(child) => Planned::Existing(child),
                        _ => Planned::Fresh(container),
                    }
                }
                Planned::Fresh(parent) => {
                    slot::check_write(&parent.empty(), &field.name)?;
                    Planned::Fresh(container)
                }
            };
        }
        match cursor {
            Planned::Existing(value) => slot::check_write(value, &last.name),
            Planned::Fresh(parent) => slot::check_write(&parent.empty(), &last.name),
        }
    }
}

impl From<FieldPath> for Setter {
    fn from(path: FieldPath) -> Self {
        Self {
            path,
            vivify: Vivify::default(),
        }
    }
}
