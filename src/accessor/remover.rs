use serde_json::Value;

use super::{FieldPath, slot};
use crate::error::ParseError;

/// Deletes the value at one path. A path that cannot be followed all the way
/// down is not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Remover {
    path: FieldPath,
}

impl Remover {
    pub fn new(path: &str) -> Result<Self, ParseError> {
        Ok(Self::from(FieldPath::parse(path)?))
    }

    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    /// Returns the removed value. Array slots are left as `null`.
    pub fn remove(&self, target: &mut Value) -> Option<Value> {
        if let Some(key) = self.path.direct_key() {
            return slot::delete(target, &key);
        }
        let (last, steps) = self.path.fields().split_last()?;
        let mut cursor = target;
        for field in steps {
            match slot::read_mut(cursor, &field.name) {
                Ok(Some(next)) => cursor = next,
                _ => {
                    tracing::debug!(
                        path = self.path.as_str(),
                        stopped_at = %field.name,
                        "nothing to remove"
                    );
                    return None;
                }
            }
        }
        slot::delete(cursor, &last.name)
    }
}

impl From<FieldPath> for Remover {
    fn from(path: FieldPath) -> Self {
        Self { path }
    }
}
