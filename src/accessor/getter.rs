use serde_json::Value;

use super::{FieldPath, slot};
use crate::error::{AccessError, ParseError};

/// Reads the value at one path.
///
/// ```
/// use serde_json::json;
///
/// let get_name = propath::getter("name").unwrap();
/// let user = json!({"name": "Joe"});
/// assert_eq!(get_name.get(&user).unwrap(), Some(&json!("Joe")));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Getter {
    path: FieldPath,
}

impl Getter {
    pub fn new(path: &str) -> Result<Self, ParseError> {
        Ok(Self::from(FieldPath::parse(path)?))
    }

    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    /// `Ok(None)` means the last step was absent. Stepping through an absent or
    /// `null` intermediate is an error.
    pub fn get<'t>(&self, target: &'t Value) -> Result<Option<&'t Value>, AccessError> {
        if let Some(key) = self.path.direct_key() {
            return slot::read(target, &key);
        }
        let mut cursor = Some(target);
        for field in self.path.fields() {
            let current = cursor.ok_or_else(|| AccessError::on_undefined(&field.name))?;
            cursor = slot::read(current, &field.name)?;
        }
        Ok(cursor)
    }

    pub fn get_mut<'t>(&self, target: &'t mut Value) -> Result<Option<&'t mut Value>, AccessError> {
        if let Some(key) = self.path.direct_key() {
            return slot::read_mut(target, &key);
        }
        let mut cursor = Some(target);
        for field in self.path.fields() {
            let current = cursor.ok_or_else(|| AccessError::on_undefined(&field.name))?;
            cursor = slot::read_mut(current, &field.name)?;
        }
        Ok(cursor)
    }
}

impl From<FieldPath> for Getter {
    fn from(path: FieldPath) -> Self {
        Self { path }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldName;
    use serde_json::json;

    #[test]
    fn test_get_single_segment() {
        let doc = json!({"x": 1});
        assert_eq!(Getter::new("x").unwrap().get(&doc).unwrap(), Some(&json!(1)));
        assert_eq!(Getter::new("y").unwrap().get(&doc).unwrap(), None);
    }

    #[test]
    fn test_get_nested_with_index() {
        let doc = json!({"a": {"b": [0, 1, {"c": "deep"}]}});
        let got = Getter::new("a.b[2].c").unwrap().get(&doc).unwrap();
        assert_eq!(got, Some(&json!("deep")));
    }

    #[test]
    fn test_get_missing_leaf_is_absent() {
        let doc = json!({"a": {}});
        assert_eq!(Getter::new("a.b").unwrap().get(&doc).unwrap(), None);
    }

    #[test]
    fn test_get_through_missing_intermediate_fails() {
        let doc = json!({"a": {}});
        let err = Getter::new("a.b.c").unwrap().get(&doc).unwrap_err();
        assert_eq!(err, AccessError::AccessOnUndefined { field: FieldName::key("c") });
    }

    #[test]
    fn test_get_through_null_fails() {
        let doc = json!({"a": null});
        assert!(Getter::new("a.b").unwrap().get(&doc).is_err());
    }

    #[test]
    fn test_get_mut_edits_in_place() {
        let mut doc = json!({"a": [{"n": 1}]});
        let getter = Getter::new("a[0].n").unwrap();
        if let Some(n) = getter.get_mut(&mut doc).unwrap() {
            *n = json!(2);
        }
        assert_eq!(doc, json!({"a": [{"n": 2}]}));
    }
}
