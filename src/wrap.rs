//! Accessors pre-bound to a target, and optionally to a path.

use serde_json::Value;

use crate::accessor::Property;
use crate::error::{AccessError, ParseError, PathError};

/// A target with path-taking `get`/`set`.
#[derive(Debug)]
pub struct Wrapped<'t> {
    target: &'t mut Value,
}

impl<'t> Wrapped<'t> {
    pub fn new(target: &'t mut Value) -> Self {
        Self { target }
    }

    pub fn get(&self, path: &str) -> Result<Option<&Value>, PathError> {
        crate::get(&*self.target, path)
    }

    pub fn set(&mut self, path: &str, value: Value) -> Result<&mut Value, PathError> {
        crate::set(&mut *self.target, path, value)
    }

    pub fn into_inner(self) -> &'t mut Value {
        self.target
    }
}

/// A target plus one path, with zero-argument `get` and one-argument `set`.
#[derive(Debug)]
pub struct WrappedProperty<'t> {
    target: &'t mut Value,
    property: Property,
}

impl<'t> WrappedProperty<'t> {
    pub fn new(target: &'t mut Value, path: &str) -> Result<Self, ParseError> {
        Ok(Self {
            target,
            property: Property::new(path)?,
        })
    }

    pub fn get(&self) -> Result<Option<&Value>, AccessError> {
        self.property.get(&*self.target)
    }

    pub fn set(&mut self, value: Value) -> Result<&mut Value, AccessError> {
        self.property.set(&mut *self.target, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wrap_get_set() {
        let mut doc = json!({"a": 1});
        let mut wrapped = Wrapped::new(&mut doc);
        wrapped.set("b.c", json!(2)).unwrap();
        assert_eq!(wrapped.get("b.c").unwrap(), Some(&json!(2)));
        assert_eq!(wrapped.get("a").unwrap(), Some(&json!(1)));
        assert_eq!(doc, json!({"a": 1, "b": {"c": 2}}));
    }

    #[test]
    fn test_wrap_property() {
        let mut doc = json!({});
        let mut prop = WrappedProperty::new(&mut doc, "user[0].name").unwrap();
        assert!(prop.get().is_err());
        prop.set(json!("Joe")).unwrap();
        assert_eq!(prop.get().unwrap(), Some(&json!("Joe")));
        assert_eq!(doc, json!({"user": [{"name": "Joe"}]}));
    }
}
