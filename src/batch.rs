//! Multi-path variants composed from single-path accessors.

use indexmap::IndexMap;
use serde_json::Value;

use crate::accessor::{Getter, Remover, Setter, Vivify};
use crate::error::{AccessError, ParseError};

// ————————————————————————————————————————————————————————————————————————————
// READ
// ————————————————————————————————————————————————————————————————————————————

/// Reads several paths at once; results line up with the input order.
///
/// Any iterable of path strings works, so `["foo", "bar"]` and
/// `vec![String::from("foo")]` are both accepted. The [`multiget!`] macro
/// takes paths as separate arguments.
#[derive(Debug, Clone)]
pub struct Multigetter {
    getters: Vec<Getter>,
}

impl Multigetter {
    pub fn new<I, S>(paths: I) -> Result<Self, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let getters = paths
            .into_iter()
            .map(|path| Getter::new(path.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { getters })
    }

    pub fn get<'t>(&self, target: &'t Value) -> Result<Vec<Option<&'t Value>>, AccessError> {
        self.getters.iter().map(|getter| getter.get(target)).collect()
    }
}

// ————————————————————————————————————————————————————————————————————————————
// WRITE
// ————————————————————————————————————————————————————————————————————————————

/// Writes a mapping of path → value, in the mapping's enumeration order.
///
/// Later entries win when paths overlap.
#[derive(Debug, Clone)]
pub struct Multisetter {
    items: Vec<(Setter, Value)>,
}

impl Multisetter {
    pub fn new<I, K>(entries: I) -> Result<Self, ParseError>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: AsRef<str>,
    {
        let items = entries
            .into_iter()
            .map(|(path, value)| Ok::<_, ParseError>((Setter::new(path.as_ref())?, value)))
            .collect::<Result<Vec<_>, ParseError>>()?;
        Ok(Self { items })
    }

    pub fn with_vivify(mut self, vivify: Vivify) -> Self {
        for (setter, _) in self.items.iter_mut() {
            setter.set_vivify(vivify);
        }
        self
    }

    /// Applies every entry and returns what each one displaced. Stops at the
    /// first failing entry; earlier writes stay applied.
    pub fn set(&self, target: &mut Value) -> Result<Vec<Option<Value>>, AccessError> {
        self.items
            .iter()
            .map(|(setter, value)| setter.replace(target, value.clone()))
            .collect()
    }
}

impl TryFrom<&IndexMap<String, Value>> for Multisetter {
    type Error = ParseError;

    fn try_from(map: &IndexMap<String, Value>) -> Result<Self, Self::Error> {
        Multisetter::new(map.iter().map(|(k, v)| (k.as_str(), v.clone())))
    }
}

impl TryFrom<&serde_json::Map<String, Value>> for Multisetter {
    type Error = ParseError;

    fn try_from(map: &serde_json::Map<String, Value>) -> Result<Self, Self::Error> {
        Multisetter::new(map.iter().map(|(k, v)| (k.as_str(), v.clone())))
    }
}

// ————————————————————————————————————————————————————————————————————————————
// DELETE
// ————————————————————————————————————————————————————————————————————————————

/// Removes several paths in sequence order.
#[derive(Debug, Clone)]
pub struct Multiremover {
    removers: Vec<Remover>,
}

impl Multiremover {
    pub fn new<I, S>(paths: I) -> Result<Self, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let removers = paths
            .into_iter()
            .map(|path| Remover::new(path.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { removers })
    }

    pub fn remove(&self, target: &mut Value) -> Vec<Option<Value>> {
        self.removers
            .iter()
            .map(|remover| remover.remove(target))
            .collect()
    }
}

/// `multiget!(&doc, "x", "y")`, the separate-arguments form of [`crate::multiget`].
#[macro_export]
macro_rules! multiget {
    ($target:expr, $($path:expr),+ $(,)?) => {
        $crate::multiget($target, [$($path),+])
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_multigetter_preserves_order() {
        let doc = json!({"x": 1, "y": {"z": 2}});
        let getter = Multigetter::new(["y.z", "x", "missing"]).unwrap();
        assert_eq!(
            getter.get(&doc).unwrap(),
            vec![Some(&json!(2)), Some(&json!(1)), None]
        );
    }

    #[test]
    fn test_multigetter_rejects_bad_path() {
        assert!(Multigetter::new(["ok", "a]b"]).is_err());
    }

    #[test]
    fn test_multisetter_later_entries_win() {
        let mut entries = IndexMap::new();
        entries.insert("a".to_string(), json!({"b": 1}));
        entries.insert("a.b".to_string(), json!(2));
        let setter = Multisetter::try_from(&entries).unwrap();
        let mut doc = json!({});
        let displaced = setter.set(&mut doc).unwrap();
        assert_eq!(doc, json!({"a": {"b": 2}}));
        assert_eq!(displaced, vec![None, Some(json!(1))]);
    }

    #[test]
    fn test_multisetter_is_reusable() {
        let setter = Multisetter::new([("foo", json!(0)), ("bar", json!(1))]).unwrap();
        let mut first = json!({});
        let mut second = json!({"foo": 5});
        setter.set(&mut first).unwrap();
        setter.set(&mut second).unwrap();
        assert_eq!(first, json!({"foo": 0, "bar": 1}));
        assert_eq!(second, json!({"foo": 0, "bar": 1}));
    }

    #[test]
    fn test_multisetter_vivify_applies_to_every_entry() {
        let setter = Multisetter::new([("a.x", json!(1)), ("b.y", json!(2))])
            .unwrap()
            .with_vivify(Vivify::Absent);
        let mut doc = json!({"a": null, "b": 0});
        let err = setter.set(&mut doc).unwrap_err();
        assert!(matches!(err, AccessError::NotAssignable { found: "number", .. }));
        assert_eq!(doc, json!({"a": {"x": 1}, "b": 0}));
    }

    #[test]
    fn test_multiremover_uses_its_own_target() {
        let remover = Multiremover::new(["a", "b.c", "nope.deeper"]).unwrap();
        let mut doc = json!({"a": 1, "b": {"c": 2, "d": 3}});
        let removed = remover.remove(&mut doc);
        assert_eq!(removed, vec![Some(json!(1)), Some(json!(2)), None]);
        assert_eq!(doc, json!({"b": {"d": 3}}));
    }
}
