//! Path-based access to nested `serde_json::Value` data.
//!
//! Paths use dot and bracket notation (`a.b[2].c`). Accessors are built once
//! per path string and reused; the free functions here parse and apply in one
//! call.
//!
//! ```
//! use serde_json::json;
//!
//! let mut doc = json!({});
//! propath::set(&mut doc, "user.tags[1]", json!("admin")).unwrap();
//! assert_eq!(doc, json!({"user": {"tags": [null, "admin"]}}));
//! assert_eq!(propath::get(&doc, "user.tags[1]").unwrap(), Some(&json!("admin")));
//! ```
pub mod accessor;
pub mod batch;
pub mod cli;
pub mod error;
pub mod field;
pub mod parser;
pub mod path_de;
pub mod template;
pub mod wrap;

use serde_json::Value;

pub use accessor::{FieldPath, Getter, Property, Remover, Setter, Vivify};
pub use batch::{Multigetter, Multiremover, Multisetter};
pub use error::{AccessError, ParseError, PathError};
pub use field::{Container, Field, FieldName};
pub use parser::{parse_field_names, parse_field_types};
pub use path_de::get_as;
pub use template::Template;
pub use wrap::{Wrapped, WrappedProperty};

// ————————————————————————————————————————————————————————————————————————————
// FACTORIES
// ————————————————————————————————————————————————————————————————————————————

pub fn getter(path: &str) -> Result<Getter, ParseError> {
    Getter::new(path)
}

pub fn setter(path: &str) -> Result<Setter, ParseError> {
    Setter::new(path)
}

pub fn remover(path: &str) -> Result<Remover, ParseError> {
    Remover::new(path)
}

pub fn multigetter<I, S>(paths: I) -> Result<Multigetter, ParseError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Multigetter::new(paths)
}

pub fn multisetter<I, K>(entries: I) -> Result<Multisetter, ParseError>
where
    I: IntoIterator<Item = (K, Value)>,
    K: AsRef<str>,
{
    Multisetter::new(entries)
}

pub fn multiremover<I, S>(paths: I) -> Result<Multiremover, ParseError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Multiremover::new(paths)
}

pub fn template(source: &str) -> Result<Template, ParseError> {
    Template::new(source)
}

pub fn wrap(target: &mut Value) -> Wrapped<'_> {
    Wrapped::new(target)
}

pub fn wrap_property<'t>(
    target: &'t mut Value,
    path: &str,
) -> Result<WrappedProperty<'t>, ParseError> {
    WrappedProperty::new(target, path)
}

// ————————————————————————————————————————————————————————————————————————————
// ONE-SHOT HELPERS
// ————————————————————————————————————————————————————————————————————————————

pub fn get<'t>(target: &'t Value, path: &str) -> Result<Option<&'t Value>, PathError> {
    Ok(Getter::new(path)?.get(target)?)
}

pub fn set<'t>(
    target: &'t mut Value,
    path: &str,
    value: Value,
) -> Result<&'t mut Value, PathError> {
    Ok(Setter::new(path)?.set(target, value)?)
}

/// Never fails on a missing path; only a malformed one is an error.
pub fn remove(target: &mut Value, path: &str) -> Result<Option<Value>, ParseError> {
    Ok(Remover::new(path)?.remove(target))
}

pub fn multiget<'t, I, S>(target: &'t Value, paths: I) -> Result<Vec<Option<&'t Value>>, PathError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Ok(Multigetter::new(paths)?.get(target)?)
}

pub fn multiset<I, K>(target: &mut Value, entries: I) -> Result<Vec<Option<Value>>, PathError>
where
    I: IntoIterator<Item = (K, Value)>,
    K: AsRef<str>,
{
    Ok(Multisetter::new(entries)?.set(target)?)
}

pub fn multiremove<I, S>(target: &mut Value, paths: I) -> Result<Vec<Option<Value>>, ParseError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Ok(Multiremover::new(paths)?.remove(target))
}
