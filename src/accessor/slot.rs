// Key operations on one level of a `serde_json::Value`.
//
// - read: object key, array position, scalars read as absent, null is undefined
// - write: object insert, array replace/append/pad with null (bounded), otherwise refused
// - delete: object shift-remove, array slot becomes null, otherwise no-op

use serde_json::Value;

use crate::error::AccessError;
use crate::field::{Container, FieldName};

use super::setter::Vivify;

/// Most slots a single write may add to an array, padding included.
pub const MAX_ARRAY_GROWTH: usize = 1 << 20;

pub(crate) fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

pub(crate) fn read<'v>(
    cursor: &'v Value,
    name: &FieldName,
) -> Result<Option<&'v Value>, AccessError> {
    match cursor {
        Value::Null => Err(AccessError::on_undefined(name)),
        Value::Object(map) => Ok(map.get(&*name.as_key())),
        Value::Array(items) => Ok(name.as_position().and_then(|pos| items.get(pos))),
        _ => Ok(None),
    }
}

pub(crate) fn read_mut<'v>(
    cursor: &'v mut Value,
    name: &FieldName,
) -> Result<Option<&'v mut Value>, AccessError> {
    match cursor {
        Value::Null => Err(AccessError::on_undefined(name)),
        Value::Object(map) => Ok(map.get_mut(&*name.as_key())),
        Value::Array(items) => Ok(name.as_position().and_then(|pos| items.get_mut(pos))),
        _ => Ok(None),
    }
}

/// Writes `value` at `name`, returning whatever it displaced.
pub(crate) fn assign(
    cursor: &mut Value,
    name: &FieldName,
    value: Value,
) -> Result<Option<Value>, AccessError> {
    match cursor {
        Value::Null => Err(AccessError::on_undefined(name)),
        Value::Object(map) => Ok(map.insert(name.as_key().into_owned(), value)),
        Value::Array(items) => {
            let pos = position(name, "array")?;
            let existed = pos < items.len();
            grow_to(items, name, pos)?;
            let old = std::mem::replace(&mut items[pos], value);
            Ok(existed.then_some(old))
        }
        other => Err(AccessError::NotAssignable {
            field: name.clone(),
            found: kind(other),
        }),
    }
}

/// Steps into `name`, replacing the slot with an empty `container` when the
/// vivify policy says the current value does not count.
pub(crate) fn step_mut<'v>(
    cursor: &'v mut Value,
    name: &FieldName,
    container: Container,
    vivify: Vivify,
) -> Result<&'v mut Value, AccessError> {
    let slot = match cursor {
        Value::Null => return Err(AccessError::on_undefined(name)),
        Value::Object(map) => map.entry(name.as_key().into_owned()).or_insert(Value::Null),
        Value::Array(items) => {
            let pos = position(name, "array")?;
            grow_to(items, name, pos)?;
            &mut items[pos]
        }
        other => {
            return Err(AccessError::NotAssignable {
                field: name.clone(),
                found: kind(other),
            });
        }
    };
    if vivify.replaces(slot) {
        tracing::debug!(field = %name, ?container, "auto-vivified container");
        *slot = container.empty();
    }
    Ok(slot)
}

pub(crate) fn delete(cursor: &mut Value, name: &FieldName) -> Option<Value> {
    match cursor {
        Value::Object(map) => map.shift_remove(&*name.as_key()),
        Value::Array(items) => {
            let slot = items.get_mut(name.as_position()?)?;
            Some(std::mem::replace(slot, Value::Null))
        }
        _ => None,
    }
}

/// Whether `assign`/`step_mut` on `cursor` would succeed, without touching it.
pub(crate) fn check_write(cursor: &Value, name: &FieldName) -> Result<(), AccessError> {
    match cursor {
        Value::Null => Err(AccessError::on_undefined(name)),
        Value::Object(_) => Ok(()),
        Value::Array(items) => check_growth(items.len(), name, position(name, "array")?),
        other => Err(AccessError::NotAssignable {
            field: name.clone(),
            found: kind(other),
        }),
    }
}

fn check_growth(len: usize, name: &FieldName, pos: usize) -> Result<(), AccessError> {
    if pos.saturating_add(1).saturating_sub(len) > MAX_ARRAY_GROWTH {
        return Err(AccessError::IndexOutOfRange {
            field: name.clone(),
            limit: MAX_ARRAY_GROWTH,
        });
    }
    Ok(())
}

/// Pads `items` with `null` so that `pos` is in range.
fn grow_to(items: &mut Vec<Value>, name: &FieldName, pos: usize) -> Result<(), AccessError> {
    if pos < items.len() {
        return Ok(());
    }
    check_growth(items.len(), name, pos)?;
    items
        .try_reserve(pos + 1 - items.len())
        .map_err(|_| AccessError::IndexOutOfRange {
            field: name.clone(),
            limit: MAX_ARRAY_GROWTH,
        })?;
    items.resize(pos + 1, Value::Null);
    Ok(())
}

fn position(name: &FieldName, found: &'static str) -> Result<usize, AccessError> {
    name.as_position().ok_or_else(|| AccessError::NotAssignable {
        field: name.clone(),
        found,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_read_object_by_index_uses_decimal_key() {
        let doc = json!({"0": "zero"});
        assert_eq!(read(&doc, &FieldName::Index(0)).unwrap(), Some(&json!("zero")));
    }

    #[test]
    fn test_read_array_by_canonical_key() {
        let doc = json!(["a", "b"]);
        assert_eq!(read(&doc, &FieldName::key("1")).unwrap(), Some(&json!("b")));
        assert_eq!(read(&doc, &FieldName::key("x")).unwrap(), None);
    }

    #[test]
    fn test_read_scalar_is_absent_and_null_is_undefined() {
        assert_eq!(read(&json!(5), &FieldName::key("x")).unwrap(), None);
        assert!(matches!(
            read(&Value::Null, &FieldName::key("x")),
            Err(AccessError::AccessOnUndefined { .. })
        ));
    }

    #[test]
    fn test_assign_pads_array() {
        let mut doc = json!([1]);
        assert_eq!(assign(&mut doc, &FieldName::Index(3), json!(4)).unwrap(), None);
        assert_eq!(doc, json!([1, null, null, 4]));
    }

    #[test]
    fn test_assign_refuses_scalar() {
        let mut doc = json!("text");
        let err = assign(&mut doc, &FieldName::key("x"), json!(1)).unwrap_err();
        assert_eq!(
            err,
            AccessError::NotAssignable { field: FieldName::key("x"), found: "string" }
        );
    }

    #[test]
    fn test_assign_huge_index_is_refused() {
        let mut doc = json!([1]);
        let err = assign(&mut doc, &FieldName::Index(i64::MAX), json!(2)).unwrap_err();
        assert_eq!(
            err,
            AccessError::IndexOutOfRange {
                field: FieldName::Index(i64::MAX),
                limit: MAX_ARRAY_GROWTH,
            }
        );
        assert_eq!(doc, json!([1]));
    }

    #[test]
    fn test_step_past_growth_limit_is_refused() {
        let mut doc = json!([]);
        let far = FieldName::Index(MAX_ARRAY_GROWTH as i64);
        let err = step_mut(&mut doc, &far, Container::Object, Vivify::Falsy).unwrap_err();
        assert!(matches!(err, AccessError::IndexOutOfRange { .. }));
        assert_eq!(doc, json!([]));

        let edge = FieldName::Index(MAX_ARRAY_GROWTH as i64 - 1);
        assert!(check_write(&json!([]), &edge).is_ok());
    }

    #[test]
    fn test_check_write_matches_assign() {
        assert!(check_write(&json!({}), &FieldName::key("x")).is_ok());
        assert!(check_write(&json!([]), &FieldName::key("x")).is_err());
        assert!(check_write(&json!(3), &FieldName::key("x")).is_err());
        assert!(check_write(&Value::Null, &FieldName::key("x")).is_err());
    }

    #[test]
    fn test_delete_array_leaves_null_hole() {
        let mut doc = json!([1, 2, 3]);
        assert_eq!(delete(&mut doc, &FieldName::Index(1)), Some(json!(2)));
        assert_eq!(doc, json!([1, null, 3]));
    }

    #[test]
    fn test_delete_keeps_object_order() {
        let mut doc = json!({"a": 1, "b": 2, "c": 3});
        delete(&mut doc, &FieldName::key("a"));
        let keys: Vec<_> = doc.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["b", "c"]);
    }
}
