//! Path expression scanner.
//!
//! Turns `a.b[2].c` into field descriptors in a single left-to-right pass:
//!
//! - `.` closes the current field as an object step
//! - `[` closes the current field as an array step
//! - `]` must be followed by `.` or `[` (or end the string); the pair is
//!   consumed and closes the current field with the follower's container
//! - anything else is appended to the current field name
//!
//! A field pushed right after an array step has its name coerced to an index.

use crate::error::ParseError;
use crate::field::{Container, Field, FieldName};

/// Parses a path into descriptors with container hints, used by deep setters.
pub fn parse_field_types(path: &str) -> Result<Vec<Field>, ParseError> {
    if path.is_empty() {
        return Err(ParseError::Empty);
    }

    let mut scan = Scan::default();
    let mut chars = path.char_indices();
    while let Some((_, ch)) = chars.next() {
        match ch {
            '.' => scan.close(Container::Object),
            '[' => scan.close(Container::Array),
            ']' => match chars.next() {
                None => {}
                Some((_, '.')) => scan.close(Container::Object),
                Some((_, '[')) => scan.close(Container::Array),
                Some((position, found)) => {
                    return Err(ParseError::UnexpectedAfterBracket { position, found });
                }
            },
            other => scan.name.push(other),
        }
    }

    let fields = scan.finish();
    tracing::trace!(path, fields = fields.len(), "parsed path expression");
    Ok(fields)
}

/// Parses a path into bare field names, used by getters and removers.
pub fn parse_field_names(path: &str) -> Result<Vec<FieldName>, ParseError> {
    Ok(parse_field_types(path)?
        .into_iter()
        .map(|field| field.name)
        .collect())
}

#[derive(Default)]
struct Scan {
    fields: Vec<Field>,
    name: String,
}

impl Scan {
    fn close(&mut self, container: Container) {
        self.push(Some(container));
    }

    fn push(&mut self, container: Option<Container>) {
        let raw = std::mem::take(&mut self.name);
        let name = match self.fields.last() {
            Some(prev) if prev.container == Some(Container::Array) => FieldName::coerce_index(raw),
            _ => FieldName::Key(raw),
        };
        self.fields.push(Field::new(name, container));
    }

    fn finish(mut self) -> Vec<Field> {
        self.push(None);
        self.fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(k: &str) -> FieldName {
        FieldName::key(k)
    }

    #[test]
    fn test_parse_single_key() {
        let fields = parse_field_types("name").unwrap();
        assert_eq!(fields, vec![Field::terminal(key("name"))]);
    }

    #[test]
    fn test_parse_nested_object() {
        let fields = parse_field_types("a.b").unwrap();
        assert_eq!(
            fields,
            vec![
                Field::new(key("a"), Some(Container::Object)),
                Field::terminal(key("b")),
            ]
        );
    }

    #[test]
    fn test_parse_mixed_path() {
        let fields = parse_field_types("a.b[2].c").unwrap();
        assert_eq!(
            fields,
            vec![
                Field::new(key("a"), Some(Container::Object)),
                Field::new(key("b"), Some(Container::Array)),
                Field::new(FieldName::Index(2), Some(Container::Object)),
                Field::terminal(key("c")),
            ]
        );
    }

    #[test]
    fn test_parse_field_names() {
        let names = parse_field_names("a.b[2].c").unwrap();
        assert_eq!(names, vec![key("a"), key("b"), FieldName::Index(2), key("c")]);
    }

    #[test]
    fn test_parse_trailing_bracket() {
        let fields = parse_field_types("a[2]").unwrap();
        assert_eq!(
            fields,
            vec![
                Field::new(key("a"), Some(Container::Array)),
                Field::terminal(FieldName::Index(2)),
            ]
        );
    }

    #[test]
    fn test_parse_consecutive_brackets() {
        let names = parse_field_names("grid[1][3]").unwrap();
        assert_eq!(names, vec![key("grid"), FieldName::Index(1), FieldName::Index(3)]);
        let fields = parse_field_types("grid[1][3]").unwrap();
        assert_eq!(fields[1].container, Some(Container::Array));
    }

    #[test]
    fn test_parse_bad_char_after_bracket() {
        let err = parse_field_types("a[0]b").unwrap_err();
        assert_eq!(err, ParseError::UnexpectedAfterBracket { position: 4, found: 'b' });
        assert_eq!(err.to_string(), "Expected '.' or '[' after ']'; got 'b'");
    }

    #[test]
    fn test_parse_stray_bracket_at_end() {
        // `]` as the last character finalizes without a delimiter.
        assert_eq!(parse_field_names("a]").unwrap(), vec![key("a")]);
        assert!(parse_field_types("a]x").is_err());
        assert_eq!(parse_field_names("a].b").unwrap(), vec![key("a"), key("b")]);
    }

    #[test]
    fn test_parse_empty_fails() {
        assert_eq!(parse_field_types(""), Err(ParseError::Empty));
    }

    #[test]
    fn test_parse_unvalidated_segments_pass_through() {
        assert_eq!(parse_field_names("a..b").unwrap(), vec![key("a"), key(""), key("b")]);
        assert_eq!(
            parse_field_names("a[x].b").unwrap(),
            vec![key("a"), key("x"), key("b")]
        );
        assert_eq!(
            parse_field_names("a[-1]").unwrap(),
            vec![key("a"), FieldName::Index(-1)]
        );
    }

    #[test]
    fn test_parse_index_only_inside_brackets() {
        // digits after a dot stay keys
        assert_eq!(parse_field_names("a.0").unwrap(), vec![key("a"), key("0")]);
    }
}
