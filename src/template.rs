//! `{path}` string templates.
//!
//! Every non-overlapping `{...}` (any characters but `}`) is a path read from
//! the target. There is no escape for literal braces and rendered values are
//! not templated again.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::accessor::Getter;
use crate::error::{AccessError, ParseError};

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{([^}]+)\}").unwrap());

/// Text rendered for a path whose value is absent.
pub const MISSING: &str = "undefined";

#[derive(Debug, Clone)]
enum Piece {
    Text(String),
    Path(Getter),
}

/// Parsed template, reusable across targets.
///
/// ```
/// use serde_json::json;
///
/// let tmpl = propath::template("{name.first} the {name.last}").unwrap();
/// let user = json!({"name": {"first": "Joe", "last": "Plumber"}});
/// assert_eq!(tmpl.render(&user).unwrap(), "Joe the Plumber");
/// ```
#[derive(Debug, Clone)]
pub struct Template {
    pieces: Vec<Piece>,
    missing: String,
}

impl Template {
    /// Placeholder paths are parsed here, so a malformed one fails up front.
    pub fn new(source: &str) -> Result<Self, ParseError> {
        let mut pieces = Vec::new();
        let mut last = 0;
        for caps in PLACEHOLDER.captures_iter(source) {
            let (Some(whole), Some(path)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            if whole.start() > last {
                pieces.push(Piece::Text(source[last..whole.start()].to_string()));
            }
            pieces.push(Piece::Path(Getter::new(path.as_str())?));
            last = whole.end();
        }
        if last < source.len() {
            pieces.push(Piece::Text(source[last..].to_string()));
        }
        Ok(Self {
            pieces,
            missing: MISSING.to_string(),
        })
    }

    /// Replaces the text rendered for absent values.
    pub fn with_missing(mut self, missing: impl Into<String>) -> Self {
        self.missing = missing.into();
        self
    }

    pub fn render(&self, target: &Value) -> Result<String, AccessError> {
        let mut out = String::new();
        for piece in &self.pieces {
            match piece {
                Piece::Text(text) => out.push_str(text),
                Piece::Path(getter) => match getter.get(target)? {
                    Some(Value::String(s)) => out.push_str(s),
                    Some(other) => out.push_str(&other.to_string()),
                    None => out.push_str(&self.missing),
                },
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_flat() {
        let tmpl = Template::new("{first} the {last}").unwrap();
        let doc = json!({"first": "Joe", "last": "Plumber"});
        assert_eq!(tmpl.render(&doc).unwrap(), "Joe the Plumber");
    }

    #[test]
    fn test_render_non_strings_as_json() {
        let tmpl = Template::new("n={n} ok={ok} xs={xs} nil={nil}").unwrap();
        let doc = json!({"n": 3, "ok": true, "xs": [1, "a"], "nil": null});
        assert_eq!(tmpl.render(&doc).unwrap(), r#"n=3 ok=true xs=[1,"a"] nil=null"#);
    }

    #[test]
    fn test_render_missing() {
        let tmpl = Template::new("hi {who}").unwrap();
        assert_eq!(tmpl.render(&json!({})).unwrap(), "hi undefined");
        let tmpl = tmpl.with_missing("");
        assert_eq!(tmpl.render(&json!({})).unwrap(), "hi ");
    }

    #[test]
    fn test_unmatched_braces_are_text() {
        let tmpl = Template::new("{} and {open").unwrap();
        assert_eq!(tmpl.render(&json!({})).unwrap(), "{} and {open");
    }

    #[test]
    fn test_malformed_placeholder_fails_on_build() {
        assert!(Template::new("{a]b}").is_err());
    }

    #[test]
    fn test_render_through_missing_intermediate_fails() {
        let tmpl = Template::new("{a.b.c}").unwrap();
        assert!(tmpl.render(&json!({})).is_err());
    }
}
