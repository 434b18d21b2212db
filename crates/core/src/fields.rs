//! Lenient decoding of request fields.
//!
//! Browser clients send ids as either JSON numbers or numeric strings (form
//! `<select>` values), and completion flags as booleans or 0/1. These types
//! accept every shape seen on the wire and convert to strict values in an
//! explicit validation step, so a bad value becomes a `CoreError::Validation`
//! instead of a body rejection.

use serde::{Deserialize, Deserializer};

use crate::error::CoreError;
use crate::types::DbId;

/// An id as it appears in a request: `3` or `"3"`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Number(i64),
    Text(String),
}

impl RawId {
    /// Interpret as an optional reference.
    ///
    /// `0` and blank strings mean "no value". Negative numbers and
    /// non-numeric strings are rejected.
    pub fn to_optional(&self, field: &str) -> Result<Option<DbId>, CoreError> {
        let value = match self {
            RawId::Number(n) => *n,
            RawId::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Ok(None);
                }
                trimmed.parse::<i64>().map_err(|_| {
                    CoreError::Validation(format!("{field} must be an integer, got \"{s}\""))
                })?
            }
        };
        match value {
            0 => Ok(None),
            v if v < 0 => Err(CoreError::Validation(format!(
                "{field} must be a positive integer"
            ))),
            v => Ok(Some(v)),
        }
    }

    /// Interpret as a lookup key.
    ///
    /// Once an `id` is given it is always looked up: any integer is
    /// accepted (a non-positive one simply matches no row) and blank text
    /// reads as `0`. Only non-numeric text is rejected.
    pub fn to_lookup(&self, field: &str) -> Result<DbId, CoreError> {
        match self {
            RawId::Number(n) => Ok(*n),
            RawId::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Ok(0);
                }
                trimmed.parse::<i64>().map_err(|_| {
                    CoreError::Validation(format!("{field} must be an integer, got \"{s}\""))
                })
            }
        }
    }
}

/// Resolve a required id, failing with `missing_message` when it is absent
/// or empty.
pub fn require_id(
    raw: Option<&RawId>,
    field: &str,
    missing_message: &str,
) -> Result<DbId, CoreError> {
    raw.map(|r| r.to_optional(field))
        .transpose()?
        .flatten()
        .ok_or_else(|| CoreError::Validation(missing_message.to_string()))
}

/// A boolean flag as it appears in a request: `true`, `1` or `"true"`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawFlag {
    Bool(bool),
    Number(i64),
    Text(String),
}

impl RawFlag {
    pub fn to_bool(&self, field: &str) -> Result<bool, CoreError> {
        match self {
            RawFlag::Bool(b) => Ok(*b),
            RawFlag::Number(n) => Ok(*n != 0),
            RawFlag::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "1" => Ok(true),
                "false" | "0" | "" => Ok(false),
                _ => Err(CoreError::Validation(format!(
                    "{field} must be a boolean, got \"{s}\""
                ))),
            },
        }
    }
}

/// Deserialize a field that distinguishes "absent" from "explicitly null".
///
/// Use together with `#[serde(default)]`: an absent key stays `None`, a JSON
/// `null` becomes `Some(None)` and a value becomes `Some(Some(v))`.
pub fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Body of a DELETE request: `{ "id": ... }`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IdRequest {
    pub id: Option<RawId>,
}

impl IdRequest {
    pub fn validate(&self, missing_message: &str) -> Result<DbId, CoreError> {
        require_id(self.id.as_ref(), "id", missing_message)
    }
}

/// Treat empty or whitespace-only text as absent, keeping any other text
/// exactly as written.
pub fn present_text(value: Option<&str>) -> Option<String> {
    value
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}

/// Treat empty or whitespace-only text as absent, trimming the rest.
pub fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn raw_id_accepts_numbers_and_numeric_strings() {
        let n: RawId = serde_json::from_str("7").unwrap();
        let s: RawId = serde_json::from_str("\" 7 \"").unwrap();
        assert_eq!(n.to_optional("id").unwrap(), Some(7));
        assert_eq!(s.to_optional("id").unwrap(), Some(7));
    }

    #[test]
    fn raw_id_treats_zero_and_blank_as_absent() {
        assert_eq!(RawId::Number(0).to_optional("id").unwrap(), None);
        assert_eq!(RawId::Text(String::new()).to_optional("id").unwrap(), None);
    }

    #[test]
    fn raw_id_rejects_garbage() {
        assert_matches!(
            RawId::Text("abc".into()).to_optional("category_id"),
            Err(CoreError::Validation(msg)) if msg.contains("category_id")
        );
        assert_matches!(
            RawId::Number(-2).to_optional("id"),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn require_id_reports_missing_message() {
        assert_matches!(
            require_id(None, "id", "Task ID is required"),
            Err(CoreError::Validation(msg)) if msg == "Task ID is required"
        );
        assert_matches!(
            require_id(Some(&RawId::Number(0)), "id", "Task ID is required"),
            Err(CoreError::Validation(_))
        );
        assert_eq!(require_id(Some(&RawId::Number(4)), "id", "x").unwrap(), 4);
    }

    #[test]
    fn raw_flag_coercion() {
        assert!(RawFlag::Bool(true).to_bool("f").unwrap());
        assert!(RawFlag::Number(1).to_bool("f").unwrap());
        assert!(!RawFlag::Number(0).to_bool("f").unwrap());
        assert!(RawFlag::Text("TRUE".into()).to_bool("f").unwrap());
        assert!(!RawFlag::Text("0".into()).to_bool("f").unwrap());
        assert_matches!(
            RawFlag::Text("maybe".into()).to_bool("f"),
            Err(CoreError::Validation(_))
        );
    }

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "deserialize_present")]
        note: Option<Option<String>>,
    }

    #[test]
    fn present_distinguishes_null_from_absent() {
        let absent: Probe = serde_json::from_str("{}").unwrap();
        let null: Probe = serde_json::from_str(r#"{"note": null}"#).unwrap();
        let value: Probe = serde_json::from_str(r#"{"note": "x"}"#).unwrap();
        assert_eq!(absent.note, None);
        assert_eq!(null.note, Some(None));
        assert_eq!(value.note, Some(Some("x".to_string())));
    }

    #[test]
    fn raw_id_lookup_keeps_zero_and_blank() {
        assert_eq!(RawId::Number(0).to_lookup("id").unwrap(), 0);
        assert_eq!(RawId::Text(" ".into()).to_lookup("id").unwrap(), 0);
        assert_eq!(RawId::Text("12".into()).to_lookup("id").unwrap(), 12);
        assert_matches!(
            RawId::Text("abc".into()).to_lookup("id"),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn present_text_keeps_surrounding_whitespace() {
        assert_eq!(present_text(Some("  keep  ")), Some("  keep  ".to_string()));
        assert_eq!(present_text(Some("line\n\n")), Some("line\n\n".to_string()));
        assert_eq!(present_text(Some(" \n ")), None);
        assert_eq!(present_text(None), None);
    }

    #[test]
    fn non_blank_trims() {
        assert_eq!(non_blank(Some("  hi ")), Some("hi".to_string()));
        assert_eq!(non_blank(Some("   ")), None);
        assert_eq!(non_blank(None), None);
    }
}
