//! Bridges records to and from flat form field values.
//!
//! The host page owns the actual `<form>`; this module only deals in the
//! name/value map read out of it (or written back into it for edits).

use std::collections::BTreeMap;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("missing required field '{0}'")]
    MissingField(&'static str),
    #[error("field '{field}' is not a number: '{value}'")]
    InvalidNumber { field: &'static str, value: String },
}

/// Flat name → value map mirroring the form's input elements. Values are
/// always strings; absent and blank fields are treated the same way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues(BTreeMap<String, String>);

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.0.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Value with surrounding whitespace removed; `None` when the field is
    /// absent or blank.
    pub fn get_trimmed(&self, name: &str) -> Option<&str> {
        match self.get(name).map(str::trim) {
            Some("") | None => None,
            Some(v) => Some(v),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormValues {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Fails with the first missing required field, matching the blocking
/// single-message dialog of the original submit handlers.
pub fn validate_required(
    values: &FormValues,
    required: &'static [&'static str],
) -> Result<(), FormError> {
    for field in required {
        if values.get_trimmed(field).is_none() {
            return Err(FormError::MissingField(field));
        }
    }
    Ok(())
}

pub(crate) fn required_string(
    values: &FormValues,
    field: &'static str,
) -> Result<String, FormError> {
    values
        .get_trimmed(field)
        .map(str::to_string)
        .ok_or(FormError::MissingField(field))
}

pub(crate) fn optional_string(values: &FormValues, field: &str) -> String {
    values.get_trimmed(field).unwrap_or_default().to_string()
}

pub(crate) fn optional_i64(
    values: &FormValues,
    field: &'static str,
) -> Result<Option<i64>, FormError> {
    match values.get_trimmed(field) {
        None => Ok(None),
        Some(raw) => raw.parse().map(Some).map_err(|_| FormError::InvalidNumber {
            field,
            value: raw.to_string(),
        }),
    }
}

pub(crate) fn optional_i32(
    values: &FormValues,
    field: &'static str,
) -> Result<Option<i32>, FormError> {
    match values.get_trimmed(field) {
        None => Ok(None),
        Some(raw) => raw.parse().map(Some).map_err(|_| FormError::InvalidNumber {
            field,
            value: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_and_absent_fields_are_equivalent() {
        let mut values = FormValues::new();
        values.set("code", "   ");
        assert_eq!(values.get_trimmed("code"), None);
        assert_eq!(values.get_trimmed("name"), None);
        assert_eq!(values.get("code"), Some("   "));
    }

    #[test]
    fn validate_required_reports_first_missing_field() {
        let mut values = FormValues::new();
        values.set("name", "College of Engineering");
        let err = validate_required(&values, &["code", "name"]).unwrap_err();
        assert_eq!(err, FormError::MissingField("code"));

        values.set("code", "COE");
        assert!(validate_required(&values, &["code", "name"]).is_ok());
    }

    #[test]
    fn numeric_fields_reject_garbage() {
        let mut values = FormValues::new();
        values.set("year", "twelve");
        let err = optional_i32(&values, "year").unwrap_err();
        assert!(matches!(err, FormError::InvalidNumber { field: "year", .. }));

        values.set("year", "3");
        assert_eq!(optional_i32(&values, "year").unwrap(), Some(3));
    }
}
