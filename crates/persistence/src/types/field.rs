//! Tri-state request fields.
//!
//! Request payloads distinguish a field that was left out from one that was
//! sent but cannot be used. [`Field`] carries that distinction through
//! validation so every field is handled exhaustively before a DTO is built.

use chrono::NaiveDate;

/// Date format accepted in requests, e.g. `2006-09-25`.
pub const REQUEST_DATE_FORMAT: &str = "%Y-%m-%d";

/// A request field after inspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field<T> {
    /// The field was not supplied.
    Absent,
    /// The field was supplied but is unusable; carries the field-level message.
    Invalid(String),
    /// The field was supplied with a usable value.
    Value(T),
}

impl<T> Field<T> {
    /// Returns true unless the field is absent.
    pub fn is_present(&self) -> bool {
        !matches!(self, Field::Absent)
    }

    /// Returns the invalid-field message, if any.
    pub fn error(&self) -> Option<&str> {
        match self {
            Field::Invalid(message) => Some(message),
            _ => None,
        }
    }

    /// Converts into an `Option`, dropping invalid values.
    pub fn into_value(self) -> Option<T> {
        match self {
            Field::Value(value) => Some(value),
            _ => None,
        }
    }

    /// Applies a fallible conversion to a present value.
    pub fn and_then<U>(self, f: impl FnOnce(T) -> Field<U>) -> Field<U> {
        match self {
            Field::Absent => Field::Absent,
            Field::Invalid(message) => Field::Invalid(message),
            Field::Value(value) => f(value),
        }
    }
}

impl Field<String> {
    /// Inspects a query-string value, where an empty value means "not supplied".
    pub fn from_query(raw: Option<String>) -> Self {
        match raw {
            Some(value) if !value.is_empty() => Field::Value(value),
            _ => Field::Absent,
        }
    }

    /// Inspects a body value, where an empty value is an error.
    pub fn from_body(raw: Option<String>, empty_message: &str) -> Self {
        match raw {
            None => Field::Absent,
            Some(value) if value.is_empty() => Field::Invalid(empty_message.to_string()),
            Some(value) => Field::Value(value),
        }
    }

    /// Parses a present value as a request date.
    pub fn parse_date(self, invalid_message: &str) -> Field<NaiveDate> {
        self.and_then(|raw| match NaiveDate::parse_from_str(&raw, REQUEST_DATE_FORMAT) {
            Ok(date) => Field::Value(date),
            Err(_) => Field::Invalid(invalid_message.to_string()),
        })
    }
}
