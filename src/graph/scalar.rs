use async_graphql::{InputValueError, InputValueResult, Scalar, ScalarType, Value};
use chrono::{SecondsFormat, Utc};

/// DateTime custom scalar type, transmitted as RFC 3339 text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTime(pub chrono::DateTime<Utc>);

impl DateTime {
    // `Z` suffix for UTC; fractional seconds only when present, so formatting
    // never drops precision.
    pub fn format(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    }

    /// Parses RFC 3339 text, yielding `None` instead of an error.
    pub fn parse_lenient(text: &str) -> Option<Self> {
        chrono::DateTime::parse_from_rfc3339(text)
            .ok()
            .map(|parsed| DateTime(parsed.with_timezone(&Utc)))
    }
}

impl From<chrono::DateTime<Utc>> for DateTime {
    fn from(value: chrono::DateTime<Utc>) -> Self {
        DateTime(value)
    }
}

#[Scalar(name = "DateTime")]
impl ScalarType for DateTime {
    fn parse(value: Value) -> InputValueResult<Self> {
        if let Value::String(text) = &value {
            return Self::parse_lenient(text)
                .ok_or_else(|| InputValueError::custom(format!("`{text}` is not an RFC 3339 date-time")));
        }
        Err(InputValueError::expected_type(value))
    }

    fn is_valid(value: &Value) -> bool {
        matches!(value, Value::String(text) if Self::parse_lenient(text).is_some())
    }

    fn to_value(&self) -> Value {
        Value::String(self.format())
    }
}
