use std::fmt;

use serde::Serialize;

use crate::domain::ValidationError;

pub const MIN_QUERY_CHARS: usize = 3;
pub const MAX_QUERY_CHARS: usize = 500;

/// A shopper query that passed [`validate`]. Holds the trimmed text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidQuery(String);

impl ValidQuery {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for ValidQuery {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ValidQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for ValidQuery {
    type Error = ValidationError;

    fn try_from(raw: &str) -> Result<Self, Self::Error> {
        validate(raw)
    }
}

/// Trim and bound-check a raw query. Lengths count characters, not bytes.
pub fn validate(raw: &str) -> Result<ValidQuery, ValidationError> {
    let trimmed = raw.trim();
    let len = trimmed.chars().count();

    if len == 0 {
        return Err(ValidationError::EmptyQuery);
    }
    if len < MIN_QUERY_CHARS {
        return Err(ValidationError::TooShort);
    }
    if len > MAX_QUERY_CHARS {
        return Err(ValidationError::TooLong);
    }

    Ok(ValidQuery(trimmed.to_string()))
}
