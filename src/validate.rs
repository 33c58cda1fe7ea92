// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Token validation.
//!
//! Tokens look like `FA250`: a two letter class prefix (case-insensitive)
//! followed by decimal digits. Registration only needs the prefix.

use crate::config::CLASS_PREFIX_LEN;
use crate::error::{Result, ValidationError};
use crate::types::{IdClass, RecordId, Target};

/// Extracts the class from the first two characters of `token`.
/// Anything after the prefix is ignored.
pub fn parse_class(token: &str) -> Result<IdClass> {
    let prefix: String = token.chars().take(CLASS_PREFIX_LEN).collect();
    if prefix.chars().count() < CLASS_PREFIX_LEN {
        return Err(ValidationError::InvalidClass(token.to_string()));
    }
    IdClass::from_tag(&prefix).ok_or_else(|| ValidationError::InvalidClass(token.to_string()))
}

/// Parses the number that follows the class prefix.
pub fn parse_id(token: &str) -> Result<RecordId> {
    let digits: String = token.chars().skip(CLASS_PREFIX_LEN).collect();
    if digits.is_empty() {
        return Err(ValidationError::MissingId(token.to_string()));
    }
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidId(token.to_string()));
    }
    digits
        .parse::<i64>()
        .map(RecordId)
        .map_err(|_| ValidationError::IdOutOfRange(token.to_string()))
}

/// Parses a full `<class><id>` token.
pub fn parse_target(token: &str) -> Result<Target> {
    let class = parse_class(token)?;
    let id = parse_id(token)?;
    Ok(Target::new(class, id))
}
