// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Error types.

use thiserror::Error;

/// Rejection of a raw command-line token. Carries the offending token.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("'{0}' does not start with FA, GA or AR")]
    InvalidClass(String),

    #[error("'{0}' has no number after the class")]
    MissingId(String),

    #[error("'{0}' has a non-digit after the class")]
    InvalidId(String),

    #[error("'{0}' is too large to be stored")]
    IdOutOfRange(String),
}

pub type Result<T> = core::result::Result<T, ValidationError>;
