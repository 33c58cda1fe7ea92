// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.

//! authority-register: numbering rules for functional authorities, general
//! authorities and appraisal reports.
//!
//! This crate holds the storage-independent part of the register: the
//! identifier classes, record types and the validator for command-line
//! tokens. Persistence lives in `authority-register-persistence`.

pub mod config;
pub mod error;
pub mod types;
pub mod validate;

pub use error::ValidationError;
pub use types::{IdClass, IdentifierRecord, RecordId, Target, Version};
pub use validate::{parse_class, parse_id, parse_target};
