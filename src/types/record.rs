// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Record definition.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::id::{RecordId, Version};

/// One row of a class table.
///
/// Rows written by this crate always carry both cells. Databases kept on the
/// share by older tools may hold a NULL version, or a NULL or free-text date;
/// those cells read as `None` so the rest of the table still reports.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentifierRecord {
    pub id: RecordId,
    pub version: Option<Version>,
    pub registered: Option<NaiveDate>,
}

impl IdentifierRecord {
    pub fn new(id: RecordId, version: Version, registered: NaiveDate) -> Self {
        Self {
            id,
            version: Some(version),
            registered: Some(registered),
        }
    }
}
