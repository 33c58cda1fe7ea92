// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Identifier classes.

use core::fmt;

use serde::{Deserialize, Serialize};

/// The three independent numbering sequences kept by the register.
///
/// Each class owns one table in the store; the table name is
/// [`IdClass::table`], which is the only way a class reaches SQL text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum IdClass {
    /// Functional authority.
    #[serde(rename = "FA")]
    Fa,
    /// General authority.
    #[serde(rename = "GA")]
    Ga,
    /// Appraisal report.
    #[serde(rename = "AR")]
    Ar,
}

impl IdClass {
    /// Report order.
    pub const ALL: [IdClass; 3] = [IdClass::Fa, IdClass::Ga, IdClass::Ar];

    /// Two-letter tag, also the table name.
    pub const fn tag(self) -> &'static str {
        match self {
            IdClass::Fa => "FA",
            IdClass::Ga => "GA",
            IdClass::Ar => "AR",
        }
    }

    pub const fn table(self) -> &'static str {
        self.tag()
    }

    /// Heading used by the report.
    pub const fn title(self) -> &'static str {
        match self {
            IdClass::Fa => "Functional authorities",
            IdClass::Ga => "General authorities",
            IdClass::Ar => "Appraisal reports",
        }
    }

    /// Matches an already extracted two-character prefix, ignoring case.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_ascii_uppercase().as_str() {
            "FA" => Some(IdClass::Fa),
            "GA" => Some(IdClass::Ga),
            "AR" => Some(IdClass::Ar),
            _ => None,
        }
    }
}

impl fmt::Display for IdClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
