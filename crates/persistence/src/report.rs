//! Read path for the register report.

use authority_register::{IdClass, IdentifierRecord};
use serde::Serialize;

use crate::error::{Result, StoreError};
use crate::store::RegisterStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassSection {
    pub class: IdClass,
    pub title: &'static str,
    /// Newest number first.
    pub records: Vec<IdentifierRecord>,
}

/// Every record of every class, read in one transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterSnapshot {
    pub sections: Vec<ClassSection>,
}

impl RegisterSnapshot {
    pub fn section(&self, class: IdClass) -> Option<&ClassSection> {
        self.sections.iter().find(|s| s.class == class)
    }

    pub fn total(&self) -> usize {
        self.sections.iter().map(|s| s.records.len()).sum()
    }
}

impl RegisterStore {
    /// Reads the whole register. Has no effect on stored state.
    pub fn snapshot(&self) -> Result<RegisterSnapshot> {
        // Deferred read transaction: all three tables come from the same state
        let tx = self
            .conn
            .unchecked_transaction()
            .map_err(StoreError::statement("BEGIN"))?;

        let mut sections = Vec::with_capacity(IdClass::ALL.len());
        for class in IdClass::ALL {
            sections.push(ClassSection {
                class,
                title: class.title(),
                records: self.records(class)?,
            });
        }

        tx.finish().map_err(StoreError::statement("END"))?;
        Ok(RegisterSnapshot { sections })
    }
}
