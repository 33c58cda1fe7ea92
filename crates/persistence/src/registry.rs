//! Numbering operations.
//!
//! Every operation touches one class table and runs as a single statement or
//! a single `IMMEDIATE` transaction, so concurrent invocations against the
//! shared file are serialized by SQLite's own locking. Misses are `None`,
//! never errors.

use authority_register::config::MAX_SEED;
use authority_register::{IdClass, IdentifierRecord, RecordId, Version};
use rusqlite::{params, OptionalExtension, TransactionBehavior};

use crate::error::{Result, StoreError};
use crate::store::{read_record, RegisterStore};

/// Outcome of lowering the version of an existing record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decrement {
    /// The version went down by one.
    Lowered(Version),
    /// The record was already at the first version and was left unchanged.
    AtFloor(Version),
}

impl Decrement {
    pub fn version(&self) -> Version {
        match self {
            Decrement::Lowered(v) | Decrement::AtFloor(v) => *v,
        }
    }
}

/// Outcome of raising the version of an existing record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Increment {
    /// The version went up by one.
    Raised(Version),
    /// The record was already at [`Version::LAST`] and was left unchanged.
    AtCeiling(Version),
}

impl Increment {
    pub fn version(&self) -> Version {
        match self {
            Increment::Raised(v) | Increment::AtCeiling(v) => *v,
        }
    }
}

/// Result of a guarded version update on a record that exists.
enum Step {
    Moved(Version),
    Held(Version),
}

impl RegisterStore {
    /// Issues the next number of `class` with version 1 and today's date.
    pub fn register(&mut self, class: IdClass) -> Result<RecordId> {
        let sql = format!(
            "INSERT INTO {} (ID, CurrentVersion, Date) VALUES (NULL, ?1, ?2) RETURNING ID;",
            class.table()
        );
        let id: i64 = self
            .conn
            .query_row(&sql, params![Version::FIRST.0, self.today()], |row| row.get(0))
            .map_err(StoreError::statement(&sql))?;

        tracing::info!("Registered {}{}", class, id);
        Ok(RecordId(id))
    }

    /// Removes a record, returning it as it was before deletion.
    ///
    /// The number becomes available again only if it was the highest one in
    /// the table.
    pub fn deregister(&mut self, class: IdClass, id: RecordId) -> Result<Option<IdentifierRecord>> {
        let sql = format!(
            "DELETE FROM {} WHERE ID = ?1 RETURNING ID, CurrentVersion, Date;",
            class.table()
        );
        let removed = self
            .conn
            .query_row(&sql, params![id.0], read_record)
            .optional()
            .map_err(StoreError::statement(&sql))?;

        match &removed {
            Some(_) => tracing::info!("Deregistered {}{}", class, id),
            None => tracing::debug!("Deregister: {}{} not found", class, id),
        }
        Ok(removed)
    }

    /// Bumps the version of a record and returns the new version.
    ///
    /// A record already at [`Version::LAST`] is reported as
    /// [`Increment::AtCeiling`] and not written.
    pub fn increment_version(&mut self, class: IdClass, id: RecordId) -> Result<Option<Increment>> {
        let update_sql = format!(
            "UPDATE {} SET CurrentVersion = (CurrentVersion + 1) \
             WHERE ID = ?1 AND CurrentVersion < ?2 RETURNING CurrentVersion;",
            class.table()
        );
        let outcome = self
            .step_version(class, id, &update_sql, Version::LAST)?
            .map(|step| match step {
                Step::Moved(v) => Increment::Raised(v),
                Step::Held(v) => Increment::AtCeiling(v),
            });

        match outcome {
            Some(Increment::Raised(v)) => tracing::info!("{}{} now at version {}", class, id, v),
            Some(Increment::AtCeiling(v)) => tracing::debug!("{}{} already at version {}", class, id, v),
            None => tracing::debug!("Increment: {}{} not found", class, id),
        }
        Ok(outcome)
    }

    /// Lowers the version of a record, never below the first version.
    ///
    /// A record already at the first version is reported as
    /// [`Decrement::AtFloor`] with its unchanged version.
    pub fn decrement_version(&mut self, class: IdClass, id: RecordId) -> Result<Option<Decrement>> {
        let update_sql = format!(
            "UPDATE {} SET CurrentVersion = (CurrentVersion - 1) \
             WHERE ID = ?1 AND CurrentVersion > ?2 RETURNING CurrentVersion;",
            class.table()
        );
        let outcome = self
            .step_version(class, id, &update_sql, Version::FIRST)?
            .map(|step| match step {
                Step::Moved(v) => Decrement::Lowered(v),
                Step::Held(v) => Decrement::AtFloor(v),
            });

        match outcome {
            Some(Decrement::Lowered(v)) => tracing::info!("{}{} lowered to version {}", class, id, v),
            Some(Decrement::AtFloor(v)) => tracing::debug!("{}{} already at version {}", class, id, v),
            None => tracing::debug!("Decrement: {}{} not found", class, id),
        }
        Ok(outcome)
    }

    /// Runs a guarded `UPDATE ... RETURNING` (`?1` id, `?2` bound) inside one
    /// `IMMEDIATE` transaction. When the guard skips the row, the unchanged
    /// version is read back in the same transaction.
    fn step_version(
        &mut self,
        class: IdClass,
        id: RecordId,
        update_sql: &str,
        bound: Version,
    ) -> Result<Option<Step>> {
        let select_sql = format!("SELECT CurrentVersion FROM {} WHERE ID = ?1;", class.table());

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(StoreError::statement("BEGIN IMMEDIATE"))?;

        let moved: Option<i64> = tx
            .query_row(update_sql, params![id.0, bound.0], |row| row.get(0))
            .optional()
            .map_err(StoreError::statement(update_sql))?;

        let step = match moved {
            Some(v) => Some(Step::Moved(Version(v))),
            None => tx
                .query_row(&select_sql, params![id.0], |row| row.get(0))
                .optional()
                .map_err(StoreError::statement(&select_sql))?
                .map(|v: i64| Step::Held(Version(v))),
        };

        tx.commit().map_err(StoreError::statement("COMMIT"))?;
        Ok(step)
    }

    /// Fills an empty class table with numbers `1..=upto`.
    ///
    /// Returns the number of records inserted. A table that already holds
    /// records is rejected with [`StoreError::PartitionNotEmpty`] and left
    /// unchanged; `upto <= 0` inserts nothing. Bounds above [`MAX_SEED`] are
    /// rejected with [`StoreError::SeedTooLarge`] before any lock is taken.
    pub fn seed(&mut self, class: IdClass, upto: RecordId) -> Result<usize> {
        if upto.0 <= 0 {
            tracing::debug!("Seed: nothing to insert for {}{}", class, upto);
            return Ok(0);
        }
        if upto.0 > MAX_SEED {
            return Err(StoreError::SeedTooLarge {
                class,
                upto: upto.0,
                max: MAX_SEED,
            });
        }

        let today = self.today();
        let count_sql = format!("SELECT COUNT(*) FROM {};", class.table());
        let insert_sql = format!(
            "WITH RECURSIVE seq(n) AS (SELECT 1 UNION ALL SELECT n + 1 FROM seq WHERE n < ?1) \
             INSERT INTO {} (ID, CurrentVersion, Date) SELECT n, ?2, ?3 FROM seq;",
            class.table()
        );

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(StoreError::statement("BEGIN IMMEDIATE"))?;

        let rows: i64 = tx
            .query_row(&count_sql, [], |row| row.get(0))
            .map_err(StoreError::statement(&count_sql))?;
        if rows > 0 {
            return Err(StoreError::PartitionNotEmpty { class, rows });
        }

        let inserted = tx
            .execute(&insert_sql, params![upto.0, Version::FIRST.0, today])
            .map_err(StoreError::statement(&insert_sql))?;
        tx.commit().map_err(StoreError::statement("COMMIT"))?;

        tracing::info!("Seeded {} with {} numbers", class, inserted);
        Ok(inserted)
    }
}
