use std::path::{Path, PathBuf};
use std::time::Duration;

use authority_register::config::DATE_FORMAT;
use authority_register::{IdClass, IdentifierRecord, RecordId, Version};
use chrono::{NaiveDate, Utc};
use rusqlite::types::ValueRef;
use rusqlite::{params, Connection, OpenFlags, OptionalExtension, Row};

use crate::error::{Result, StoreError};
use crate::schema;

/// Default wait for a lock held by another process on the shared file.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_millis(5_000);

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub path: PathBuf,
    pub busy_timeout: Duration,
}

impl StoreConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        }
    }
}

/// Source of the registration date stamped on new records.
pub type Clock = fn() -> NaiveDate;

pub fn utc_today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Handle to the register database, held for one invocation.
pub struct RegisterStore {
    pub(crate) conn: Connection,
    pub(crate) clock: Clock,
    path: Option<PathBuf>,
}

impl RegisterStore {
    /// Opens the database file, creating it and any missing class tables.
    pub fn open(config: &StoreConfig) -> Result<Self> {
        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_CREATE
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let conn = Connection::open_with_flags(&config.path, flags).map_err(|source| {
            StoreError::Open {
                path: config.path.clone(),
                source,
            }
        })?;
        conn.busy_timeout(config.busy_timeout)
            .map_err(|source| StoreError::Open {
                path: config.path.clone(),
                source,
            })?;
        schema::ensure_tables(&conn)?;

        tracing::debug!("Register database opened at {:?}", config.path);

        Ok(Self {
            conn,
            clock: utc_today,
            path: Some(config.path.clone()),
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| StoreError::Open {
            path: PathBuf::from(":memory:"),
            source,
        })?;
        schema::ensure_tables(&conn)?;
        Ok(Self {
            conn,
            clock: utc_today,
            path: None,
        })
    }

    /// Replaces the date source used for new records.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn today(&self) -> NaiveDate {
        (self.clock)()
    }

    pub fn count(&self, class: IdClass) -> Result<i64> {
        let sql = format!("SELECT COUNT(*) FROM {};", class.table());
        self.conn
            .query_row(&sql, [], |row| row.get(0))
            .map_err(StoreError::statement(&sql))
    }

    pub fn max_id(&self, class: IdClass) -> Result<Option<RecordId>> {
        let sql = format!("SELECT MAX(ID) FROM {};", class.table());
        let max: Option<i64> = self
            .conn
            .query_row(&sql, [], |row| row.get(0))
            .map_err(StoreError::statement(&sql))?;
        Ok(max.map(RecordId))
    }

    pub fn get(&self, class: IdClass, id: RecordId) -> Result<Option<IdentifierRecord>> {
        let sql = format!(
            "SELECT ID, CurrentVersion, Date FROM {} WHERE ID = ?1;",
            class.table()
        );
        self.conn
            .query_row(&sql, params![id.0], read_record)
            .optional()
            .map_err(StoreError::statement(&sql))
    }

    /// All records of `class`, newest number first.
    pub fn records(&self, class: IdClass) -> Result<Vec<IdentifierRecord>> {
        let sql = format!(
            "SELECT ID, CurrentVersion, Date FROM {} ORDER BY ID DESC;",
            class.table()
        );
        let mut stmt = self.conn.prepare(&sql).map_err(StoreError::statement(&sql))?;
        let rows = stmt
            .query_map([], read_record)
            .map_err(StoreError::statement(&sql))?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(StoreError::statement(&sql))
    }

    pub fn close(self) -> Result<()> {
        self.conn
            .close()
            .map_err(|(_, source)| StoreError::Statement {
                statement: "close".to_string(),
                source,
            })
    }
}

/// Reads `ID, CurrentVersion, Date`. Only the id must be well formed; a
/// version that is not an integer or a date that is not `YYYY-MM-DD` text
/// reads as `None`.
pub(crate) fn read_record(row: &Row<'_>) -> rusqlite::Result<IdentifierRecord> {
    let version = match row.get_ref(1)? {
        ValueRef::Integer(v) => Some(Version(v)),
        _ => None,
    };
    let registered = match row.get_ref(2)? {
        ValueRef::Text(text) => std::str::from_utf8(text)
            .ok()
            .and_then(|text| NaiveDate::parse_from_str(text, DATE_FORMAT).ok()),
        _ => None,
    };
    Ok(IdentifierRecord {
        id: RecordId(row.get(0)?),
        version,
        registered,
    })
}
