use authority_register::IdClass;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Can't open register database {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },
    #[error("Error executing statement: {statement}, Error: {source}")]
    Statement {
        statement: String,
        #[source]
        source: rusqlite::Error,
    },
    #[error("{class} already holds {rows} records; seeding needs an empty table")]
    PartitionNotEmpty {
        class: IdClass,
        rows: i64,
    },
    #[error("Can't seed {class} up to {upto}: the largest seed is {max}")]
    SeedTooLarge {
        class: IdClass,
        upto: i64,
        max: i64,
    },
}

impl StoreError {
    pub(crate) fn statement(statement: &str) -> impl FnOnce(rusqlite::Error) -> StoreError + '_ {
        move |source| StoreError::Statement {
            statement: statement.to_string(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
