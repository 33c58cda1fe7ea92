//! Table layout shared with databases created by earlier releases.
//!
//! One table per [`IdClass`], named by its tag:
//! `ID INTEGER PRIMARY KEY, CurrentVersion INTEGER, Date TEXT`.
//! `ID` is the rowid alias, so omitting it on insert assigns `max(ID) + 1`.

use authority_register::IdClass;
use rusqlite::Connection;

use crate::error::{Result, StoreError};

pub fn create_table_sql(class: IdClass) -> String {
    format!(
        "CREATE TABLE IF NOT EXISTS {} (\
         ID INTEGER PRIMARY KEY,\
         CurrentVersion INTEGER,\
         Date TEXT);",
        class.table()
    )
}

/// Creates any missing class table. Existing tables are left untouched.
pub fn ensure_tables(conn: &Connection) -> Result<()> {
    for class in IdClass::ALL {
        let sql = create_table_sql(class);
        conn.execute_batch(&sql).map_err(StoreError::statement(&sql))?;
    }
    Ok(())
}
