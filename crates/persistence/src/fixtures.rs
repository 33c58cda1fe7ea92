use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use authority_register::config::{DB_FILE_NAME, REPORT_FILE_NAME};
use authority_register::{IdClass, RecordId};
use rusqlite::Connection;

use crate::store::{RegisterStore, StoreConfig};

pub struct TestPaths {
    pub db: PathBuf,
    pub report: PathBuf,
}

fn paths_in(dir: &Path) -> Result<TestPaths> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    Ok(TestPaths {
        db: dir.join(DB_FILE_NAME),
        report: dir.join(REPORT_FILE_NAME),
    })
}

/// FA: 1 (version 2), 2. GA: seeded 1..=3. AR: empty.
pub fn generate_test_scenario(dir: &Path) -> Result<TestPaths> {
    let paths = paths_in(dir)?;
    let mut store = RegisterStore::open(&StoreConfig::new(&paths.db))?;

    store.register(IdClass::Fa)?;
    store.register(IdClass::Fa)?;
    store.deregister(IdClass::Fa, RecordId(2))?;
    store.register(IdClass::Fa)?;
    store.increment_version(IdClass::Fa, RecordId(1))?;

    store.seed(IdClass::Ga, RecordId(3))?;

    store.close()?;
    Ok(paths)
}

/// A database laid out exactly as the earlier tool wrote it, dates from
/// SQLite's own `date('now')`.
pub fn generate_legacy_database(dir: &Path) -> Result<TestPaths> {
    let paths = paths_in(dir)?;
    let conn = Connection::open(&paths.db)?;
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS FA (ID INTEGER PRIMARY KEY,CurrentVersion INTEGER,Date TEXT);\
         CREATE TABLE IF NOT EXISTS GA (ID INTEGER PRIMARY KEY,CurrentVersion INTEGER,Date TEXT);\
         CREATE TABLE IF NOT EXISTS AR (ID INTEGER PRIMARY KEY,CurrentVersion INTEGER,Date TEXT);\
         INSERT INTO FA (ID, CurrentVersion, Date) VALUES (249, 1, '2011-02-01');\
         INSERT INTO FA (ID, CurrentVersion, Date) VALUES (250, 3, '2011-02-03');\
         INSERT INTO AR (ID, CurrentVersion, Date) VALUES (NULL, 1, date('now'));",
    )?;
    conn.close().map_err(|(_, e)| e)?;
    Ok(paths)
}

/// Legacy layout with cells the earlier tool left behind: GA1 has NULL
/// version and date, GA2 a free-text date, GA3 the highest storable version.
pub fn generate_damaged_database(dir: &Path) -> Result<TestPaths> {
    let paths = generate_legacy_database(dir)?;
    let conn = Connection::open(&paths.db)?;
    conn.execute_batch(
        "INSERT INTO GA (ID, CurrentVersion, Date) VALUES (1, NULL, NULL);\
         INSERT INTO GA (ID, CurrentVersion, Date) VALUES (2, 2, '01/02/2011');\
         INSERT INTO GA (ID, CurrentVersion, Date) VALUES (3, 9223372036854775807, '2011-02-05');",
    )?;
    conn.close().map_err(|(_, e)| e)?;
    Ok(paths)
}
