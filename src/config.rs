// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Configuration constants.

/// Length of the class prefix of every token (`FA`, `GA`, `AR`).
pub const CLASS_PREFIX_LEN: usize = 2;

/// Version given to every newly registered or seeded record.
pub const FIRST_VERSION: i64 = 1;

/// Largest id a single seed may fill up to. Seeding runs inside one write
/// transaction that holds the shared database locked until it finishes.
pub const MAX_SEED: i64 = 100_000;

/// Database file name, resolved next to the executable by default.
pub const DB_FILE_NAME: &str = "authority-register.db";

/// Report file name, resolved next to the executable by default.
pub const REPORT_FILE_NAME: &str = "authority-report.html";

/// Storage date format (`YYYY-MM-DD`), as written by SQLite's `date('now')`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
