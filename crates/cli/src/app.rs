//! One invocation of the tool, from raw arguments to exit code.

use std::ffi::OsString;
use std::io::Write;
use std::process::ExitCode;

use authority_register_persistence::RegisterStore;

use crate::commands::report;
use crate::config::RegisterConfig;
use crate::dispatch::{self, USAGE};

/// Exit code when the database can't be opened or created.
pub const EXIT_NO_DATABASE: u8 = 1;

/// Runs the tool with `args` (program name first). Command results go to
/// `out`; usage hints and errors go to `err`.
///
/// Only a database that can't be opened is fatal. Rejected arguments, failed
/// requests and an unwritable report are reported on `err` and the exit code
/// stays 0.
pub fn run<I, T, O, E>(args: I, out: &mut O, err: &mut E) -> ExitCode
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    O: Write,
    E: Write,
{
    let parsed = match dispatch::parse_args(args) {
        Ok(parsed) => parsed,
        Err(e) => {
            // --help and --version
            let _ = write!(out, "{}", e.render());
            return ExitCode::from(e.exit_code().clamp(0, 255) as u8);
        }
    };

    for rejected in &parsed.rejected {
        tracing::debug!("Rejected argument: {}", rejected.kind());
        let _ = err.write_all(USAGE.as_bytes());
    }

    let cfg = RegisterConfig::resolve(&parsed.cli);
    tracing::debug!("Using config: {:?}", cfg);

    let mut store = match RegisterStore::open(&cfg.store_config()) {
        Ok(store) => store,
        Err(e) => {
            let _ = writeln!(err, "Error: {e}");
            return ExitCode::from(EXIT_NO_DATABASE);
        }
    };

    if parsed.requests.is_empty() && parsed.rejected.is_empty() {
        // A report that can't be written is not fatal
        if let Err(e) = report::run(&store, parsed.cli.format, &cfg.report_path, out) {
            let _ = writeln!(err, "{e:#}");
        }
    } else {
        match dispatch::run(&mut store, &parsed.requests, out, err) {
            Ok(summary) => tracing::debug!("Dispatch finished: {:?}", summary),
            Err(e) => tracing::error!("Failed to write output: {}", e),
        }
    }

    if let Err(e) = store.close() {
        tracing::warn!("Closing database: {}", e);
    }
    ExitCode::SUCCESS
}
