use std::io;
use std::process::ExitCode;

use authority_register_cli::{app, telemetry};

fn main() -> ExitCode {
    telemetry::init_logging();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    app::run(std::env::args_os(), &mut out, &mut io::stderr())
}
