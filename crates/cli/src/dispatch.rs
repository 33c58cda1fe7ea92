//! Maps command-line flags to register operations.
//!
//! Every flag occurrence is an independent request. Requests run in the order
//! they appear on the command line; a rejected or failed request does not stop
//! the ones after it.

use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;

use authority_register::ValidationError;
use authority_register_persistence::RegisterStore;
use clap::error::ErrorKind;
use clap::parser::ValueSource;
use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, ValueEnum};

use crate::commands;

pub const USAGE: &str = "\nExample usage:\n\
(Register new AR/FA/GA)                         -n AR\n\
(Remove AR/FA/GA)                               -r FA250\n\
(Increment version of an AR/FA/GA)              -v GA28\n\
(Decrement version of an AR/FA/GA)              -d GA28\n\
(Seed the AR/FA/GA tables with numbers up to)   -s FA249\n\
(Write the report)                              no arguments\n";

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// HTML file next to the database
    Html,
    /// Text tables on stdout
    Table,
    /// JSON on stdout
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "authority-register")]
#[command(version, about = "Issues and tracks functional authority, general authority and appraisal report numbers", long_about = None)]
#[command(after_help = USAGE)]
pub struct Cli {
    /// Register a new number of CLASS (FA, GA or AR) and print it
    #[arg(short = 'n', long = "register", value_name = "CLASS")]
    pub register: Vec<String>,

    /// Remove a registered number, e.g. FA250
    #[arg(short = 'r', long = "deregister", value_name = "TOKEN")]
    pub deregister: Vec<String>,

    /// Increment the version of a number, e.g. GA28
    #[arg(short = 'v', long = "increment", value_name = "TOKEN")]
    pub increment: Vec<String>,

    /// Decrement the version of a number (never below 1)
    #[arg(short = 'd', long = "decrement", value_name = "TOKEN")]
    pub decrement: Vec<String>,

    /// Seed an empty class with numbers 1 up to the given one, e.g. FA249
    #[arg(short = 's', long = "seed", value_name = "TOKEN")]
    pub seed: Vec<String>,

    /// Database file (default: authority-register.db next to the executable)
    #[arg(long)]
    pub db: Option<PathBuf>,

    /// Report file (default: authority-report.html next to the executable)
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// How long to wait for another client's lock on the database
    #[arg(long, value_name = "MS")]
    pub busy_timeout_ms: Option<u64>,

    /// Report output when no operation is requested
    #[arg(long, value_enum, default_value_t = ReportFormat::Html)]
    pub format: ReportFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Register,
    Deregister,
    Increment,
    Decrement,
    Seed,
}

impl Action {
    const ALL: [(Action, &'static str); 5] = [
        (Action::Register, "register"),
        (Action::Deregister, "deregister"),
        (Action::Increment, "increment"),
        (Action::Decrement, "decrement"),
        (Action::Seed, "seed"),
    ];
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Request {
    pub action: Action,
    pub token: String,
}

/// Options and requests read from the command line.
#[derive(Debug)]
pub struct ParsedArgs {
    pub cli: Cli,
    pub requests: Vec<Request>,
    /// Flags clap refused (unknown flag, missing or bad value). Each one is
    /// answered with the usage text; the rest of the command line still runs.
    pub rejected: Vec<clap::Error>,
}

impl ParsedArgs {
    fn absorb(&mut self, matches: &ArgMatches) -> Result<(), clap::Error> {
        let group = Cli::from_arg_matches(matches)?;
        self.requests.extend(ordered_requests(matches));

        self.cli.register.extend(group.register);
        self.cli.deregister.extend(group.deregister);
        self.cli.increment.extend(group.increment);
        self.cli.decrement.extend(group.decrement);
        self.cli.seed.extend(group.seed);
        if group.db.is_some() {
            self.cli.db = group.db;
        }
        if group.report.is_some() {
            self.cli.report = group.report;
        }
        if group.busy_timeout_ms.is_some() {
            self.cli.busy_timeout_ms = group.busy_timeout_ms;
        }
        if matches.value_source("format") == Some(ValueSource::CommandLine) {
            self.cli.format = group.format;
        }
        Ok(())
    }
}

/// Parses arguments into the options and the ordered list of requests.
///
/// Each flag and the values after it are parsed on their own, so a flag
/// clap refuses only costs its own request. The error comes back only for
/// `--help` and `--version`, which clap answers itself.
pub fn parse_args<I, T>(args: I) -> Result<ParsedArgs, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let mut args = args.into_iter().map(Into::into);
    let bin = args.next().unwrap_or_else(|| OsString::from("authority-register"));

    let mut parsed = ParsedArgs {
        cli: Cli::try_parse_from([bin.clone()])?,
        requests: Vec::new(),
        rejected: Vec::new(),
    };

    for group in flag_groups(args) {
        let argv = std::iter::once(bin.clone()).chain(group);
        match Cli::command().try_get_matches_from(argv) {
            Ok(matches) => parsed.absorb(&matches)?,
            Err(e) if is_informational(&e) => return Err(e),
            Err(e) => parsed.rejected.push(e),
        }
    }
    Ok(parsed)
}

/// Splits arguments at every one starting with `-`.
fn flag_groups(args: impl Iterator<Item = OsString>) -> Vec<Vec<OsString>> {
    let mut groups: Vec<Vec<OsString>> = Vec::new();
    for arg in args {
        let is_flag = arg.to_string_lossy().starts_with('-');
        match groups.last_mut() {
            Some(group) if !is_flag => group.push(arg),
            _ => groups.push(vec![arg]),
        }
    }
    groups
}

fn is_informational(e: &clap::Error) -> bool {
    matches!(
        e.kind(),
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
    )
}

fn ordered_requests(matches: &ArgMatches) -> Vec<Request> {
    let mut indexed = Vec::new();
    for (action, id) in Action::ALL {
        let (Some(values), Some(indices)) = (
            matches.get_many::<String>(id),
            matches.indices_of(id),
        ) else {
            continue;
        };
        for (token, index) in values.zip(indices) {
            indexed.push((
                index,
                Request {
                    action,
                    token: token.clone(),
                },
            ));
        }
    }
    indexed.sort_by_key(|(index, _)| *index);
    indexed.into_iter().map(|(_, request)| request).collect()
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DispatchSummary {
    pub completed: usize,
    pub invalid: usize,
    pub failed: usize,
}

/// Runs each request against the store. Results go to `out`, usage hints and
/// storage errors to `err`.
pub fn run<O: Write, E: Write>(
    store: &mut RegisterStore,
    requests: &[Request],
    out: &mut O,
    err: &mut E,
) -> std::io::Result<DispatchSummary> {
    let mut summary = DispatchSummary::default();

    for request in requests {
        match execute(store, request, out) {
            Ok(()) => summary.completed += 1,
            Err(e) if e.downcast_ref::<ValidationError>().is_some() => {
                tracing::debug!("Rejected {:?} {:?}: {}", request.action, request.token, e);
                err.write_all(USAGE.as_bytes())?;
                summary.invalid += 1;
            }
            Err(e) => {
                tracing::debug!("{:?} {} failed", request.action, request.token);
                writeln!(err, "{e:#}")?;
                summary.failed += 1;
            }
        }
    }

    out.flush()?;
    Ok(summary)
}

fn execute<O: Write>(store: &mut RegisterStore, request: &Request, out: &mut O) -> anyhow::Result<()> {
    let token = request.token.as_str();
    match request.action {
        Action::Register => commands::register::run(store, token, out),
        Action::Deregister => commands::deregister::run(store, token, out),
        Action::Increment => commands::version::increment(store, token, out),
        Action::Decrement => commands::version::decrement(store, token, out),
        Action::Seed => commands::seed::run(store, token),
    }
}
