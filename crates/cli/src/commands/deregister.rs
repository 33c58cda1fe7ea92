use std::io::Write;

use anyhow::Context;
use authority_register::parse_target;
use authority_register_persistence::RegisterStore;

/// Prints the removed number, or nothing when it was not registered.
pub fn run<W: Write>(store: &mut RegisterStore, token: &str, out: &mut W) -> anyhow::Result<()> {
    let target = parse_target(token)?;
    if let Some(record) = store.deregister(target.class, target.id)? {
        writeln!(out, "{}", record.id).context("Failed to write removed number")?;
    }
    Ok(())
}
