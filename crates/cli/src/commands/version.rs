use std::io::Write;

use anyhow::Context;
use authority_register::parse_target;
use authority_register_persistence::RegisterStore;

/// Prints the new version, or the unchanged one at the storage ceiling.
pub fn increment<W: Write>(store: &mut RegisterStore, token: &str, out: &mut W) -> anyhow::Result<()> {
    let target = parse_target(token)?;
    if let Some(outcome) = store.increment_version(target.class, target.id)? {
        writeln!(out, "{}", outcome.version()).context("Failed to write version")?;
    }
    Ok(())
}

/// Prints the resulting version, including when it was already 1.
pub fn decrement<W: Write>(store: &mut RegisterStore, token: &str, out: &mut W) -> anyhow::Result<()> {
    let target = parse_target(token)?;
    if let Some(outcome) = store.decrement_version(target.class, target.id)? {
        writeln!(out, "{}", outcome.version()).context("Failed to write version")?;
    }
    Ok(())
}
