use std::io::Write;

use anyhow::Context;
use authority_register::parse_class;
use authority_register_persistence::RegisterStore;

/// Prints the newly issued number.
pub fn run<W: Write>(store: &mut RegisterStore, token: &str, out: &mut W) -> anyhow::Result<()> {
    let class = parse_class(token)?;
    let id = store.register(class)?;
    writeln!(out, "{id}").context("Failed to write registered number")?;
    Ok(())
}
