use authority_register::parse_target;
use authority_register_persistence::RegisterStore;

pub fn run(store: &mut RegisterStore, token: &str) -> anyhow::Result<()> {
    let target = parse_target(token)?;
    let inserted = store.seed(target.class, target.id)?;
    tracing::debug!("Seed {} inserted {} records", target, inserted);
    Ok(())
}
