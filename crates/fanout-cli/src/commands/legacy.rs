use crate::Session;
use anyhow::{Result, anyhow};
use std::path::PathBuf;

/// Merge providers from the legacy `sites.json` into the store.
///
/// Providers whose id already exists are skipped. The legacy file is never
/// modified.
pub fn execute(session: &mut Session, file: Option<PathBuf>) -> Result<()> {
    let store = match file {
        Some(path) => session.store().clone().with_legacy_path(path),
        None => session.store().clone(),
    };

    let location = store
        .legacy_path()
        .map(|p| p.display().to_string())
        .ok_or_else(|| anyhow!("No legacy location known. Pass --file."))?;

    let Some(legacy) = store.load_legacy() else {
        println!("No legacy providers found at {}", location);
        return Ok(());
    };

    let total = legacy.len();
    let added = session.providers_mut().merge(legacy);
    if added > 0 {
        session.save()?;
    }

    println!(
        "Imported {} of {} legacy providers from {}",
        added, total, location
    );
    Ok(())
}
