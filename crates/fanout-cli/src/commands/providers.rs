//! Provider management commands.
//!
//! Every editing command changes the in-memory list and then saves the whole
//! list back to the store.
//!
//! # Examples
//!
//! ```bash
//! fanout list
//! fanout add --name DuckDuckGo --url 'https://duckduckgo.com/?q=[query]'
//! fanout edit 1700000000000 --joiner '%20'
//! fanout disable 2
//! fanout move 3 1
//! fanout remove 1700000000000
//! ```

use crate::{OutputFormat, Session};
use anyhow::{Result, anyhow};
use console::style;
use fanout_core::{NewProvider, Provider, ProviderPatch};

/// Show all providers in stored order
pub fn list(session: &Session, format: OutputFormat) -> Result<()> {
    let providers = session.providers().as_slice();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(providers)?),
        OutputFormat::Table => print!("{}", format_table(providers)),
        OutputFormat::Pretty => print!("{}", format_pretty(providers)),
    }

    Ok(())
}

/// Create a provider and save the list
pub fn add(session: &mut Session, new: NewProvider) -> Result<()> {
    let provider = session.providers_mut().add(new)?.clone();
    session.save()?;

    println!(
        "Added provider '{}' (id {})",
        provider.name,
        style(&provider.id).bold()
    );
    Ok(())
}

/// Apply field edits to a provider and save the list
pub fn edit(session: &mut Session, id: &str, patch: ProviderPatch) -> Result<()> {
    if patch.is_empty() {
        return Err(anyhow!(
            "Nothing to change. Pass at least one of --name, --url, --joiner or --group."
        ));
    }

    let provider = session.providers_mut().update(id, &patch)?.clone();
    session.save()?;

    println!("Updated provider '{}' (id {})", provider.name, provider.id);
    Ok(())
}

/// Delete a provider and save the list
pub fn remove(session: &mut Session, id: &str) -> Result<()> {
    let removed = session.providers_mut().delete(id)?;
    session.save()?;

    println!("Removed provider '{}' (id {})", removed.name, removed.id);
    Ok(())
}

/// Turn a provider on or off for searches
pub fn set_enabled(session: &mut Session, id: &str, enabled: bool) -> Result<()> {
    let provider = session.providers_mut().set_enabled(id, enabled)?.clone();
    session.save()?;

    print_enabled(&provider);
    Ok(())
}

/// Flip a provider's enabled flag
pub fn toggle(session: &mut Session, id: &str) -> Result<()> {
    let provider = session.providers_mut().toggle(id)?.clone();
    session.save()?;

    print_enabled(&provider);
    Ok(())
}

/// Move a provider between 1-based positions
pub fn move_provider(session: &mut Session, from: usize, to: usize) -> Result<()> {
    let len = session.providers().len();
    if from == 0 || to == 0 || from > len || to > len {
        return Err(anyhow!("Positions run from 1 to {}", len));
    }
    let to_index = to - 1;

    session.providers_mut().reorder(from - 1, to_index)?;
    session.save()?;

    let moved = &session.providers().as_slice()[to_index];
    println!("Moved '{}' to position {}", moved.name, to);
    Ok(())
}

fn print_enabled(provider: &Provider) {
    let state = if provider.enabled {
        style("enabled").green()
    } else {
        style("disabled").yellow()
    };
    println!("'{}' is now {}", provider.name, state);
}

fn format_pretty(providers: &[Provider]) -> String {
    let enabled = providers.iter().filter(|p| p.enabled).count();
    let mut output = format!(
        "\n{}  {}\n\n",
        style("Search providers").bold().cyan(),
        style(format!("{} of {} enabled", enabled, providers.len())).dim()
    );

    if providers.is_empty() {
        output.push_str("  No providers. Add one with 'fanout add'.\n\n");
        return output;
    }

    for (index, provider) in providers.iter().enumerate() {
        let marker = if provider.enabled {
            style("✓").green()
        } else {
            style("·").dim()
        };

        output.push_str(&format!(
            "{:>3}. {} {}  {}\n",
            index + 1,
            marker,
            style(&provider.name).bold(),
            style(provider.host()).dim()
        ));
        output.push_str(&format!("       id:       {}\n", provider.id));
        output.push_str(&format!("       template: {}\n", provider.url_template));
        output.push_str(&format!("       joiner:   {:?}\n", provider.joiner));
        if let Some(group) = &provider.group {
            output.push_str(&format!("       group:    {}\n", group));
        }
    }

    output.push('\n');
    output
}

fn format_table(providers: &[Provider]) -> String {
    let id_width = column_width(providers.iter().map(|p| p.id.len()), "ID");
    let name_width = column_width(providers.iter().map(|p| p.name.len()), "NAME");

    let mut output = format!(
        "{:>3}  {:<id_width$}  {:<7}  {:<name_width$}  {:<6}  TEMPLATE\n",
        "#",
        "ID",
        "ENABLED",
        "NAME",
        "JOINER",
        id_width = id_width,
        name_width = name_width
    );

    for (index, provider) in providers.iter().enumerate() {
        output.push_str(&format!(
            "{:>3}  {:<id_width$}  {:<7}  {:<name_width$}  {:<6}  {}\n",
            index + 1,
            provider.id,
            if provider.enabled { "yes" } else { "no" },
            provider.name,
            provider.joiner,
            provider.url_template,
            id_width = id_width,
            name_width = name_width
        ));
    }

    output
}

fn column_width(lengths: impl Iterator<Item = usize>, header: &str) -> usize {
    lengths.max().unwrap_or(0).max(header.len())
}
