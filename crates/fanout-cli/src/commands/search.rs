use crate::{OutputFormat, Session};
use anyhow::{Result, anyhow};
use console::style;
use fanout_browser::{LaunchOutcome, Launcher};
use fanout_core::{LaunchRequest, is_blank, plan};

/// Open the query with every enabled provider
pub fn execute(
    session: &mut Session,
    query: &[String],
    browser: Option<&str>,
    dry_run: bool,
    format: OutputFormat,
) -> Result<()> {
    let query = query.join(" ");
    let requests = plan(&query, session.providers().iter());

    if requests.is_empty() {
        if is_blank(&query) {
            println!("Nothing to search for.");
        } else {
            println!("No enabled providers. Enable one with 'fanout enable <ID>'.");
        }
        return Ok(());
    }

    if dry_run {
        print_requests(&requests, format)?;
        return Ok(());
    }

    let browser = session.resolve_browser(browser)?;
    tracing::info!(
        "Searching {} providers with {}",
        requests.len(),
        browser.name
    );

    let outcomes = Launcher::system().dispatch(&requests, &browser);
    print_outcomes(&outcomes, format)?;

    let failed = outcomes.iter().filter(|o| !o.is_success()).count();
    if failed > 0 {
        return Err(anyhow!(
            "{} of {} launches failed",
            failed,
            outcomes.len()
        ));
    }

    Ok(())
}

fn print_requests(requests: &[LaunchRequest], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(requests)?),
        OutputFormat::Table | OutputFormat::Pretty => {
            for request in requests {
                println!("{}", request.url);
            }
        }
    }
    Ok(())
}

fn print_outcomes(outcomes: &[LaunchOutcome], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(outcomes)?),
        OutputFormat::Table => {
            for outcome in outcomes {
                println!(
                    "{:<4}  {}  {}",
                    if outcome.is_success() { "ok" } else { "fail" },
                    outcome.request.provider_name,
                    outcome.request.url
                );
            }
        }
        OutputFormat::Pretty => {
            for outcome in outcomes {
                match &outcome.error {
                    None => println!(
                        "{} {}  {}",
                        style("✓").green(),
                        style(&outcome.request.provider_name).bold(),
                        style(&outcome.request.url).dim()
                    ),
                    Some(error) => println!(
                        "{} {}  {}",
                        style("✗").red(),
                        style(&outcome.request.provider_name).bold(),
                        error
                    ),
                }
            }
        }
    }
    Ok(())
}
