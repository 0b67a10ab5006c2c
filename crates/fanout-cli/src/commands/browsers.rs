use crate::OutputFormat;
use anyhow::Result;
use console::style;
use fanout_browser::Browser;

/// List the browsers detected on this host
pub fn execute(browsers: &[Browser], format: OutputFormat) -> Result<()> {
    tracing::debug!("Detected {} browser entries", browsers.len());

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(browsers)?),
        OutputFormat::Table => print!("{}", format_table(browsers)),
        OutputFormat::Pretty => print!("{}", format_pretty(browsers)),
    }

    Ok(())
}

fn format_pretty(browsers: &[Browser]) -> String {
    let mut output = format!("\n{}\n\n", style("Browsers").bold().cyan());

    for browser in browsers {
        if browser.is_system_default() {
            output.push_str(&format!(
                "  {}  {}\n",
                style(&browser.name).bold(),
                style("(OS default handler)").dim()
            ));
        } else {
            output.push_str(&format!(
                "  {}  {}\n",
                style(&browser.name).bold(),
                browser.path
            ));
        }
    }

    if browsers.len() == 1 {
        output.push_str(&format!(
            "\n{}\n",
            style("No installed browsers detected; URLs open with the system default.").dim()
        ));
    }
    output.push('\n');
    output
}

fn format_table(browsers: &[Browser]) -> String {
    let width = browsers
        .iter()
        .map(|b| b.name.len())
        .max()
        .unwrap_or(0)
        .max("NAME".len());

    let mut output = format!("{:<width$}  PATH\n", "NAME", width = width);
    for browser in browsers {
        output.push_str(&format!(
            "{:<width$}  {}\n",
            browser.name,
            browser.path,
            width = width
        ));
    }
    output
}
