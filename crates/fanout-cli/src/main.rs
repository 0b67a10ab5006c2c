use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use fanout_cli::{OutputFormat, Session, commands};
use fanout_core::{NewProvider, ProviderPatch};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fanout")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "Open one search query against many search providers at once",
    long_about = "Fanout keeps a list of search provider templates and opens a query with every \
                  enabled provider, in the system default browser or one you choose."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "pretty")]
    format: OutputFormat,

    /// Directory holding sites.json (defaults to the platform data directory)
    #[arg(long, global = true, env = "FANOUT_DATA_DIR", value_name = "DIR")]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search all enabled providers
    Search {
        /// Search terms
        #[arg(value_name = "QUERY", required = true, num_args = 1..)]
        query: Vec<String>,

        /// Browser name from 'fanout browsers', executable path, or program on PATH
        #[arg(short, long, env = "FANOUT_BROWSER")]
        browser: Option<String>,

        /// Print the URLs instead of opening them
        #[arg(long)]
        dry_run: bool,
    },

    /// List search providers
    List,

    /// Add a search provider
    Add {
        /// Display name
        #[arg(long)]
        name: String,

        /// URL template containing [query]
        #[arg(long, value_name = "TEMPLATE")]
        url: String,

        /// String placed between query words
        #[arg(long, default_value = "+")]
        joiner: String,

        /// Optional group label
        #[arg(long)]
        group: Option<String>,
    },

    /// Edit fields of a search provider
    Edit {
        /// Provider id
        id: String,

        /// New display name
        #[arg(long)]
        name: Option<String>,

        /// New URL template containing [query]
        #[arg(long, value_name = "TEMPLATE")]
        url: Option<String>,

        /// New joiner
        #[arg(long)]
        joiner: Option<String>,

        /// New group label (empty to clear)
        #[arg(long)]
        group: Option<String>,
    },

    /// Remove a search provider
    Remove {
        /// Provider id
        id: String,
    },

    /// Include a provider in searches
    Enable {
        /// Provider id
        id: String,
    },

    /// Exclude a provider from searches
    Disable {
        /// Provider id
        id: String,
    },

    /// Flip whether a provider is included in searches
    Toggle {
        /// Provider id
        id: String,
    },

    /// Move a provider to another position (positions start at 1)
    Move {
        /// Current position
        from: usize,

        /// New position
        to: usize,
    },

    /// List browsers detected on this machine
    Browsers,

    /// Import providers from the legacy sites.json
    ImportLegacy {
        /// Legacy file to read instead of the default location
        #[arg(long, value_name = "FILE")]
        file: Option<PathBuf>,
    },

    /// Generate shell completion scripts
    #[command(after_help = "SUPPORTED SHELLS:\n  bash, zsh, fish, powershell, elvish\n\n\
                            INSTALLATION:\n  \
                            bash:  fanout completion --shell bash >> ~/.bashrc\n  \
                            zsh:   fanout completion --shell zsh > \"${fpath[1]}/_fanout\"\n  \
                            fish:  fanout completion --shell fish > ~/.config/fish/completions/fanout.fish")]
    Completion {
        /// Target shell
        #[arg(short, long, value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    let format = cli.format;

    // Commands that never touch the provider store
    match cli.command {
        Commands::Completion { shell } => {
            return commands::completion::execute(shell, &mut Cli::command());
        }
        Commands::Browsers => {
            return commands::browsers::execute(&fanout_browser::get_browsers(), format);
        }
        _ => {}
    }

    let mut session = Session::open(cli.data_dir)?;

    match cli.command {
        Commands::Search {
            query,
            browser,
            dry_run,
        } => commands::search::execute(&mut session, &query, browser.as_deref(), dry_run, format),
        Commands::List => commands::providers::list(&session, format),
        Commands::Add {
            name,
            url,
            joiner,
            group,
        } => {
            let mut new = NewProvider::new(name, url, joiner);
            if let Some(group) = group {
                new = new.with_group(group);
            }
            commands::providers::add(&mut session, new)
        }
        Commands::Edit {
            id,
            name,
            url,
            joiner,
            group,
        } => commands::providers::edit(
            &mut session,
            &id,
            ProviderPatch {
                name,
                url_template: url,
                joiner,
                enabled: None,
                group,
            },
        ),
        Commands::Remove { id } => commands::providers::remove(&mut session, &id),
        Commands::Enable { id } => commands::providers::set_enabled(&mut session, &id, true),
        Commands::Disable { id } => commands::providers::set_enabled(&mut session, &id, false),
        Commands::Toggle { id } => commands::providers::toggle(&mut session, &id),
        Commands::Move { from, to } => commands::providers::move_provider(&mut session, from, to),
        Commands::ImportLegacy { file } => commands::legacy::execute(&mut session, file),
        Commands::Browsers | Commands::Completion { .. } => Ok(()),
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("warn,fanout=debug,fanout_cli=debug,fanout_core=debug,fanout_browser=debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("warn,fanout=info,fanout_cli=info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
