//! quotesync - manage a local quote collection and sync it with a remote service.
//!
//! Quotes live in a local key-value store and can be shown at random,
//! filtered by category, imported and exported as JSON, and periodically
//! reconciled with a remote endpoint (remote wins on conflicting text).
//!
//! Common invocations:
//!   quotesync show                      # Random quote from the last filter
//!   quotesync show -c Life              # Random quote from one category
//!   quotesync add "text" "category"     # Add a quote
//!   quotesync sync                      # One pull/merge/push cycle
//!   quotesync watch                     # Keep syncing until Ctrl-C

mod application;
mod cli;
mod domain;
mod infrastructure;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use application::{
    categories, export_json, filter_by_category, format_quotes_json, format_quotes_plain,
    format_quotes_table, format_selected, import_json, notify_report, OutputFormat, QuoteStore,
    Selector, SyncService,
};
use cli::{Cli, Commands};
use domain::{AppConfig, ALL_CATEGORIES};
use infrastructure::{load_config, HttpRemote, SessionKv, SqliteKv};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

/// Main application logic.
async fn run(cli: Cli) -> domain::Result<()> {
    let format = cli
        .output_format()
        .map_err(|e| domain::AppError::Config { message: e })?;

    let config = load_config()?;

    match cli.command {
        Commands::Show { category } => cmd_show(&config, category.as_deref())?,
        Commands::Last => cmd_last(&config)?,
        Commands::Add { text, category } => cmd_add(&config, &text, &category)?,
        Commands::List { category } => cmd_list(&config, category.as_deref(), format)?,
        Commands::Categories => cmd_categories(&config)?,
        Commands::Export { output } => cmd_export(&config, output.as_deref())?,
        Commands::Import { file } => cmd_import(&config, &file)?,
        Commands::Sync => cmd_sync(&config).await?,
        Commands::Watch { interval } => cmd_watch(&config, interval).await?,
        Commands::Paths => cmd_paths(&config),
    }

    Ok(())
}

/// Open the persistent quote store for this configuration.
fn open_store(config: &AppConfig) -> domain::Result<QuoteStore> {
    let kv = SqliteKv::open(&config.storage_db_path())?;
    QuoteStore::open(Box::new(kv))
}

/// Open the session-scoped selector.
fn open_selector() -> Selector {
    Selector::new(Box::new(SessionKv::new(AppConfig::session_file_path())))
}

/// Show a random quote from the chosen (or remembered) category.
fn cmd_show(config: &AppConfig, category: Option<&str>) -> domain::Result<()> {
    let store = open_store(config)?;
    let selector = open_selector();

    let category = match category {
        Some(c) => {
            store.set_last_selected_category(c)?;
            c.to_string()
        }
        None => store.last_selected_category()?,
    };

    match selector.select(&category, store.quotes())? {
        Some(selected) => println!("{}", format_selected(&selected)),
        None => println!(
            "{}",
            format!("No quotes in category \"{category}\" yet.").yellow()
        ),
    }

    Ok(())
}

/// Show again the quote last picked in this session.
fn cmd_last(config: &AppConfig) -> domain::Result<()> {
    let store = open_store(config)?;
    let selector = open_selector();

    match selector.restore_last(store.quotes())? {
        Some(selected) => println!("{}", format_selected(&selected)),
        None => println!("{}", "Nothing shown yet this session.".yellow()),
    }

    Ok(())
}

/// Add a quote to the collection.
fn cmd_add(config: &AppConfig, text: &str, category: &str) -> domain::Result<()> {
    let mut store = open_store(config)?;
    let quote = store.add(text, category)?;

    println!(
        "{} New quote added to {}.",
        "✓".green().bold(),
        quote.category.cyan()
    );

    Ok(())
}

/// List stored quotes, optionally filtered by category.
fn cmd_list(
    config: &AppConfig,
    category: Option<&str>,
    format: OutputFormat,
) -> domain::Result<()> {
    let store = open_store(config)?;

    let quotes: Vec<domain::Quote> =
        filter_by_category(category.unwrap_or(ALL_CATEGORIES), store.quotes())
            .into_iter()
            .cloned()
            .collect();

    let output = match format {
        OutputFormat::Plain => format_quotes_plain(&quotes),
        OutputFormat::Json => format_quotes_json(&quotes).map_err(|e| {
            domain::AppError::InvalidData {
                message: format!("Failed to serialize quotes: {e}"),
            }
        })?,
        OutputFormat::Table => format_quotes_table(&quotes),
    };

    println!("{output}");
    println!();
    println!("Total: {} quote(s)", quotes.len());

    Ok(())
}

/// List the categories currently in the collection.
fn cmd_categories(config: &AppConfig) -> domain::Result<()> {
    let store = open_store(config)?;
    let last = store.last_selected_category()?;

    // "all" sentinel first, the way the dropdown showed it
    for name in std::iter::once(ALL_CATEGORIES.to_string())
        .chain(categories(store.quotes()))
    {
        if name == last {
            println!("{} {}", "*".green(), name.bold());
        } else {
            println!("  {name}");
        }
    }

    Ok(())
}

/// Export the collection as pretty-printed JSON.
fn cmd_export(config: &AppConfig, output: Option<&str>) -> domain::Result<()> {
    let store = open_store(config)?;
    let content = export_json(store.quotes())?;

    let path = output.unwrap_or("quotes.json");
    std::fs::write(path, content)
        .map_err(|e| domain::AppError::io(format!("Failed to write {path}"), e))?;

    println!(
        "{} Exported {} quotes to {}",
        "✓".green().bold(),
        store.quotes().len(),
        path
    );

    Ok(())
}

/// Import quotes from a JSON file, appending them to the collection.
fn cmd_import(config: &AppConfig, file: &str) -> domain::Result<()> {
    let bytes = std::fs::read(file)
        .map_err(|e| domain::AppError::io(format!("Failed to read {file}"), e))?;

    let mut store = open_store(config)?;
    let count = import_json(&bytes, store.quotes_mut())?;
    store.persist()?;

    println!("{} Imported {} quotes from {}", "✓".green().bold(), count, file);

    Ok(())
}

/// Run one reconcile cycle against the remote service.
async fn cmd_sync(config: &AppConfig) -> domain::Result<()> {
    let store = open_store(config)?;
    let remote = HttpRemote::new(&config.remote.endpoint, config.remote.timeout_secs)?;
    let service = SyncService::new(store, remote);

    let report = service.sync().await?;
    notify_report(&report);

    Ok(())
}

/// Reconcile with the remote service on an interval until Ctrl-C.
async fn cmd_watch(config: &AppConfig, interval: Option<u64>) -> domain::Result<()> {
    let interval = match interval {
        Some(secs) => secs,
        None => {
            if !config.sync.enabled {
                return Err(domain::AppError::Config {
                    message: "periodic sync is disabled in config; pass --interval to override"
                        .into(),
                });
            }
            config.sync.interval_secs
        }
    };

    let store = open_store(config)?;
    let remote = HttpRemote::new(&config.remote.endpoint, config.remote.timeout_secs)?;
    let service = SyncService::new(store, remote);

    service.watch(interval).await
}

/// Show data and config paths being used.
fn cmd_paths(config: &AppConfig) {
    println!("{}", "📂 quotesync paths".bold());
    println!();
    println!("  data dir:     {}", config.data_dir().display());
    println!("  quote store:  {}", config.storage_db_path().display());
    println!("  config file:  {}", config.config_file_path().display());
    println!("  session file: {}", AppConfig::session_file_path().display());
    println!("  remote:       {}", config.remote.endpoint);
}

/// Setup tracing/logging based on verbosity level.
fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time())
        .with(filter)
        .init();
}
