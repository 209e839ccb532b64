//! Cookie Consent CLI
//!
//! Thin wrapper around consent-core for command-line usage. Runs the same
//! lifecycle a page would, headless, against a redb-backed store.
//!
//! ## Usage
//!
//! ```bash
//! # Show the stored consent record
//! consent status
//!
//! # Accept all categories
//! consent accept
//!
//! # Reject everything but necessary cookies
//! consent reject
//!
//! # Save a custom selection
//! consent set --analytics --preferences
//!
//! # Forget the stored record
//! consent clear
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use consent_core::{
    dom, ConsentManager, ConsentRecord, KeyValueStore, MemoryPage, RedbStore, CONSENT_STORAGE_KEY,
};

/// Cookie Consent - preference lifecycle manager
#[derive(Parser)]
#[command(name = "consent")]
#[command(version = "0.1.0")]
#[command(about = "Cookie consent preference manager")]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Data directory (default: ~/.consent/data)
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the stored consent record
    Status,

    /// Accept all cookie categories
    Accept,

    /// Reject all non-necessary categories
    Reject,

    /// Save a custom category selection
    Set {
        /// Grant analytics cookies
        #[arg(long)]
        analytics: bool,

        /// Grant marketing cookies
        #[arg(long)]
        marketing: bool,

        /// Grant preference cookies
        #[arg(long)]
        preferences: bool,
    },

    /// Remove the stored consent record
    Clear,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    let data_dir = cli.data_dir.unwrap_or_else(default_data_dir);
    let store = RedbStore::new(data_dir.join("origin.redb"))?;

    match cli.command {
        Commands::Status => {
            let manager = ConsentManager::new(store, MemoryPage::new());
            match manager.consent() {
                Some(record) => print_record(&record),
                None => println!("No consent recorded."),
            }
        }

        Commands::Accept => {
            let mut manager = ConsentManager::new(store, MemoryPage::new());
            manager.initialize();
            manager.accept_all();
            println!("All cookie categories accepted.");
            if let Some(record) = manager.consent() {
                print_record(&record);
            }
        }

        Commands::Reject => {
            let mut manager = ConsentManager::new(store, MemoryPage::new());
            manager.initialize();
            manager.reject_all();
            println!("Non-necessary cookie categories rejected.");
            if let Some(record) = manager.consent() {
                print_record(&record);
            }
        }

        Commands::Set {
            analytics,
            marketing,
            preferences,
        } => {
            // Stage the selection as checkbox state so the save path is the
            // same one the settings view drives
            let page = MemoryPage::new()
                .with_checkbox(dom::ANALYTICS_CHECKBOX, analytics)
                .with_checkbox(dom::MARKETING_CHECKBOX, marketing)
                .with_checkbox(dom::PREFERENCES_CHECKBOX, preferences);

            let mut manager = ConsentManager::new(store, page);
            manager.initialize();
            manager.save_custom_preferences();
            println!("Custom preferences saved.");
            if let Some(record) = manager.consent() {
                print_record(&record);
            }
        }

        Commands::Clear => {
            store.remove_item(CONSENT_STORAGE_KEY)?;
            println!("Consent record removed.");
        }
    }

    Ok(())
}

fn print_record(record: &ConsentRecord) {
    println!();
    println!("Consent record:");
    println!("  Version: {}", record.version);
    println!("  Saved: {}", record.timestamp.to_rfc3339());
    println!();
    println!("Preferences:");
    println!("  necessary: {}", grant(record.preferences.necessary));
    println!("  analytics: {}", grant(record.preferences.analytics));
    println!("  marketing: {}", grant(record.preferences.marketing));
    println!("  preferences: {}", grant(record.preferences.preferences));
}

fn grant(enabled: bool) -> &'static str {
    if enabled {
        "granted"
    } else {
        "denied"
    }
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .init();
}

/// Get the default data directory (~/.consent/data)
fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".consent")
        .join("data")
}
