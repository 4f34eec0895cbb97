//! migrate-passwords — one-shot credential migration
//!
//! Rewrites every legacy plaintext password in the user store as a salted
//! bcrypt hash. Already-hashed records are left untouched, so the tool is
//! safe to run repeatedly.
//!
//! ```sh
//! # Migrate the store named in the config file
//! migrate-passwords
//!
//! # Explicit store location
//! migrate-passwords --users-file ./users.csv
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use salestrack::config::AppConfig;
use salestrack::default_config_path;
use salestrack::domain::UserStore;
use salestrack::infrastructure::crypto::migrate_plaintext;
use salestrack::infrastructure::store::CsvUserStore;

/// Hash any remaining plaintext passwords in the user store.
#[derive(Parser, Debug)]
#[command(
    name = "migrate-passwords",
    version,
    about = "One-shot migration of legacy plaintext passwords to bcrypt hashes"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "SALESTRACK_CONFIG")]
    config: Option<PathBuf>,

    /// Path to the users CSV; overrides the configured location.
    #[arg(short, long)]
    users_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run(cli).await {
        error!("Migration aborted: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config_path = cli.config.unwrap_or_else(default_config_path);
    let app_cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            info!("No config loaded ({}), using defaults", e);
            AppConfig::default()
        }
    };

    let users_file = cli.users_file.unwrap_or(app_cfg.store.users_file);
    let store = CsvUserStore::new(&users_file);
    info!("Migrating user store: {}", users_file.display());

    // A missing or unparseable store aborts; migration never fabricates an
    // empty store out of a broken one.
    let mut records = store.load().await?;
    let total = records.len();

    let migrated = migrate_plaintext(&mut records, app_cfg.security.bcrypt_cost)?;
    if migrated > 0 {
        store.save(&records).await?;
    }

    println!("✅ All plaintext passwords have been hashed.");
    println!("   {migrated} of {total} record(s) migrated.");
    Ok(())
}
