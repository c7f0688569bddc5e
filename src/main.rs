//! Lending Catalog - import check
//!
//! Loads the configured catalog file and reports what was imported. The
//! interactive front end lives elsewhere.

use anyhow::{bail, Context};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lending_catalog::{config::AppConfig, Catalog};

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    init_tracing(&config);

    tracing::info!("Starting Lending Catalog v{}", env!("CARGO_PKG_VERSION"));

    let Some(path) = std::env::args_os()
        .nth(1)
        .map(Into::into)
        .or_else(|| config.import.path.clone())
    else {
        bail!("No catalog file given; pass a path or set LENDING_IMPORT_PATH");
    };

    let mut catalog = Catalog::new();
    let report = match catalog.import_file(&path, config.import_limits()) {
        Ok(report) => report,
        Err(e) if e.is_recoverable() => {
            tracing::warn!(path = %path.display(), error = %e, "Catalog rejected");
            return Err(e).context("Fix the catalog file and try again");
        }
        Err(e) => return Err(e).with_context(|| format!("Could not read {}", path.display())),
    };

    tracing::info!(
        path = %path.display(),
        books = report.books,
        users = report.users,
        "Catalog imported"
    );
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("lending_catalog={}", config.logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
