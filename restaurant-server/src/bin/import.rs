//! Import Job: replace the restaurant table with the configured sheet

use anyhow::Context;
use restaurant_server::import::{ImportConfig, build_source, run_import};
use restaurant_server::{Store, init_logger_with_file};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Environment and logging
    let _ = dotenvy::dotenv();

    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into());
    init_logger_with_file(Some(&log_level), None);

    // 2. Resolve the source; a bad key file fails here, before the table is touched
    let config = ImportConfig::from_env().context("invalid import configuration")?;
    let source = build_source(&config)
        .await
        .context("failed to set up import source")?;
    let store = Store::create(&config.database_path);

    // 3. Fetch, drop + recreate, bulk insert
    let summary = run_import(source.as_ref(), &store)
        .await
        .with_context(|| format!("import into {} failed", config.database_path))?;

    tracing::info!(
        database = %config.database_path,
        rows = summary.rows,
        padded = summary.padded,
        "Restaurant table replaced"
    );
    Ok(())
}
