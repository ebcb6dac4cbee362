//! Database migration command.
//!
//! Migration files live in `crates/portal/migrations/` and are embedded at
//! compile time, so the CLI binary carries them wherever it is deployed.

use super::CliError;

/// Run portal database migrations.
///
/// # Errors
///
/// Returns `CliError` if the database is unreachable or a migration fails.
pub async fn run() -> Result<(), CliError> {
    let pool = super::connect().await?;

    tracing::info!("Running portal migrations...");
    sqlx::migrate!("../portal/migrations").run(&pool).await?;

    tracing::info!("Portal migrations complete!");
    Ok(())
}
