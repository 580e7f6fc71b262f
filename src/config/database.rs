//! Database configuration module for `OrderBuddy`.
//!
//! This module handles the `SQLite` connection and table creation using `SeaORM`.
//! The only table is `storage_entries`, created from its entity definition with
//! `Schema::create_table_from_entity` so the schema always matches the Rust model.

use crate::entities::StorageEntry;
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use std::path::Path;

/// Default location of the local database, created on first use.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/order_buddy.sqlite?mode=rwc";

/// Gets the database URL from the `DATABASE_URL` environment variable,
/// falling back to [`DEFAULT_DATABASE_URL`].
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection to the configured `SQLite` database.
///
/// The parent directory of a file-backed database is created if missing.
pub async fn create_connection() -> Result<DatabaseConnection> {
    let url = get_database_url();
    if let Some(dir) = database_dir(&url) {
        std::fs::create_dir_all(dir)?;
    }
    Database::connect(&url).await.map_err(Into::into)
}

/// Directory holding the database file, if the URL points at one.
fn database_dir(url: &str) -> Option<&Path> {
    let path = url.strip_prefix("sqlite://")?;
    let path = path.split('?').next().unwrap_or(path);
    Path::new(path)
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
}

/// Creates the `storage_entries` table if it does not exist yet.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut storage_table = schema.create_table_from_entity(StorageEntry);
    storage_table.if_not_exists();

    db.execute(builder.build(&storage_table)).await?;
    Ok(())
}
