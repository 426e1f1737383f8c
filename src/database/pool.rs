use std::str::FromStr;

use crate::config::get_config;
use crate::error::Result;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};

pub async fn create_pool() -> Result<SqlitePool> {
    let config = get_config();
    let options =
        SqliteConnectOptions::from_str(&config.database_url)?.create_if_missing(true);

    // An in-memory database is private to its connection; a pool with more
    // than one connection would see empty tables on all but the first.
    let max_connections = if config.database_url.contains(":memory:") {
        1
    } else {
        10
    };

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(std::time::Duration::from_secs(30))
        .connect_with(options)
        .await?;
    Ok(pool)
}
