use std::str::FromStr;

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::config::Config;

const CREATE_PUNCH_CARDS: &str = r#"
    CREATE TABLE IF NOT EXISTS punch_cards (
        id INTEGER PRIMARY KEY,
        employee_name TEXT NOT NULL,
        check_in_time TEXT,
        check_out_time TEXT
    )
"#;

pub async fn init_db(config: &Config) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&config.database_url)
        .with_context(|| format!("invalid DATABASE_URL {:?}", config.database_url))?
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.db_max_connections.max(1))
        // an in-memory database lives only as long as its connection
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .context("Failed to connect to database")?;

    create_schema(&pool).await?;

    Ok(pool)
}

pub async fn create_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(CREATE_PUNCH_CARDS)
        .execute(pool)
        .await
        .context("Failed to create punch_cards table")?;
    Ok(())
}

#[cfg(test)]
pub async fn test_pool() -> SqlitePool {
    init_db(&Config::for_tests())
        .await
        .expect("in-memory database")
}
