//! SQLite pool setup and table bootstrap for `bakeries` and `baked_goods`.

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

const BAKERIES_DDL: &str = r#"
    CREATE TABLE IF NOT EXISTS bakeries (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
"#;

const BAKED_GOODS_DDL: &str = r#"
    CREATE TABLE IF NOT EXISTS baked_goods (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        price REAL NOT NULL CHECK (price >= 0),
        bakery_id INTEGER NOT NULL REFERENCES bakeries (id),
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
"#;

const BAKED_GOODS_BAKERY_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS baked_goods_bakery_id ON baked_goods (bakery_id)";

/// Open a pool on `database_url`, creating the database file if needed. Foreign keys are enforced.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);
    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
}

/// Private in-memory database on a single connection that is never recycled.
pub async fn in_memory() -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
    SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
}

/// Create both tables if they do not exist yet. Idempotent.
pub async fn ensure_tables(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for ddl in [BAKERIES_DDL, BAKED_GOODS_DDL, BAKED_GOODS_BAKERY_INDEX] {
        sqlx::query(ddl).execute(pool).await?;
    }
    tracing::debug!("tables ensured");
    Ok(())
}
