use anyhow::Result;
use sqlx::{migrate::MigrateDatabase, sqlite::SqlitePoolOptions, Pool, Sqlite};
use std::time::Duration;

pub mod part_store;
pub mod phone_store;

pub type DbPool = Pool<Sqlite>;

/// Initialize the database connection pool
pub async fn init_db_pool(database_url: &str) -> Result<DbPool> {
    // Create the database if it doesn't exist
    if !Sqlite::database_exists(database_url).await.unwrap_or(false) {
        Sqlite::create_database(database_url).await?;
    }

    // Create connection pool
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(3))
        .connect(database_url)
        .await?;

    setup_database(&pool).await?;

    Ok(pool)
}

/// Set up the database schema
pub(crate) async fn setup_database(pool: &DbPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS phones (
            phone_id INTEGER PRIMARY KEY AUTOINCREMENT,
            model_id INTEGER NOT NULL,
            model TEXT NOT NULL,
            phone_cost REAL NOT NULL,
            date_acquired TEXT NOT NULL,
            status INTEGER NOT NULL DEFAULT 0,
            issues TEXT NOT NULL DEFAULT '',
            parts_purchased TEXT,
            sold REAL
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS parts (
            part_id INTEGER PRIMARY KEY AUTOINCREMENT,
            part_name TEXT NOT NULL,
            part_cost REAL NOT NULL,
            model_id INTEGER NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Load the reference parts catalog on first run
    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM parts")
        .fetch_one(pool)
        .await?;

    if count.0 == 0 {
        for &(part_name, part_cost, model_id) in PARTS_CATALOG {
            sqlx::query("INSERT INTO parts (part_name, part_cost, model_id) VALUES (?, ?, ?)")
                .bind(part_name)
                .bind(part_cost)
                .bind(model_id)
                .execute(pool)
                .await?;
        }
    }

    Ok(())
}

/// Purchasable parts per phone model. The catalog is reference data; the
/// HTTP surface never mutates it.
const PARTS_CATALOG: &[(&str, f64, i64)] = &[
    ("Screen assembly", 12.50, 60),
    ("Battery", 8.00, 60),
    ("Charging port flex", 5.00, 60),
    ("Home button", 3.50, 60),
    ("Rear camera", 9.00, 60),
    ("Screen assembly", 14.00, 65),
    ("Battery", 9.00, 65),
    ("Home button", 4.00, 65),
    ("Screen assembly", 17.50, 70),
    ("Battery", 10.00, 70),
    ("Charging port flex", 6.50, 70),
    ("Screen assembly", 22.00, 80),
    ("Battery", 11.50, 80),
    ("Rear camera", 14.00, 80),
];

#[cfg(test)]
pub(crate) async fn test_pool() -> DbPool {
    // A single connection keeps the in-memory database alive and shared
    // for the whole test.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");
    setup_database(&pool).await.expect("Failed to set up schema");
    pool
}
