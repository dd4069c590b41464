//! Database initialization
//!
//! Connects through sqlx's driver-agnostic `Any` pool so the same queries run
//! against MySQL in production and SQLite in tests, then creates the three
//! recipe tables if they do not exist yet.

use crate::config::DatabaseConfig;
use crate::{Error, Result};
use sqlx::any::{install_default_drivers, AnyPoolOptions};
use sqlx::AnyPool;
use std::time::Duration;
use tracing::info;

/// SQL dialect behind the pool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    MySql,
    Sqlite,
}

impl Dialect {
    pub fn from_config(config: &DatabaseConfig) -> Result<Self> {
        match config.scheme() {
            "mysql" | "mariadb" => Ok(Dialect::MySql),
            "sqlite" => Ok(Dialect::Sqlite),
            other => Err(Error::Config(format!(
                "Unsupported database scheme: {}",
                other
            ))),
        }
    }

    /// Auto-increment primary key column definition
    fn id_column(self) -> &'static str {
        match self {
            Dialect::MySql => "id BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY",
            // AUTOINCREMENT requires exactly INTEGER PRIMARY KEY
            Dialect::Sqlite => "id INTEGER PRIMARY KEY AUTOINCREMENT",
        }
    }
}

/// Open a connection pool for the configured database
pub async fn connect(config: &DatabaseConfig) -> Result<AnyPool> {
    install_default_drivers();
    let dialect = Dialect::from_config(config)?;

    // Each connection to sqlite::memory: is a separate database, so the pool
    // must hold exactly one connection for its whole lifetime.
    let mut options = if config.is_in_memory() {
        AnyPoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
    } else {
        AnyPoolOptions::new().max_connections(10)
    };

    if dialect == Dialect::Sqlite {
        options = options.after_connect(|conn, _meta| {
            Box::pin(async move {
                sqlx::query("PRAGMA foreign_keys = ON").execute(conn).await?;
                Ok(())
            })
        });
    }

    let pool = options.connect(config.url()).await?;
    info!("Connected to database: {}", config.redacted_url());
    Ok(pool)
}

/// Connect and create tables if needed (idempotent)
pub async fn init_database(config: &DatabaseConfig) -> Result<AnyPool> {
    let dialect = Dialect::from_config(config)?;
    let pool = connect(config).await?;
    create_schema(&pool, dialect).await?;
    Ok(pool)
}

/// Create `recipes`, `recipe_stats` and `training_data`
pub async fn create_schema(pool: &AnyPool, dialect: Dialect) -> Result<()> {
    create_recipes_table(pool, dialect).await?;
    create_recipe_stats_table(pool).await?;
    create_training_data_table(pool).await?;
    info!("Recipe schema ready");
    Ok(())
}

async fn create_recipes_table(pool: &AnyPool, dialect: Dialect) -> Result<()> {
    let sql = format!(
        r#"
        CREATE TABLE IF NOT EXISTS recipes (
            {},
            name VARCHAR(100) NOT NULL,
            job VARCHAR(3) NOT NULL,
            recipe_level BIGINT NOT NULL,
            master_book_level BIGINT NOT NULL DEFAULT 0,
            stars BIGINT NOT NULL DEFAULT 0,
            patch_version VARCHAR(10) NOT NULL,
            collected_at VARCHAR(40) NOT NULL,
            UNIQUE (name, job)
        )
        "#,
        dialect.id_column()
    );

    sqlx::query(&sql).execute(pool).await?;
    Ok(())
}

async fn create_recipe_stats_table(pool: &AnyPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS recipe_stats (
            id BIGINT NOT NULL PRIMARY KEY,
            max_durability BIGINT NOT NULL,
            max_quality BIGINT NOT NULL,
            required_durability BIGINT NOT NULL,
            FOREIGN KEY (id) REFERENCES recipes(id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_training_data_table(pool: &AnyPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS training_data (
            id BIGINT NOT NULL PRIMARY KEY,
            required_craftsmanship BIGINT NOT NULL,
            required_control BIGINT NOT NULL,
            progress_per_100 DOUBLE NOT NULL,
            quality_per_100 DOUBLE NOT NULL,
            FOREIGN KEY (id) REFERENCES recipes(id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
