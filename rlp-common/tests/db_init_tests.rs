//! Tests for database initialization against SQLite

use rlp_common::config::DatabaseConfig;
use rlp_common::db::{create_schema, init_database, Dialect};

#[tokio::test]
async fn test_in_memory_schema_created() {
    let config = DatabaseConfig::from_url("sqlite::memory:").unwrap();
    let pool = init_database(&config).await.expect("init in-memory database");

    for table in ["recipes", "recipe_stats", "training_data"] {
        let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("table {} missing: {}", table, e));
        assert_eq!(count, 0);
    }
}

#[tokio::test]
async fn test_schema_creation_is_idempotent() {
    let config = DatabaseConfig::from_url("sqlite::memory:").unwrap();
    let pool = init_database(&config).await.unwrap();

    create_schema(&pool, Dialect::Sqlite)
        .await
        .expect("second schema pass should succeed");
}

#[tokio::test]
async fn test_name_job_pair_is_unique() {
    let config = DatabaseConfig::from_url("sqlite::memory:").unwrap();
    let pool = init_database(&config).await.unwrap();

    let insert = "INSERT INTO recipes (name, job, recipe_level, patch_version, collected_at) \
                  VALUES (?, ?, ?, ?, ?)";

    sqlx::query(insert)
        .bind("Iron Ingot")
        .bind("BSM")
        .bind(50_i64)
        .bind("6.4")
        .bind("2024-01-01T00:00:00Z")
        .execute(&pool)
        .await
        .unwrap();

    // Same name, different job is fine
    sqlx::query(insert)
        .bind("Iron Ingot")
        .bind("ARM")
        .bind(50_i64)
        .bind("6.4")
        .bind("2024-01-01T00:00:00Z")
        .execute(&pool)
        .await
        .unwrap();

    let err = sqlx::query(insert)
        .bind("Iron Ingot")
        .bind("BSM")
        .bind(50_i64)
        .bind("6.4")
        .bind("2024-01-01T00:00:00Z")
        .execute(&pool)
        .await
        .unwrap_err();

    match err {
        sqlx::Error::Database(db_err) => assert!(db_err.is_unique_violation()),
        other => panic!("expected database error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_file_database_persists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("recipes.db");
    let url = format!("sqlite://{}?mode=rwc", path.display());
    let config = DatabaseConfig::from_url(&url).unwrap();

    let pool = init_database(&config).await.unwrap();
    pool.close().await;

    assert!(path.exists(), "database file should be created");

    // Reopening an existing database succeeds
    let pool = init_database(&config).await.unwrap();
    pool.close().await;
}

#[test]
fn test_unsupported_scheme_rejected() {
    let config = DatabaseConfig::from_url("postgres://localhost/db").unwrap();
    assert!(Dialect::from_config(&config).is_err());
}
