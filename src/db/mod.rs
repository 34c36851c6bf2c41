use std::str::FromStr;

use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};

use crate::models::{Calibration, CalibrationError};

pub type Db = Pool<Sqlite>;

/// Calibration is a single shared document
const CALIBRATION_ROW: i64 = 1;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] CalibrationError),
}

// Create connection pool, creating the database file if it doesn't exist yet
pub async fn create_pool(url: &str) -> Result<Db, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
    // In-memory databases are per connection
    let max_connections = if url.contains(":memory:") { 1 } else { 20 };

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;
    tracing::info!(url, "connected to calibration database");
    Ok(pool)
}

// Run migrations (create tables if not exist)
pub async fn run_migrations(db: &Db) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS calibration (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            data TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .execute(db)
    .await?;
    Ok(())
}

/// Load the stored calibration.
///
/// Falls back to factory defaults when nothing has been saved yet or the stored
/// document can't be parsed. Database failures are returned to the caller.
pub async fn load_calibration(db: &Db) -> Result<Calibration, StoreError> {
    let row: Option<(String,)> = sqlx::query_as("SELECT data FROM calibration WHERE id = ?")
        .bind(CALIBRATION_ROW)
        .fetch_optional(db)
        .await?;

    let Some((data,)) = row else {
        return Ok(Calibration::default());
    };

    match serde_json::from_str::<Calibration>(&data) {
        Ok(calibration) => Ok(calibration),
        Err(e) => {
            tracing::warn!(error = %e, "stored calibration is corrupt, using defaults");
            Ok(Calibration::default())
        }
    }
}

/// Validate and persist a calibration, replacing the previous one
pub async fn save_calibration(db: &Db, calibration: &Calibration) -> Result<(), StoreError> {
    calibration.validate()?;
    let data = serde_json::to_string(calibration)?;

    sqlx::query(
        r#"
        INSERT INTO calibration (id, data, updated_at)
        VALUES (?, ?, ?)
        ON CONFLICT(id) DO UPDATE SET
            data = excluded.data,
            updated_at = excluded.updated_at
        "#,
    )
    .bind(CALIBRATION_ROW)
    .bind(data)
    .bind(Utc::now().to_rfc3339())
    .execute(db)
    .await?;

    tracing::info!(
        brands = calibration.brand_multipliers.len(),
        drops_enabled = calibration.drop_conversion.enabled,
        "calibration saved"
    );
    Ok(())
}

/// When the calibration was last saved, if ever
pub async fn calibration_updated_at(db: &Db) -> Result<Option<String>, StoreError> {
    let row: Option<(String,)> =
        sqlx::query_as("SELECT updated_at FROM calibration WHERE id = ?")
            .bind(CALIBRATION_ROW)
            .fetch_optional(db)
            .await?;
    Ok(row.map(|(ts,)| ts))
}

// Overwrite the stored document without validation
#[cfg(test)]
pub(crate) async fn store_raw_calibration(db: &Db, data: &str) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT OR REPLACE INTO calibration (id, data, updated_at) VALUES (?, ?, ?)")
        .bind(CALIBRATION_ROW)
        .bind(data)
        .bind(Utc::now().to_rfc3339())
        .execute(db)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Brand;

    async fn memory_db() -> Db {
        let db = create_pool("sqlite::memory:").await.unwrap();
        run_migrations(&db).await.unwrap();
        db
    }

    #[tokio::test]
    async fn empty_store_serves_defaults() {
        let db = memory_db().await;
        assert_eq!(load_calibration(&db).await.unwrap(), Calibration::default());
        assert!(calibration_updated_at(&db).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn saved_calibration_is_loaded_back() {
        let db = memory_db().await;
        let cal = Calibration::default()
            .with_multiplier(Brand::Wilton, 1.3)
            .with_drops(true);

        save_calibration(&db, &cal).await.unwrap();
        assert_eq!(load_calibration(&db).await.unwrap(), cal);
        assert!(calibration_updated_at(&db).await.unwrap().is_some());

        let replaced = cal.with_multiplier(Brand::Generic, 0.7);
        save_calibration(&db, &replaced).await.unwrap();
        assert_eq!(load_calibration(&db).await.unwrap(), replaced);
    }

    #[tokio::test]
    async fn invalid_calibration_is_not_saved() {
        let db = memory_db().await;
        let bad = Calibration::default().with_multiplier(Brand::Sugarflair, -2.0);

        let err = save_calibration(&db, &bad).await.unwrap_err();
        assert!(matches!(err, StoreError::Invalid(_)));
        assert_eq!(load_calibration(&db).await.unwrap(), Calibration::default());
    }

    #[tokio::test]
    async fn corrupt_document_serves_defaults() {
        let db = memory_db().await;
        store_raw_calibration(&db, "{not json").await.unwrap();
        assert_eq!(load_calibration(&db).await.unwrap(), Calibration::default());
    }

    #[tokio::test]
    async fn read_failure_is_an_error() {
        let db = memory_db().await;
        let cal = Calibration::default().with_multiplier(Brand::Wilton, 3.0);
        save_calibration(&db, &cal).await.unwrap();

        sqlx::query("ALTER TABLE calibration RENAME TO calibration_moved")
            .execute(&db)
            .await
            .unwrap();

        let err = load_calibration(&db).await.unwrap_err();
        assert!(matches!(err, StoreError::Database(_)));
        assert!(calibration_updated_at(&db).await.is_err());
    }
}
