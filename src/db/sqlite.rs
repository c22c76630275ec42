use crate::config::DEFAULT_DATABASE_URL;
use crate::db::models::DbAcceptedRow;
use crate::db::schema::SQLITE_INIT;
use crate::error::AppError;
use crate::types::ResourceKind;
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteRow};
use sqlx::{Pool, Row, Sqlite};
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

pub type SqlitePool = Pool<Sqlite>;

/// Open the database at `database_url`, creating file and tables if missing.
///
/// When the configured location cannot be opened (read-only mount, missing
/// permissions) the default `items.db` next to the process is used instead.
pub async fn open(database_url: &str) -> Result<AcceptedStorage, AppError> {
    open_with_fallback(database_url, DEFAULT_DATABASE_URL).await
}

/// Like [`open`], retrying with `fallback_url` when `database_url` fails.
pub async fn open_with_fallback(
    database_url: &str,
    fallback_url: &str,
) -> Result<AcceptedStorage, AppError> {
    let pool = match connect(database_url).await {
        Ok(pool) => pool,
        Err(e) if database_url != fallback_url => {
            warn!(
                database_url,
                fallback = fallback_url,
                error = %e,
                "failed to open configured database; falling back"
            );
            connect(fallback_url).await?
        }
        Err(e) => return Err(e),
    };

    let storage = AcceptedStorage::new(pool);
    storage.init_schema().await?;
    Ok(storage)
}

async fn connect(database_url: &str) -> Result<SqlitePool, AppError> {
    let connect_opts = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5));

    if let Some(dir) = connect_opts.get_filename().parent()
        && !dir.as_os_str().is_empty()
        && let Err(e) = std::fs::create_dir_all(dir)
    {
        warn!(path = %dir.display(), error = %e, "could not create database directory");
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(8)
        .connect_with(connect_opts)
        .await?;
    info!(database_url, "database opened");
    Ok(pool)
}

/// Persistence for both accepted-value tables. Every method is a single
/// parameterized statement; table and column names come from
/// [`ResourceKind`] constants, values are always bound.
#[derive(Clone)]
pub struct AcceptedStorage {
    pool: SqlitePool,
}

impl AcceptedStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), AppError> {
        // execute multiple statements safely (SQLite supports multi-commands but sqlx::query doesn't)
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    pub async fn list<K: ResourceKind>(&self) -> Result<Vec<DbAcceptedRow>, AppError> {
        let sql = format!(
            "SELECT id, {col} AS value, created_at FROM {table} ORDER BY id",
            col = K::COLUMN,
            table = K::TABLE
        );
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        rows.into_iter().map(Self::row_to_model).collect()
    }

    pub async fn list_values<K: ResourceKind>(&self) -> Result<Vec<String>, AppError> {
        let sql = format!(
            "SELECT {col} FROM {table} ORDER BY id",
            col = K::COLUMN,
            table = K::TABLE
        );
        let values: Vec<(String,)> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;
        Ok(values.into_iter().map(|(v,)| v).collect())
    }

    /// Ids of every row whose text equals `value` exactly.
    pub async fn lookup_ids<K: ResourceKind>(&self, value: &str) -> Result<Vec<i64>, AppError> {
        let sql = format!(
            "SELECT id FROM {table} WHERE {col} = ? ORDER BY id",
            col = K::COLUMN,
            table = K::TABLE
        );
        let ids: Vec<(i64,)> = sqlx::query_as(&sql)
            .bind(value)
            .fetch_all(&self.pool)
            .await?;
        Ok(ids.into_iter().map(|(id,)| id).collect())
    }

    /// Insert a row and return it as stored.
    pub async fn insert<K: ResourceKind>(&self, value: &str) -> Result<DbAcceptedRow, AppError> {
        let sql = format!(
            "INSERT INTO {table} ({col}, created_at) VALUES (?, ?)
             RETURNING id, {col} AS value, created_at",
            col = K::COLUMN,
            table = K::TABLE
        );
        let created_at = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);
        let row = sqlx::query(&sql)
            .bind(value)
            .bind(created_at)
            .fetch_one(&self.pool)
            .await?;
        Self::row_to_model(row)
    }

    /// Replace the text of row `id`. `None` when no such row exists.
    pub async fn update_value<K: ResourceKind>(
        &self,
        id: i64,
        value: &str,
    ) -> Result<Option<DbAcceptedRow>, AppError> {
        let sql = format!(
            "UPDATE {table} SET {col} = ? WHERE id = ?
             RETURNING id, {col} AS value, created_at",
            col = K::COLUMN,
            table = K::TABLE
        );
        let row = sqlx::query(&sql)
            .bind(value)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(Self::row_to_model).transpose()
    }

    /// Remove row `id`. Returns whether a row was deleted.
    pub async fn delete<K: ResourceKind>(&self, id: i64) -> Result<bool, AppError> {
        let sql = format!("DELETE FROM {table} WHERE id = ?", table = K::TABLE);
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    fn row_to_model(row: SqliteRow) -> Result<DbAcceptedRow, AppError> {
        let id: i64 = row.try_get("id")?;
        let value: String = row.try_get("value")?;
        let created_at_str: String = row.try_get("created_at")?;

        let created_at: DateTime<Utc> = DateTime::parse_from_rfc3339(&created_at_str)
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?
            .with_timezone(&Utc);

        Ok(DbAcceptedRow {
            id,
            value,
            created_at,
        })
    }
}
