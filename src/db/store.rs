use crate::db::models::{DeploymentParams, ModelInfo, ModelRegistration};
use crate::db::schema::SQLITE_INIT;
use crate::error::OpsError;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Pool, Row, Sqlite};
use std::str::FromStr;
use tracing::info;

pub type SqlitePool = Pool<Sqlite>;

/// Result of one group-scoped delete-then-insert sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReplaceOutcome {
    pub deleted: u64,
    pub inserted: usize,
}

#[derive(Clone)]
pub struct ModelStorage {
    pool: SqlitePool,
}

impl ModelStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (creating the file if needed) and run the idempotent DDL.
    pub async fn connect(database_url: &str) -> Result<Self, OpsError> {
        let connect_opts = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new().connect_with(connect_opts).await?;
        let storage = Self::new(pool);
        storage.init_schema().await?;
        Ok(storage)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), OpsError> {
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

    /// Replace every row registered under `group_name` with `rows`, inside a
    /// single transaction with one commit point. A failure anywhere leaves
    /// the previous rows in place.
    pub async fn replace_group(
        &self,
        group_name: &str,
        rows: &[ModelRegistration],
    ) -> Result<ReplaceOutcome, OpsError> {
        let mut tx = self.pool.begin().await?;

        let deleted = sqlx::query("DELETE FROM model_registrations WHERE model_name = ?")
            .bind(group_name)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        info!(group = group_name, deleted, "cleared existing registrations");

        let mut inserted = 0usize;
        for row in rows {
            let params_json = serde_json::to_string(&row.params)?;
            let info_json = serde_json::to_string(&row.info)?;
            sqlx::query(
                r#"
                INSERT INTO model_registrations (model_name, litellm_params, model_info, created_at)
                VALUES (?, ?, ?, ?)
                "#,
            )
            .bind(&row.model_name)
            .bind(params_json)
            .bind(info_json)
            .bind(Utc::now().to_rfc3339())
            .execute(&mut *tx)
            .await?;

            inserted += 1;
            if inserted % 10 == 0 {
                info!(group = group_name, inserted, total = rows.len(), "insert progress");
            }
        }

        tx.commit().await?;
        Ok(ReplaceOutcome { deleted, inserted })
    }

    /// Row count under `group_name`. Read-back for operator feedback.
    pub async fn count_group(&self, group_name: &str) -> Result<i64, OpsError> {
        let rec: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM model_registrations WHERE model_name = ?")
                .bind(group_name)
                .fetch_one(&self.pool)
                .await?;
        Ok(rec.0)
    }

    /// All rows under `group_name` in insertion order, blobs decoded.
    pub async fn list_group(&self, group_name: &str) -> Result<Vec<ModelRegistration>, OpsError> {
        let rows = sqlx::query(
            r#"SELECT model_name, litellm_params, model_info
               FROM model_registrations WHERE model_name = ? ORDER BY id"#,
        )
        .bind(group_name)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(Self::row_to_model).collect()
    }

    fn row_to_model(row: SqliteRow) -> Result<ModelRegistration, OpsError> {
        let model_name: String = row.try_get("model_name")?;
        let params_json: String = row.try_get("litellm_params")?;
        let info_json: String = row.try_get("model_info")?;

        let params: DeploymentParams = serde_json::from_str(&params_json)?;
        let info: ModelInfo = serde_json::from_str(&info_json)?;

        Ok(ModelRegistration {
            model_name,
            params,
            info,
        })
    }
}
