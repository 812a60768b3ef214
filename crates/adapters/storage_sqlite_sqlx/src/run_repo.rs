//! `SQLite` implementation of [`RunRepository`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use ministryhub_app::ports::RunRepository;
use ministryhub_domain::error::MinistryHubError;
use ministryhub_domain::id::{AutomationId, RunId};
use ministryhub_domain::run::{Run, RunFilter, RunStatus};

use crate::codec::{decode_json, decode_timestamp, encode_timestamp};
use crate::error::StorageError;

struct Wrapper(Run);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: uuid::Uuid = row.try_get("id")?;
        let automation_id: uuid::Uuid = row.try_get("automation_id")?;
        let status: String = row.try_get("status")?;
        let trigger_json: String = row.try_get("trigger_data")?;
        let steps_json: String = row.try_get("steps")?;
        let started_at: String = row.try_get("started_at")?;
        let finished_at: Option<String> = row.try_get("finished_at")?;
        let replay_of: Option<uuid::Uuid> = row.try_get("replay_of")?;

        let status: RunStatus = status
            .parse()
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self(Run {
            id: RunId::from_uuid(id),
            automation_id: AutomationId::from_uuid(automation_id),
            automation_name: row.try_get("automation_name")?,
            status,
            trigger_data: decode_json(&trigger_json)?,
            steps: decode_json(&steps_json)?,
            started_at: decode_timestamp(&started_at)?,
            finished_at: finished_at.as_deref().map(decode_timestamp).transpose()?,
            replay_of: replay_of.map(RunId::from_uuid),
        }))
    }
}

/// `SQLite`-backed run history.
#[derive(Clone)]
pub struct SqliteRunRepository {
    pool: SqlitePool,
}

impl SqliteRunRepository {
    /// Create a new repository backed by the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl RunRepository for SqliteRunRepository {
    async fn create(&self, run: Run) -> Result<Run, MinistryHubError> {
        let trigger_json = serde_json::to_string(&run.trigger_data).map_err(StorageError::from)?;
        let steps_json = serde_json::to_string(&run.steps).map_err(StorageError::from)?;

        sqlx::query(
                "INSERT INTO runs (id, automation_id, automation_name, status, trigger_data, steps, started_at, finished_at, replay_of) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(run.id.as_uuid())
            .bind(run.automation_id.as_uuid())
            .bind(&run.automation_name)
            .bind(run.status.as_str())
            .bind(&trigger_json)
            .bind(&steps_json)
            .bind(encode_timestamp(run.started_at))
            .bind(run.finished_at.map(encode_timestamp))
            .bind(run.replay_of.map(RunId::as_uuid))
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(run)
    }

    async fn get_by_id(&self, id: RunId) -> Result<Option<Run>, MinistryHubError> {
        let row: Option<Wrapper> = sqlx::query_as("SELECT * FROM runs WHERE id = ?")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(row.map(|w| w.0))
    }

    async fn list(&self, filter: &RunFilter) -> Result<Vec<Run>, MinistryHubError> {
        let limit = i64::try_from(filter.limit).unwrap_or(i64::MAX);
        let rows: Vec<Wrapper> = sqlx::query_as(
            "SELECT * FROM runs \
             WHERE (?1 IS NULL OR automation_id = ?1) AND (?2 IS NULL OR status = ?2) \
             ORDER BY started_at DESC, rowid DESC LIMIT ?3",
        )
        .bind(filter.automation_id.map(AutomationId::as_uuid))
        .bind(filter.status.map(RunStatus::as_str))
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(|w| w.0).collect())
    }
}
