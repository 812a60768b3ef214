//! `SQLite` implementation of [`AutomationRepository`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use ministryhub_app::ports::AutomationRepository;
use ministryhub_domain::automation::Automation;
use ministryhub_domain::error::MinistryHubError;
use ministryhub_domain::id::{AutomationId, TemplateId};
use ministryhub_domain::time::Timestamp;

use crate::codec::{decode_json, decode_timestamp, encode_timestamp};
use crate::error::StorageError;

struct Wrapper(Automation);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Automation> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: uuid::Uuid = row.try_get("id")?;
        let template_id: Option<String> = row.try_get("template_id")?;
        let trigger_json: String = row.try_get("trigger_data")?;
        let steps_json: String = row.try_get("steps")?;
        let created_at: String = row.try_get("created_at")?;
        let updated_at: String = row.try_get("updated_at")?;
        let last_run_at: Option<String> = row.try_get("last_run_at")?;

        Ok(Self(Automation {
            id: AutomationId::from_uuid(id),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            enabled: row.try_get("enabled")?,
            template_id: template_id.map(TemplateId::new),
            trigger: decode_json(&trigger_json)?,
            steps: decode_json(&steps_json)?,
            created_at: decode_timestamp(&created_at)?,
            updated_at: decode_timestamp(&updated_at)?,
            last_run_at: last_run_at.as_deref().map(decode_timestamp).transpose()?,
        }))
    }
}

/// Column values of an automation, ready to bind.
struct Columns {
    trigger: String,
    steps: String,
    created_at: String,
    updated_at: String,
    last_run_at: Option<String>,
}

impl Columns {
    fn encode(automation: &Automation) -> Result<Self, StorageError> {
        Ok(Self {
            trigger: serde_json::to_string(&automation.trigger)?,
            steps: serde_json::to_string(&automation.steps)?,
            created_at: encode_timestamp(automation.created_at),
            updated_at: encode_timestamp(automation.updated_at),
            last_run_at: automation.last_run_at.map(encode_timestamp),
        })
    }
}

/// `SQLite`-backed automation repository.
#[derive(Clone)]
pub struct SqliteAutomationRepository {
    pool: SqlitePool,
}

impl SqliteAutomationRepository {
    /// Create a new repository backed by the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl AutomationRepository for SqliteAutomationRepository {
    async fn create(&self, automation: Automation) -> Result<Automation, MinistryHubError> {
        let columns = Columns::encode(&automation)?;

        sqlx::query(
                "INSERT INTO automations (id, name, description, enabled, template_id, trigger_data, steps, created_at, updated_at, last_run_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(automation.id.as_uuid())
            .bind(&automation.name)
            .bind(&automation.description)
            .bind(automation.enabled)
            .bind(automation.template_id.as_ref().map(TemplateId::as_str))
            .bind(&columns.trigger)
            .bind(&columns.steps)
            .bind(&columns.created_at)
            .bind(&columns.updated_at)
            .bind(&columns.last_run_at)
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(automation)
    }

    async fn get_by_id(&self, id: AutomationId) -> Result<Option<Automation>, MinistryHubError> {
        let row: Option<Wrapper> = sqlx::query_as("SELECT * FROM automations WHERE id = ?")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(Wrapper::maybe(row))
    }

    async fn get_all(&self) -> Result<Vec<Automation>, MinistryHubError> {
        let rows: Vec<Wrapper> = sqlx::query_as("SELECT * FROM automations ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn update(&self, automation: Automation) -> Result<Automation, MinistryHubError> {
        let columns = Columns::encode(&automation)?;

        sqlx::query(
                "UPDATE automations SET name = ?, description = ?, enabled = ?, template_id = ?, trigger_data = ?, steps = ?, created_at = ?, updated_at = ?, last_run_at = ? WHERE id = ?",
            )
            .bind(&automation.name)
            .bind(&automation.description)
            .bind(automation.enabled)
            .bind(automation.template_id.as_ref().map(TemplateId::as_str))
            .bind(&columns.trigger)
            .bind(&columns.steps)
            .bind(&columns.created_at)
            .bind(&columns.updated_at)
            .bind(&columns.last_run_at)
            .bind(automation.id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(automation)
    }

    async fn record_run(&self, id: AutomationId, at: Timestamp) -> Result<(), MinistryHubError> {
        sqlx::query("UPDATE automations SET last_run_at = ? WHERE id = ?")
            .bind(encode_timestamp(at))
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(())
    }

    async fn delete(&self, id: AutomationId) -> Result<(), MinistryHubError> {
        sqlx::query("DELETE FROM automations WHERE id = ?")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(())
    }
}
