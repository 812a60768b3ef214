//! Automation service: use-cases for managing automations.

use ministryhub_domain::automation::Automation;
use ministryhub_domain::error::{MinistryHubError, NotFoundError};
use ministryhub_domain::event::{Event, EventType};
use ministryhub_domain::id::AutomationId;
use ministryhub_domain::template::AutomationTemplate;
use ministryhub_domain::time;

use crate::ports::{AutomationRepository, EventPublisher};

/// Application service for automation CRUD and enablement.
pub struct AutomationService<R, P> {
    repo: R,
    publisher: P,
}

impl<R: AutomationRepository, P: EventPublisher> AutomationService<R, P> {
    /// Create a new service backed by the given repository and event publisher.
    pub fn new(repo: R, publisher: P) -> Self {
        Self { repo, publisher }
    }

    /// Create a new automation after validating domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`MinistryHubError::Validation`] if invariants fail, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip(self, automation), fields(automation_name = %automation.name))]
    pub async fn create_automation(
        &self,
        automation: Automation,
    ) -> Result<Automation, MinistryHubError> {
        automation.validate()?;
        let created = self.repo.create(automation).await?;
        self.notify(EventType::AutomationCreated, &created).await;
        Ok(created)
    }

    /// Instantiate `template` as a new automation.
    ///
    /// `name` and `enabled` override the template's defaults when given.
    ///
    /// # Errors
    ///
    /// Returns [`MinistryHubError::Validation`] if the resulting automation
    /// is invalid (for instance a template without steps), or a storage error.
    #[tracing::instrument(skip(self, template), fields(template_id = %template.id))]
    pub async fn instantiate(
        &self,
        template: &AutomationTemplate,
        name: Option<String>,
        enabled: Option<bool>,
    ) -> Result<Automation, MinistryHubError> {
        let mut builder = Automation::from_template(template);
        if let Some(name) = name {
            builder = builder.name(name);
        }
        if let Some(enabled) = enabled {
            builder = builder.enabled(enabled);
        }
        self.create_automation(builder.build()?).await
    }

    /// Look up an automation by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`MinistryHubError::NotFound`] when no automation with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_automation(&self, id: AutomationId) -> Result<Automation, MinistryHubError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Automation",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// List all automations, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_automations(&self) -> Result<Vec<Automation>, MinistryHubError> {
        self.repo.get_all().await
    }

    /// Replace the editable fields of an existing automation.
    ///
    /// Creation time, template origin and last run are kept from the stored
    /// record; `updated_at` is bumped.
    ///
    /// # Errors
    ///
    /// Returns [`MinistryHubError::NotFound`] if the automation does not
    /// exist, [`MinistryHubError::Validation`] if invariants fail, or a
    /// storage error from the repository.
    #[tracing::instrument(skip(self, automation), fields(automation_id = %automation.id))]
    pub async fn update_automation(
        &self,
        mut automation: Automation,
    ) -> Result<Automation, MinistryHubError> {
        let existing = self.get_automation(automation.id).await?;
        automation.created_at = existing.created_at;
        automation.template_id = existing.template_id;
        automation.last_run_at = existing.last_run_at;
        automation.updated_at = time::now();
        automation.validate()?;

        let updated = self.repo.update(automation).await?;
        self.notify(EventType::AutomationUpdated, &updated).await;
        Ok(updated)
    }

    /// Enable or disable an automation.
    ///
    /// # Errors
    ///
    /// Returns [`MinistryHubError::NotFound`] if the automation does not
    /// exist, or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn set_enabled(
        &self,
        id: AutomationId,
        enabled: bool,
    ) -> Result<Automation, MinistryHubError> {
        let mut automation = self.get_automation(id).await?;
        automation.set_enabled(enabled, time::now());
        self.save_toggled(automation).await
    }

    /// Flip an automation's enabled flag.
    ///
    /// # Errors
    ///
    /// Returns [`MinistryHubError::NotFound`] if the automation does not
    /// exist, or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn toggle(&self, id: AutomationId) -> Result<Automation, MinistryHubError> {
        let mut automation = self.get_automation(id).await?;
        automation.toggle(time::now());
        self.save_toggled(automation).await
    }

    /// Delete an automation by id.
    ///
    /// # Errors
    ///
    /// Returns [`MinistryHubError::NotFound`] if the automation does not
    /// exist, or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_automation(&self, id: AutomationId) -> Result<(), MinistryHubError> {
        let automation = self.get_automation(id).await?;
        self.repo.delete(id).await?;
        self.notify(EventType::AutomationDeleted, &automation).await;
        Ok(())
    }

    async fn save_toggled(&self, automation: Automation) -> Result<Automation, MinistryHubError> {
        let updated = self.repo.update(automation).await?;
        tracing::info!(automation_id = %updated.id, enabled = updated.enabled, "automation toggled");
        self.notify(EventType::AutomationToggled, &updated).await;
        Ok(updated)
    }

    async fn notify(&self, event_type: EventType, automation: &Automation) {
        let data = serde_json::json!({
            "name": automation.name,
            "enabled": automation.enabled,
        });
        let event = Event::new(event_type, Some(automation.id), data);
        if let Err(err) = self.publisher.publish(event).await {
            tracing::warn!(error = %err, "failed to publish automation event");
        }
    }
}
