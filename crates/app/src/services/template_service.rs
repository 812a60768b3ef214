//! Template service: read use-cases over the automation template catalog.

use ministryhub_domain::catalog::TemplateCatalog;
use ministryhub_domain::error::{MinistryHubError, NotFoundError};
use ministryhub_domain::id::TemplateId;
use ministryhub_domain::template::AutomationTemplate;

use crate::ports::TemplateSource;

/// Application service for browsing the template catalog.
pub struct TemplateService<S> {
    source: S,
}

impl<S: TemplateSource> TemplateService<S> {
    /// Create a new service backed by the given template source.
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Every template grouped by category, most popular first within each.
    ///
    /// An empty source yields an empty catalog, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error propagated from the template source.
    #[tracing::instrument(skip(self))]
    pub async fn list_templates(&self) -> Result<TemplateCatalog, MinistryHubError> {
        let templates = self.source.templates().await?;
        let catalog = TemplateCatalog::from_templates(templates);
        tracing::debug!(
            categories = catalog.categories.len(),
            total = catalog.total_count,
            "template catalog listed"
        );
        Ok(catalog)
    }

    /// Look up a single template by key.
    ///
    /// # Errors
    ///
    /// Returns [`MinistryHubError::NotFound`] when no template has `id`,
    /// or an error propagated from the template source.
    #[tracing::instrument(skip(self))]
    pub async fn get_template(
        &self,
        id: &TemplateId,
    ) -> Result<AutomationTemplate, MinistryHubError> {
        self.source
            .templates()
            .await?
            .into_iter()
            .find(|template| &template.id == id)
            .ok_or_else(|| {
                NotFoundError {
                    entity: "Template",
                    id: id.to_string(),
                }
                .into()
            })
    }

    /// Distinct `{{placeholder}}` names used by a template's steps, in
    /// first-use order.
    ///
    /// # Errors
    ///
    /// Returns [`MinistryHubError::NotFound`] when no template has `id`,
    /// or an error propagated from the template source.
    pub async fn template_placeholders(
        &self,
        id: &TemplateId,
    ) -> Result<Vec<String>, MinistryHubError> {
        Ok(self.get_template(id).await?.placeholders())
    }
}
