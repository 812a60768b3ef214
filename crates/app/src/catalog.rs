//! In-memory template source, including the built-in catalog shipped with
//! the binary.

use std::future::Future;

use ministryhub_domain::error::MinistryHubError;
use ministryhub_domain::template::AutomationTemplate;

use crate::ports::TemplateSource;

const BUILTIN_TEMPLATES: &str = include_str!("../templates/builtin.json");

/// A fixed list of templates held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticTemplates {
    templates: Vec<AutomationTemplate>,
}

impl StaticTemplates {
    #[must_use]
    pub fn new(templates: Vec<AutomationTemplate>) -> Self {
        Self { templates }
    }

    /// Load the catalog bundled with ministryhub.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] if the bundled catalog is malformed.
    pub fn builtin() -> Result<Self, serde_json::Error> {
        serde_json::from_str(BUILTIN_TEMPLATES).map(Self::new)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl TemplateSource for StaticTemplates {
    fn templates(
        &self,
    ) -> impl Future<Output = Result<Vec<AutomationTemplate>, MinistryHubError>> + Send {
        let templates = self.templates.clone();
        async { Ok(templates) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    use ministryhub_domain::catalog::TemplateCatalog;

    #[test]
    fn should_parse_builtin_catalog() {
        let source = StaticTemplates::builtin().unwrap();
        assert!(source.len() >= 20);
    }

    #[test]
    fn should_use_unique_template_ids() {
        let source = StaticTemplates::builtin().unwrap();
        let ids: HashSet<&str> = source.templates.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids.len(), source.len());
    }

    #[test]
    fn should_only_use_recognized_trigger_and_action_kinds() {
        let source = StaticTemplates::builtin().unwrap();
        for template in &source.templates {
            assert!(template.trigger.kind.is_known(), "{}", template.id);
            for step in &template.steps {
                assert!(step.action.kind.is_known(), "{}/{}", template.id, step.id);
                assert!(
                    step.action.missing_keys().is_empty(),
                    "{}/{} missing {:?}",
                    template.id,
                    step.id,
                    step.action.missing_keys()
                );
            }
        }
    }

    #[test]
    fn should_rank_builtin_donations_as_documented() {
        let source = StaticTemplates::builtin().unwrap();
        let catalog = TemplateCatalog::from_templates(source.templates);
        let donations = catalog
            .categories
            .iter()
            .find(|g| g.category == "Donations")
            .unwrap();
        let ids: Vec<&str> = donations.templates.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "welcome_new_donor",
                "recurring_donation_setup",
                "recurring_donation_cancelled",
                "failed_payment_notification",
            ]
        );
    }

    #[tokio::test]
    async fn should_serve_templates_in_source_order() {
        let source = StaticTemplates::builtin().unwrap();
        let templates = source.templates().await.unwrap();
        assert_eq!(templates.first().unwrap().id.as_str(), "welcome_new_donor");
    }
}
