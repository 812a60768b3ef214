//! Template source port: where the automation template catalog comes from.

use std::future::Future;

use ministryhub_domain::error::MinistryHubError;
use ministryhub_domain::template::AutomationTemplate;

/// Read-only provider of catalog templates, in source order.
pub trait TemplateSource {
    /// Every template in the catalog.
    fn templates(
        &self,
    ) -> impl Future<Output = Result<Vec<AutomationTemplate>, MinistryHubError>> + Send;
}

impl<T: TemplateSource + Send + Sync> TemplateSource for std::sync::Arc<T> {
    fn templates(
        &self,
    ) -> impl Future<Output = Result<Vec<AutomationTemplate>, MinistryHubError>> + Send {
        (**self).templates()
    }
}
