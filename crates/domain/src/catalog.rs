//! Template catalog: templates grouped by category and ranked by popularity.

use serde::{Deserialize, Serialize};

use crate::id::TemplateId;
use crate::template::AutomationTemplate;

/// Templates sharing a category, most popular first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryGroup {
    pub category: String,
    pub templates: Vec<AutomationTemplate>,
}

/// The grouped catalog.
///
/// Invariants:
/// - every category appears exactly once, in order of first appearance
///   in the source;
/// - within a group, `popularity` is non-increasing and ties keep source order;
/// - `total_count` equals the number of templates across all groups.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateCatalog {
    pub categories: Vec<CategoryGroup>,
    pub total_count: usize,
}

impl TemplateCatalog {
    /// Group templates by category, then sort each group by descending
    /// popularity.
    #[must_use]
    pub fn from_templates(templates: impl IntoIterator<Item = AutomationTemplate>) -> Self {
        let mut categories: Vec<CategoryGroup> = Vec::new();
        let mut total_count = 0;

        for template in templates {
            total_count += 1;
            match categories
                .iter_mut()
                .find(|group| group.category == template.category)
            {
                Some(group) => group.templates.push(template),
                None => categories.push(CategoryGroup {
                    category: template.category.clone(),
                    templates: vec![template],
                }),
            }
        }

        for group in &mut categories {
            group
                .templates
                .sort_by(|a, b| b.popularity.cmp(&a.popularity));
        }

        Self {
            categories,
            total_count,
        }
    }

    /// Iterate over every template, group by group.
    pub fn iter(&self) -> impl Iterator<Item = &AutomationTemplate> {
        self.categories.iter().flat_map(|group| group.templates.iter())
    }

    /// Find a template by its key.
    #[must_use]
    pub fn find(&self, id: &TemplateId) -> Option<&AutomationTemplate> {
        self.iter().find(|template| &template.id == id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automation::{Trigger, TriggerKind};

    fn template(id: &str, category: &str, popularity: u32) -> AutomationTemplate {
        AutomationTemplate {
            id: TemplateId::new(id),
            name: id.replace('_', " "),
            description: String::new(),
            category: category.to_string(),
            popularity,
            trigger: Trigger::new(TriggerKind::Manual),
            steps: Vec::new(),
        }
    }

    fn sample() -> Vec<AutomationTemplate> {
        vec![
            template("recurring_donation_cancelled", "Donations", 65),
            template("shift_reminder", "Volunteers", 88),
            template("welcome_new_donor", "Donations", 95),
            template("failed_payment_notification", "Donations", 62),
            template("new_volunteer_welcome", "Volunteers", 90),
            template("recurring_donation_setup", "Donations", 78),
        ]
    }

    #[test]
    fn should_sort_donations_by_descending_popularity() {
        let catalog = TemplateCatalog::from_templates(sample());
        let donations = &catalog.categories[0];
        assert_eq!(donations.category, "Donations");
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

    #[test]
    fn should_list_each_category_once_in_first_seen_order() {
        let catalog = TemplateCatalog::from_templates(sample());
        let names: Vec<&str> = catalog
            .categories
            .iter()
            .map(|g| g.category.as_str())
            .collect();
        assert_eq!(names, vec!["Donations", "Volunteers"]);
    }

    #[test]
    fn should_count_all_templates() {
        let catalog = TemplateCatalog::from_templates(sample());
        let sum: usize = catalog.categories.iter().map(|g| g.templates.len()).sum();
        assert_eq!(catalog.total_count, 6);
        assert_eq!(catalog.total_count, sum);
    }

    #[test]
    fn should_reproduce_source_set_when_flattened() {
        let source = sample();
        let catalog = TemplateCatalog::from_templates(source.clone());
        let mut flattened: Vec<&str> = catalog.iter().map(|t| t.id.as_str()).collect();
        let mut original: Vec<&str> = source.iter().map(|t| t.id.as_str()).collect();
        flattened.sort_unstable();
        original.sort_unstable();
        assert_eq!(flattened, original);
    }

    #[test]
    fn should_keep_non_increasing_popularity_in_every_group() {
        let catalog = TemplateCatalog::from_templates(sample());
        for group in &catalog.categories {
            assert!(
                group
                    .templates
                    .windows(2)
                    .all(|pair| pair[0].popularity >= pair[1].popularity)
            );
        }
    }

    #[test]
    fn should_keep_source_order_for_equal_popularity() {
        let catalog = TemplateCatalog::from_templates(vec![
            template("a", "Events", 50),
            template("b", "Events", 50),
            template("c", "Events", 70),
        ]);
        let ids: Vec<&str> = catalog.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn should_return_empty_catalog_for_empty_source() {
        let catalog = TemplateCatalog::from_templates(Vec::new());
        assert!(catalog.categories.is_empty());
        assert_eq!(catalog.total_count, 0);
        assert!(catalog.is_empty());
    }

    #[test]
    fn should_include_template_without_steps() {
        let catalog = TemplateCatalog::from_templates(vec![template("inert", "Misc", 1)]);
        assert_eq!(catalog.total_count, 1);
        assert!(catalog.find(&TemplateId::new("inert")).unwrap().steps.is_empty());
    }

    #[test]
    fn should_be_idempotent_for_same_source() {
        let first = TemplateCatalog::from_templates(sample());
        let second = TemplateCatalog::from_templates(sample());
        assert_eq!(first, second);
    }

    #[test]
    fn should_serialize_total_count_in_camel_case() {
        let catalog = TemplateCatalog::from_templates(sample());
        let json = serde_json::to_value(&catalog).unwrap();
        assert_eq!(json["totalCount"], serde_json::json!(6));
    }
}
