//! Condition: a guard evaluated against trigger data before a step runs.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::kind::open_enum;
use crate::placeholder::resolve;

open_enum! {
    /// Comparison applied between the resolved field and the expected value.
    Operator {
        Equals => "equals",
        NotEquals => "not_equals",
        GreaterThan => "greater_than",
        GreaterThanOrEqual => "greater_than_or_equal",
        LessThan => "less_than",
        LessThanOrEqual => "less_than_or_equal",
        Contains => "contains",
        NotContains => "not_contains",
        Exists => "exists",
        NotExists => "not_exists",
        In => "in",
    }
}

/// A `field operator value` predicate.
///
/// `field` is a dot path into the trigger data (`donation.amount`).
/// A step runs only when all of its conditions hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub field: String,
    pub operator: Operator,
    #[serde(default)]
    pub value: Value,
}

impl Condition {
    #[must_use]
    pub fn new(field: impl Into<String>, operator: Operator, value: Value) -> Self {
        Self {
            field: field.into(),
            operator,
            value,
        }
    }

    /// Evaluate this condition against trigger data.
    ///
    /// Unknown operators never hold.
    #[must_use]
    pub fn evaluate(&self, data: &Value) -> bool {
        let actual = resolve(data, &self.field).filter(|v| !v.is_null());
        let expected = &self.value;

        match &self.operator {
            Operator::Exists => actual.is_some(),
            Operator::NotExists => actual.is_none(),
            Operator::Equals => actual.is_some_and(|a| loosely_equal(a, expected)),
            Operator::NotEquals => !actual.is_some_and(|a| loosely_equal(a, expected)),
            Operator::GreaterThan => compare(actual, expected) == Some(Ordering::Greater),
            Operator::GreaterThanOrEqual => matches!(
                compare(actual, expected),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            Operator::LessThan => compare(actual, expected) == Some(Ordering::Less),
            Operator::LessThanOrEqual => matches!(
                compare(actual, expected),
                Some(Ordering::Less | Ordering::Equal)
            ),
            Operator::Contains => actual.is_some_and(|a| contains(a, expected)),
            Operator::NotContains => !actual.is_some_and(|a| contains(a, expected)),
            Operator::In => actual.is_some_and(|a| match expected {
                Value::Array(options) => options.iter().any(|o| loosely_equal(a, o)),
                _ => false,
            }),
            Operator::Unknown(_) => false,
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.field, self.operator, self.value)
    }
}

/// Evaluate a list of conditions with logical AND. Empty lists hold.
#[must_use]
pub fn all_hold(conditions: &[Condition], data: &Value) -> bool {
    conditions.iter().all(|c| c.evaluate(data))
}

/// Numbers compare by value regardless of integer/float representation.
fn loosely_equal(a: &Value, b: &Value) -> bool {
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) if a.is_number() && b.is_number() => (x - y).abs() < f64::EPSILON,
        _ => a == b,
    }
}

/// Order two numbers, or two strings (ISO dates compare correctly).
fn compare(actual: Option<&Value>, expected: &Value) -> Option<Ordering> {
    match (actual?, expected) {
        (Value::Number(a), Value::Number(b)) => a.as_f64()?.partial_cmp(&b.as_f64()?),
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

fn contains(haystack: &Value, needle: &Value) -> bool {
    match (haystack, needle) {
        (Value::String(h), Value::String(n)) => h.contains(n.as_str()),
        (Value::Array(items), n) => items.iter().any(|item| loosely_equal(item, n)),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn donation() -> Value {
        json!({
            "donation": {"amount": 250, "frequency": "monthly", "fund": "missions"},
            "donor": {"email": "ann@example.org", "tags": ["first_time", "online"]},
            "note": null
        })
    }

    #[test]
    fn should_match_equal_strings_and_numbers() {
        let data = donation();
        assert!(Condition::new("donation.frequency", Operator::Equals, json!("monthly")).evaluate(&data));
        assert!(Condition::new("donation.amount", Operator::Equals, json!(250.0)).evaluate(&data));
        assert!(!Condition::new("donation.amount", Operator::Equals, json!("250")).evaluate(&data));
    }

    #[test]
    fn should_treat_missing_field_as_not_equal() {
        let data = donation();
        assert!(Condition::new("donation.campaign", Operator::NotEquals, json!("x")).evaluate(&data));
        assert!(!Condition::new("donation.campaign", Operator::Equals, json!("x")).evaluate(&data));
    }

    #[test]
    fn should_compare_numbers() {
        let data = donation();
        assert!(Condition::new("donation.amount", Operator::GreaterThan, json!(100)).evaluate(&data));
        assert!(Condition::new("donation.amount", Operator::GreaterThanOrEqual, json!(250)).evaluate(&data));
        assert!(!Condition::new("donation.amount", Operator::LessThan, json!(250)).evaluate(&data));
        assert!(Condition::new("donation.amount", Operator::LessThanOrEqual, json!(250)).evaluate(&data));
    }

    #[test]
    fn should_not_compare_mismatched_types() {
        let data = donation();
        assert!(!Condition::new("donation.fund", Operator::GreaterThan, json!(1)).evaluate(&data));
        assert!(!Condition::new("donation.fund", Operator::LessThan, json!(1)).evaluate(&data));
    }

    #[test]
    fn should_compare_strings_lexicographically() {
        let data = json!({"event": {"date": "2026-05-01"}});
        assert!(Condition::new("event.date", Operator::LessThan, json!("2026-06-01")).evaluate(&data));
    }

    #[test]
    fn should_check_substring_and_array_membership() {
        let data = donation();
        assert!(Condition::new("donor.email", Operator::Contains, json!("@example")).evaluate(&data));
        assert!(Condition::new("donor.tags", Operator::Contains, json!("online")).evaluate(&data));
        assert!(Condition::new("donor.tags", Operator::NotContains, json!("lapsed")).evaluate(&data));
    }

    #[test]
    fn should_check_existence_treating_null_as_absent() {
        let data = donation();
        assert!(Condition::new("donor.email", Operator::Exists, Value::Null).evaluate(&data));
        assert!(Condition::new("note", Operator::NotExists, Value::Null).evaluate(&data));
        assert!(Condition::new("missing.path", Operator::NotExists, Value::Null).evaluate(&data));
    }

    #[test]
    fn should_match_value_in_list() {
        let data = donation();
        let c = Condition::new("donation.fund", Operator::In, json!(["general", "missions"]));
        assert!(c.evaluate(&data));
        let c = Condition::new("donation.fund", Operator::In, json!("missions"));
        assert!(!c.evaluate(&data));
    }

    #[test]
    fn should_never_hold_for_unknown_operator() {
        let c: Condition = serde_json::from_value(json!({
            "field": "donation.amount", "operator": "between", "value": [1, 500]
        }))
        .unwrap();
        assert_eq!(c.operator, Operator::Unknown("between".to_string()));
        assert!(!c.evaluate(&donation()));
    }

    #[test]
    fn should_hold_for_empty_condition_list() {
        assert!(all_hold(&[], &json!({})));
    }

    #[test]
    fn should_require_every_condition_to_hold() {
        let data = donation();
        let conditions = vec![
            Condition::new("donation.amount", Operator::GreaterThan, json!(100)),
            Condition::new("donation.frequency", Operator::Equals, json!("once")),
        ];
        assert!(!all_hold(&conditions, &data));
    }

    #[test]
    fn should_display_condition() {
        let c = Condition::new("donation.amount", Operator::GreaterThan, json!(1000));
        assert_eq!(c.to_string(), "donation.amount greater_than 1000");
    }
}
