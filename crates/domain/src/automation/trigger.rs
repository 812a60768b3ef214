//! Trigger: the event classification that activates an automation.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::kind::open_enum;

open_enum! {
    /// Event kinds the automation engine knows how to fire on.
    TriggerKind {
        DonationCreated => "donation.created",
        RecurringDonationCreated => "donation.recurring_created",
        RecurringDonationCancelled => "donation.recurring_cancelled",
        DonationFailed => "donation.failed",
        LargeGift => "donation.large_gift",
        DonorLapsed => "donor.lapsed",
        VolunteerSignedUp => "volunteer.signed_up",
        ShiftAssigned => "shift.assigned",
        ShiftUpcoming => "shift.upcoming",
        ShiftMissed => "shift.missed",
        EventRegistrationCreated => "event.registration_created",
        EventUpcoming => "event.upcoming",
        EventCancelled => "event.cancelled",
        PrayerRequestCreated => "prayer_request.created",
        PrayerRequestAnswered => "prayer_request.answered",
        CaseCreated => "case.created",
        CaseStatusChanged => "case.status_changed",
        CaseAssigned => "case.assigned",
        ContactCreated => "contact.created",
        FormSubmitted => "form.submitted",
        ScheduleDaily => "schedule.daily",
        ScheduleWeekly => "schedule.weekly",
        ScheduleMonthly => "schedule.monthly",
        /// Fires only when triggered through the API.
        Manual => "manual",
    }
}

impl TriggerKind {
    /// Whether this kind fires on a clock rather than on a domain event.
    #[must_use]
    pub fn is_scheduled(&self) -> bool {
        self.as_str().starts_with("schedule.")
    }
}

/// Describes what causes an automation to run.
///
/// `filters` and `schedule` are free-form and interpreted by whatever
/// produces trigger events; the domain carries them verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trigger {
    #[serde(rename = "type")]
    pub kind: TriggerKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Map<String, Value>>,
}

impl Trigger {
    /// A trigger of the given kind with no filters or schedule.
    #[must_use]
    pub fn new(kind: TriggerKind) -> Self {
        Self {
            kind,
            filters: None,
            schedule: None,
        }
    }

    /// The manual trigger.
    #[must_use]
    pub fn manual() -> Self {
        Self::new(TriggerKind::Manual)
    }

    #[must_use]
    pub fn with_filters(mut self, filters: Value) -> Self {
        self.filters = into_map(filters);
        self
    }

    #[must_use]
    pub fn with_schedule(mut self, schedule: Value) -> Self {
        self.schedule = into_map(schedule);
        self
    }
}

impl std::fmt::Display for Trigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.kind.as_str())
    }
}

fn into_map(value: Value) -> Option<Map<String, Value>> {
    match value {
        Value::Object(map) => Some(map),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn should_parse_known_kind_from_wire_name() {
        assert_eq!(
            TriggerKind::from("donation.created"),
            TriggerKind::DonationCreated
        );
        assert!(TriggerKind::from("shift.upcoming").is_known());
    }

    #[test]
    fn should_carry_unknown_kind_verbatim() {
        let kind = TriggerKind::from("donation.refunded");
        assert_eq!(kind, TriggerKind::Unknown("donation.refunded".to_string()));
        assert!(!kind.is_known());
        assert_eq!(kind.as_str(), "donation.refunded");
    }

    #[test]
    fn should_detect_scheduled_kinds() {
        assert!(TriggerKind::ScheduleWeekly.is_scheduled());
        assert!(!TriggerKind::DonationCreated.is_scheduled());
    }

    #[test]
    fn should_keep_every_known_wire_name_unique() {
        let mut names: Vec<&str> = TriggerKind::KNOWN.iter().map(TriggerKind::as_str).collect();
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total);
        assert!(total >= 20);
    }

    #[test]
    fn should_deserialize_trigger_with_filters_and_schedule() {
        let trigger: Trigger = serde_json::from_value(json!({
            "type": "schedule.weekly",
            "schedule": {"day": "monday", "time": "08:00"},
            "filters": {"team": "hospitality"}
        }))
        .unwrap();
        assert_eq!(trigger.kind, TriggerKind::ScheduleWeekly);
        assert_eq!(trigger.schedule.unwrap()["day"], json!("monday"));
        assert_eq!(trigger.filters.unwrap()["team"], json!("hospitality"));
    }

    #[test]
    fn should_omit_absent_filters_when_serializing() {
        let json = serde_json::to_value(Trigger::new(TriggerKind::DonationCreated)).unwrap();
        assert_eq!(json, json!({"type": "donation.created"}));
    }

    #[test]
    fn should_serialize_unknown_kind_back_to_original_name() {
        let trigger: Trigger = serde_json::from_value(json!({"type": "webhook.received"})).unwrap();
        let json = serde_json::to_value(&trigger).unwrap();
        assert_eq!(json["type"], json!("webhook.received"));
    }

    #[test]
    fn should_ignore_non_object_filters_in_builder() {
        let trigger = Trigger::manual().with_filters(json!("nope"));
        assert!(trigger.filters.is_none());
    }
}
