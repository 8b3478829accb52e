//! Shared alert wording and urgency classification

use serde::{Deserialize, Serialize};
use shared_types::{CriticalAlert, Severity};

pub const IMMEDIATELY: &str = "Immediately";
pub const BEFORE_VISA_RENEWAL: &str = "Before visa renewal";
pub const NOT_FOUND: &str = "Not found";
pub const REQUIRED: &str = "Required";

/// Alert returned on its own when no UAE visa was supplied
pub fn missing_anchor_alert() -> CriticalAlert {
    CriticalAlert {
        severity: Severity::Critical,
        title: "UAE Visa Not Found".to_string(),
        description: "No UAE visa document found. This is required for dependency analysis."
            .to_string(),
        affected_documents: Vec::new(),
        action_required: "Upload your UAE visa document".to_string(),
        deadline: IMMEDIATELY.to_string(),
        days_until_deadline: 0,
    }
}

/// How pressing an alert's deadline is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Overdue,
    Urgent,
    HighPriority,
    Upcoming,
}

impl Urgency {
    pub fn from_days(days_until_deadline: i64) -> Self {
        match days_until_deadline {
            d if d <= 0 => Urgency::Overdue,
            d if d <= 7 => Urgency::Urgent,
            d if d <= 30 => Urgency::HighPriority,
            _ => Urgency::Upcoming,
        }
    }

    pub fn of(alert: &CriticalAlert) -> Self {
        Self::from_days(alert.days_until_deadline)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Urgency::Overdue => "OVERDUE",
            Urgency::Urgent => "URGENT",
            Urgency::HighPriority => "HIGH PRIORITY",
            Urgency::Upcoming => "UPCOMING",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urgency_bands() {
        assert_eq!(Urgency::from_days(-3), Urgency::Overdue);
        assert_eq!(Urgency::from_days(0), Urgency::Overdue);
        assert_eq!(Urgency::from_days(7), Urgency::Urgent);
        assert_eq!(Urgency::from_days(8), Urgency::HighPriority);
        assert_eq!(Urgency::from_days(30), Urgency::HighPriority);
        assert_eq!(Urgency::from_days(31), Urgency::Upcoming);
    }

    #[test]
    fn test_missing_anchor_alert_is_critical_and_immediate() {
        let alert = missing_anchor_alert();
        assert_eq!(alert.severity, Severity::Critical);
        assert_eq!(Urgency::of(&alert), Urgency::Overdue);
        assert!(alert.affected_documents.is_empty());
    }

    #[test]
    fn test_urgency_wire_names() {
        let urgencies = vec![Urgency::Overdue, Urgency::HighPriority];
        assert_eq!(
            serde_json::to_string(&urgencies).unwrap(),
            r#"["overdue","high_priority"]"#
        );
    }
}
