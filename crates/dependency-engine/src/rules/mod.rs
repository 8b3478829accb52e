//! Declarative dependency rules
//!
//! Every rule describes one edge hanging off the UAE visa anchor: which
//! document it examines, how the remaining validity is measured, where
//! the threshold sits and how findings are worded. [`RULES`] is evaluated
//! in order, and that order is the order edges and alerts are emitted in.

pub mod ejari;
pub mod emirates_id;
pub mod health_insurance;
pub mod passport;

use chrono::{DateTime, Utc};
use shared_types::{CriticalAlert, DependencyEdge, Document, DocumentType, EdgeStatus, Severity};

use crate::alerts::{BEFORE_VISA_RENEWAL, IMMEDIATELY, NOT_FOUND, REQUIRED};
use crate::calendar::ExpiryCalendar;
use crate::index::DocumentIndex;

/// Dependency checks only run when the visa expires within this many days
pub const ANALYSIS_HORIZON_DAYS: i64 = 365;

/// Rule table, in emission order
pub static RULES: [DependencyRule; 4] = [
    passport::RULE,
    health_insurance::RULE,
    ejari::RULE,
    emirates_id::RULE,
];

/// The visa document every rule is scoped to
#[derive(Debug, Clone, Copy)]
pub struct Anchor<'a> {
    pub document: &'a Document,
    pub days_until_expiry: i64,
}

impl<'a> Anchor<'a> {
    pub fn new(document: &'a Document, now: DateTime<Utc>) -> Self {
        Self {
            document,
            days_until_expiry: ExpiryCalendar::days_until(document.expiry_date, now),
        }
    }

    /// True when visa renewal is close enough for dependencies to matter
    pub fn within_horizon(&self) -> bool {
        self.days_until_expiry <= ANALYSIS_HORIZON_DAYS
    }
}

/// Quantity compared against a rule's threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Measure {
    /// Days from now until the subject document expires
    DaysFromNow,
    /// Days from the anchor's expiry to the subject's expiry
    GapAfterAnchor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Threshold {
    /// Breached when the margin is strictly less than the bound
    Below(i64),
    /// Breached when the margin is less than or equal to the bound
    AtMost(i64),
}

impl Threshold {
    pub fn breached_by(&self, margin: i64) -> bool {
        match *self {
            Threshold::Below(bound) => margin < bound,
            Threshold::AtMost(bound) => margin <= bound,
        }
    }
}

/// How the "required validity" column of an edge is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredValidity {
    MonthsAfterAnchor(u32),
    MonthsFromNow(u32),
    Fixed(&'static str),
}

impl RequiredValidity {
    pub fn describe(&self, anchor: &Document, now: DateTime<Utc>) -> String {
        match *self {
            RequiredValidity::MonthsAfterAnchor(months) => ExpiryCalendar::format_date(
                ExpiryCalendar::add_months(anchor.expiry_date, months),
            ),
            RequiredValidity::MonthsFromNow(months) => ExpiryCalendar::format_date(
                ExpiryCalendar::add_months(now.date_naive(), months),
            ),
            RequiredValidity::Fixed(label) => label.to_string(),
        }
    }
}

/// Deadline reported on the alert once the subject has already expired
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiredDeadline {
    /// "Immediately", zero days
    Immediately,
    /// The subject's own expiry date and (non-positive) day count
    OwnExpiry,
}

/// Fixed wording used when the subject document is absent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingText {
    pub reason: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub action: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WhenMissing {
    /// Emit a failing edge and a critical alert
    Flag(MissingText),
    /// Emit nothing
    Skip,
}

/// Inputs available to a rule's message formatter
#[derive(Debug)]
pub struct Evaluation<'a> {
    pub document: &'a Document,
    pub anchor: &'a Document,
    pub days_until_expiry: i64,
    pub required_validity: &'a str,
    pub expired: bool,
}

/// Wording for a breached rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub reason: String,
    pub title: String,
    pub description: String,
    pub action: String,
}

/// Result of evaluating one rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOutcome {
    pub edge: DependencyEdge,
    pub alert: Option<CriticalAlert>,
}

pub struct DependencyRule {
    pub name: &'static str,
    pub parent: DocumentType,
    pub requires: DocumentType,
    /// The document whose expiry is examined
    pub subject: DocumentType,
    pub measure: Measure,
    pub threshold: Threshold,
    pub required_validity: RequiredValidity,
    pub when_missing: WhenMissing,
    pub expired_deadline: ExpiredDeadline,
    /// Whether breach alerts also list the visa as affected
    pub flags_anchor: bool,
    pub ok_reason: &'static str,
    pub describe: fn(&Evaluation<'_>) -> Finding,
}

impl DependencyRule {
    /// Evaluate against the indexed snapshot. `None` means the rule
    /// produced no edge at all.
    pub fn evaluate(
        &self,
        index: &DocumentIndex<'_>,
        anchor: &Anchor<'_>,
        now: DateTime<Utc>,
    ) -> Option<RuleOutcome> {
        let Some(document) = index.get(&self.subject) else {
            return match self.when_missing {
                WhenMissing::Skip => None,
                WhenMissing::Flag(text) => Some(self.missing(&text, anchor)),
            };
        };

        let days_until_expiry = ExpiryCalendar::days_until(document.expiry_date, now);
        let margin = match self.measure {
            Measure::DaysFromNow => days_until_expiry,
            Measure::GapAfterAnchor => {
                ExpiryCalendar::days_between(anchor.document.expiry_date, document.expiry_date)
            }
        };
        let current_validity = ExpiryCalendar::format_date(document.expiry_date);
        let required_validity = self.required_validity.describe(anchor.document, now);

        if !self.threshold.breached_by(margin) {
            return Some(RuleOutcome {
                edge: self.edge(
                    EdgeStatus::Ok,
                    self.ok_reason.to_string(),
                    current_validity,
                    required_validity,
                ),
                alert: None,
            });
        }

        let expired = days_until_expiry <= 0;
        let status = if expired {
            EdgeStatus::Failing
        } else {
            EdgeStatus::Warning
        };

        let finding = (self.describe)(&Evaluation {
            document,
            anchor: anchor.document,
            days_until_expiry,
            required_validity: &required_validity,
            expired,
        });

        let (deadline, days_until_deadline) = match (expired, self.expired_deadline) {
            (true, ExpiredDeadline::Immediately) => (IMMEDIATELY.to_string(), 0),
            _ => (current_validity.clone(), days_until_expiry),
        };

        let alert = status.severity().map(|severity| CriticalAlert {
            severity,
            title: finding.title,
            description: finding.description,
            affected_documents: self.affected_documents(),
            action_required: finding.action,
            deadline,
            days_until_deadline,
        });

        Some(RuleOutcome {
            edge: self.edge(status, finding.reason, current_validity, required_validity),
            alert,
        })
    }

    fn missing(&self, text: &MissingText, anchor: &Anchor<'_>) -> RuleOutcome {
        RuleOutcome {
            edge: self.edge(
                EdgeStatus::Failing,
                text.reason.to_string(),
                NOT_FOUND.to_string(),
                REQUIRED.to_string(),
            ),
            alert: Some(CriticalAlert {
                severity: Severity::Critical,
                title: text.title.to_string(),
                description: text.description.to_string(),
                affected_documents: vec![self.subject.clone()],
                action_required: text.action.to_string(),
                deadline: BEFORE_VISA_RENEWAL.to_string(),
                days_until_deadline: anchor.days_until_expiry,
            }),
        }
    }

    fn edge(
        &self,
        status: EdgeStatus,
        reason: String,
        current_validity: String,
        required_validity: String,
    ) -> DependencyEdge {
        DependencyEdge {
            parent: self.parent.clone(),
            requires: self.requires.clone(),
            status,
            reason,
            current_validity,
            required_validity,
        }
    }

    fn affected_documents(&self) -> Vec<DocumentType> {
        let mut affected = vec![self.subject.clone()];
        if self.flags_anchor {
            affected.push(DocumentType::UaeVisa);
        }
        affected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{doc, now};

    #[test]
    fn test_threshold_bounds() {
        assert!(Threshold::Below(180).breached_by(179));
        assert!(!Threshold::Below(180).breached_by(180));
        assert!(Threshold::AtMost(90).breached_by(90));
        assert!(!Threshold::AtMost(90).breached_by(91));
    }

    #[test]
    fn test_rule_table_order() {
        let subjects: Vec<_> = RULES.iter().map(|r| r.subject.clone()).collect();
        assert_eq!(
            subjects,
            vec![
                DocumentType::Passport,
                DocumentType::HealthInsurance,
                DocumentType::Ejari,
                DocumentType::EmiratesId,
            ]
        );
    }

    #[test]
    fn test_alert_severity_follows_edge_status() {
        for days in [-10, 0, 1, 45, 89, 90, 91, 400] {
            let docs = vec![
                doc("uae_visa", 100),
                doc("passport", days),
                doc("health_insurance", days),
                doc("ejari", days),
                doc("emirates_id", days),
            ];
            let index = DocumentIndex::first_wins(&docs);
            let anchor = Anchor::new(&docs[0], now());

            for rule in RULES.iter() {
                let outcome = rule.evaluate(&index, &anchor, now()).unwrap();
                assert_eq!(
                    outcome.alert.map(|a| a.severity),
                    outcome.edge.status.severity(),
                    "{} at {} days",
                    rule.name,
                    days
                );
            }
        }
    }

    #[test]
    fn test_only_emirates_id_is_optional() {
        let optional: Vec<_> = RULES
            .iter()
            .filter(|r| r.when_missing == WhenMissing::Skip)
            .map(|r| r.name)
            .collect();
        assert_eq!(optional, vec!["emirates_id"]);
    }
}
