//! Ejari (registered tenancy contract) must outlive the renewal process.
//! Measured from today, independent of the visa expiry.

use shared_types::DocumentType;

use super::{
    DependencyRule, Evaluation, ExpiredDeadline, Finding, Measure, MissingText, RequiredValidity,
    Threshold, WhenMissing,
};
use crate::calendar::ExpiryCalendar;

pub const EJARI_MIN_VALIDITY_DAYS: i64 = 90;
pub const EJARI_DISPLAY_MONTHS: u32 = 3;

pub const RULE: DependencyRule = DependencyRule {
    name: "ejari",
    parent: DocumentType::UaeVisa,
    requires: DocumentType::Ejari,
    subject: DocumentType::Ejari,
    measure: Measure::DaysFromNow,
    threshold: Threshold::Below(EJARI_MIN_VALIDITY_DAYS),
    required_validity: RequiredValidity::MonthsFromNow(EJARI_DISPLAY_MONTHS),
    when_missing: WhenMissing::Flag(MissingText {
        reason: "No Ejari document found",
        title: "🚨 CRITICAL: Ejari Document Missing",
        description: "No Ejari document found. UAE visa renewal requires a valid Ejari contract.",
        action: "Upload your Ejari document",
    }),
    expired_deadline: ExpiredDeadline::OwnExpiry,
    flags_anchor: true,
    ok_reason: "Ejari validity sufficient for visa renewal",
    describe,
};

fn describe(eval: &Evaluation<'_>) -> Finding {
    let expiry = ExpiryCalendar::format_date(eval.document.expiry_date);

    Finding {
        reason: format!(
            "Ejari expires {}, but visa renewal requires Ejari valid for at least 3 months",
            expiry
        ),
        title: "🚨 CRITICAL: Ejari Validity Insufficient".to_string(),
        description: format!(
            "Your Ejari expires on {} ({} days left). UAE visa renewal requires Ejari to be \
             valid for at least 3 months from now. You need to renew your Ejari IMMEDIATELY.",
            expiry, eval.days_until_expiry
        ),
        action: "Renew Ejari immediately".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::DocumentIndex;
    use crate::rules::{Anchor, RuleOutcome};
    use crate::test_support::{doc, now};
    use shared_types::{EdgeStatus, Severity};

    fn evaluate(visa_days: i64, ejari_days: i64) -> RuleOutcome {
        let docs = vec![doc("uae_visa", visa_days), doc("ejari", ejari_days)];
        let index = DocumentIndex::first_wins(&docs);
        let anchor = Anchor::new(&docs[0], now());
        RULE.evaluate(&index, &anchor, now()).unwrap()
    }

    #[test]
    fn test_89_days_warns() {
        let outcome = evaluate(300, 89);
        assert_eq!(outcome.edge.status, EdgeStatus::Warning);

        let alert = outcome.alert.unwrap();
        assert_eq!(alert.severity, Severity::Warning);
        assert_eq!(alert.days_until_deadline, 89);
        assert_eq!(
            alert.affected_documents,
            vec![DocumentType::Ejari, DocumentType::UaeVisa]
        );
    }

    #[test]
    fn test_90_days_is_ok() {
        let outcome = evaluate(300, 90);
        assert_eq!(outcome.edge.status, EdgeStatus::Ok);
        // now = January 1, 2025
        assert_eq!(outcome.edge.required_validity, "April 1, 2025");
    }

    #[test]
    fn test_threshold_ignores_visa_distance() {
        // Visa renewal far off, tenancy still flagged
        let outcome = evaluate(365, 30);
        assert_eq!(outcome.edge.status, EdgeStatus::Warning);
    }

    #[test]
    fn test_expired_ejari_keeps_own_deadline() {
        let outcome = evaluate(300, -10);
        assert_eq!(outcome.edge.status, EdgeStatus::Failing);

        let alert = outcome.alert.unwrap();
        assert_eq!(alert.severity, Severity::Critical);
        assert_eq!(alert.deadline, "December 22, 2024");
        assert_eq!(alert.days_until_deadline, -10);
    }
}
