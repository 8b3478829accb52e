//! Active health insurance is a precondition for visa renewal

use shared_types::DocumentType;

use super::{
    DependencyRule, Evaluation, ExpiredDeadline, Finding, Measure, MissingText, RequiredValidity,
    Threshold, WhenMissing,
};
use crate::calendar::ExpiryCalendar;

/// Days before expiry at which a renewal warning is raised
pub const HEALTH_INSURANCE_NOTICE_DAYS: i64 = 90;

pub const RULE: DependencyRule = DependencyRule {
    name: "health_insurance",
    parent: DocumentType::UaeVisa,
    requires: DocumentType::HealthInsurance,
    subject: DocumentType::HealthInsurance,
    measure: Measure::DaysFromNow,
    threshold: Threshold::AtMost(HEALTH_INSURANCE_NOTICE_DAYS),
    required_validity: RequiredValidity::Fixed("Active (not expired)"),
    when_missing: WhenMissing::Flag(MissingText {
        reason: "No health insurance document found",
        title: "🚨 CRITICAL: Health Insurance Document Missing",
        description: "No health insurance document found. UAE visa renewal requires active health insurance.",
        action: "Upload your health insurance document",
    }),
    expired_deadline: ExpiredDeadline::Immediately,
    flags_anchor: true,
    ok_reason: "Health insurance is active",
    describe,
};

fn describe(eval: &Evaluation<'_>) -> Finding {
    let expiry = ExpiryCalendar::format_date(eval.document.expiry_date);

    if eval.expired {
        Finding {
            reason: "Health insurance has expired".to_string(),
            title: "🚨 CRITICAL: Health Insurance EXPIRED".to_string(),
            description: format!(
                "Your health insurance expired on {}. UAE visa renewal requires active health \
                 insurance. You MUST renew your health insurance immediately or your visa \
                 renewal will be REJECTED.",
                expiry
            ),
            action: "Renew health insurance immediately".to_string(),
        }
    } else {
        Finding {
            reason: "Health insurance expires soon".to_string(),
            title: "⚠️ WARNING: Health Insurance Expiring Soon".to_string(),
            description: format!(
                "Your health insurance expires on {} ({} days). Renew it before your visa \
                 renewal to avoid complications.",
                expiry, eval.days_until_expiry
            ),
            action: "Renew health insurance before visa renewal".to_string(),
        }
    }
}
