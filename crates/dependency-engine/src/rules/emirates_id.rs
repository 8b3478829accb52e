//! Emirates ID validity is tied to the visa.
//!
//! The edge points from the ID to the visa. Unlike the other rules an
//! absent ID produces no edge and no alert.

use shared_types::DocumentType;

use super::{
    DependencyRule, Evaluation, ExpiredDeadline, Finding, Measure, RequiredValidity, Threshold,
    WhenMissing,
};
use crate::calendar::ExpiryCalendar;

pub const EMIRATES_ID_NOTICE_DAYS: i64 = 90;

pub const RULE: DependencyRule = DependencyRule {
    name: "emirates_id",
    parent: DocumentType::EmiratesId,
    requires: DocumentType::UaeVisa,
    subject: DocumentType::EmiratesId,
    measure: Measure::DaysFromNow,
    threshold: Threshold::AtMost(EMIRATES_ID_NOTICE_DAYS),
    required_validity: RequiredValidity::Fixed("Active (linked to visa)"),
    when_missing: WhenMissing::Skip,
    expired_deadline: ExpiredDeadline::Immediately,
    flags_anchor: false,
    ok_reason: "Emirates ID is active",
    describe,
};

fn describe(eval: &Evaluation<'_>) -> Finding {
    let expiry = ExpiryCalendar::format_date(eval.document.expiry_date);

    if eval.expired {
        Finding {
            reason: "Emirates ID has expired".to_string(),
            title: "🚨 CRITICAL: Emirates ID EXPIRED".to_string(),
            description: format!(
                "Your Emirates ID expired on {}. Emirates ID is linked to your visa validity \
                 and must be renewed.",
                expiry
            ),
            action: "Renew Emirates ID immediately".to_string(),
        }
    } else {
        Finding {
            reason: "Emirates ID expires soon".to_string(),
            title: "⚠️ WARNING: Emirates ID Expiring Soon".to_string(),
            description: format!(
                "Your Emirates ID expires on {} ({} days). Renew it to maintain your legal status.",
                expiry, eval.days_until_expiry
            ),
            action: "Renew Emirates ID".to_string(),
        }
    }
}
