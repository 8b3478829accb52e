//! Passport validity window for visa renewal
//!
//! UAE visa renewal needs the passport to stay valid six months past the
//! visa's own expiry. The check compares the two expiry dates directly;
//! how far away "now" is only matters for the failing/warning split.

use shared_types::DocumentType;

use super::{
    DependencyRule, Evaluation, ExpiredDeadline, Finding, Measure, MissingText, RequiredValidity,
    Threshold, WhenMissing,
};
use crate::calendar::ExpiryCalendar;

/// Minimum days between visa expiry and passport expiry.
///
/// Used as the breach threshold in place of six calendar months, which the
/// displayed required-validity date uses instead. The two disagree by up
/// to four days depending on the months involved.
pub const PASSPORT_MIN_GAP_DAYS: i64 = 180;

/// Months past visa expiry shown as the required passport validity
pub const PASSPORT_DISPLAY_MONTHS: u32 = 6;

pub const RULE: DependencyRule = DependencyRule {
    name: "passport",
    parent: DocumentType::UaeVisa,
    requires: DocumentType::Passport,
    subject: DocumentType::Passport,
    measure: Measure::GapAfterAnchor,
    threshold: Threshold::Below(PASSPORT_MIN_GAP_DAYS),
    required_validity: RequiredValidity::MonthsAfterAnchor(PASSPORT_DISPLAY_MONTHS),
    when_missing: WhenMissing::Flag(MissingText {
        reason: "No passport document found",
        title: "🚨 CRITICAL: Passport Document Missing",
        description: "No passport document found. UAE visa renewal requires a valid passport.",
        action: "Upload your passport document",
    }),
    expired_deadline: ExpiredDeadline::OwnExpiry,
    flags_anchor: true,
    ok_reason: "Passport validity sufficient for visa renewal",
    describe,
};

fn describe(eval: &Evaluation<'_>) -> Finding {
    let passport_expiry = ExpiryCalendar::format_date(eval.document.expiry_date);
    let visa_expiry = ExpiryCalendar::format_date(eval.anchor.expiry_date);

    Finding {
        reason: format!(
            "Passport expires {}, but visa renewal requires passport valid until {}",
            passport_expiry, eval.required_validity
        ),
        title: "🚨 CRITICAL: Passport Validity Insufficient for Visa Renewal".to_string(),
        description: format!(
            "Your passport expires {}, but UAE visa renewal requires your passport to be valid \
             for at least 6 months AFTER your visa expiry date ({}). You need to renew your \
             passport IMMEDIATELY or your visa renewal will be REJECTED.",
            passport_expiry, visa_expiry
        ),
        action: "Renew passport immediately - visa renewal depends on this".to_string(),
    }
}
