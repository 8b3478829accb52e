use chrono::{DateTime, Utc};
use shared_types::{Document, DocumentStatus, TimelineEvent, TimelineStatus};

use crate::calendar::ExpiryCalendar;

pub const TIMELINE_CRITICAL_DAYS: i64 = 30;
pub const TIMELINE_WARNING_DAYS: i64 = 90;

pub fn timeline_status(days_until_expiry: i64) -> TimelineStatus {
    match days_until_expiry {
        d if d <= 0 => TimelineStatus::Expired,
        d if d <= TIMELINE_CRITICAL_DAYS => TimelineStatus::Critical,
        d if d <= TIMELINE_WARNING_DAYS => TimelineStatus::Warning,
        _ => TimelineStatus::Valid,
    }
}

/// One event per document, earliest expiry first; ties keep input order.
///
/// Unlike dependency analysis this covers every document, including
/// untracked types and duplicates.
pub fn build_timeline(documents: &[Document], now: DateTime<Utc>) -> Vec<TimelineEvent> {
    let mut events: Vec<TimelineEvent> = documents
        .iter()
        .map(|doc| {
            let days_until_expiry = ExpiryCalendar::days_until(doc.expiry_date, now);
            TimelineEvent {
                id: doc.id.clone(),
                document_type: doc.document_type.clone(),
                expiry_date: doc.expiry_date,
                status: timeline_status(days_until_expiry),
                document_status: DocumentStatus::derive(days_until_expiry, doc.status),
                days_until_expiry,
            }
        })
        .collect();

    events.sort_by_key(|event| event.expiry_date);
    events
}
