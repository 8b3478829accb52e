//! Document dependency analysis
//!
//! Given a snapshot of an expat's documents, works out which of them put
//! UAE visa renewal at risk. The visa is the anchor: without one there is
//! nothing to analyse, and if it expires more than a year out no checks
//! run. Otherwise each rule in [`rules::RULES`] yields a dependency edge
//! and possibly an alert, and the alerts are folded into a 0–100 score.

pub mod alerts;
pub mod calendar;
pub mod error;
pub mod index;
pub mod rules;
pub mod scoring;
pub mod timeline;

use chrono::{DateTime, Utc};
use shared_types::{DependencyAnalysis, Document, DocumentType, Severity, TimelineEvent};
use tracing::debug;

pub use alerts::Urgency;
pub use calendar::ExpiryCalendar;
pub use error::EngineError;
pub use index::DocumentIndex;
pub use rules::{Anchor, DependencyRule, ANALYSIS_HORIZON_DAYS, RULES};
pub use scoring::HealthBand;

/// DependencyEngine entry point
pub struct DependencyEngine;

impl DependencyEngine {
    pub fn new() -> Self {
        Self
    }

    /// Analyse a document snapshot as of `now`.
    ///
    /// Never fails. When a tracked type appears more than once the first
    /// document in input order is used.
    pub fn analyze(&self, documents: &[Document], now: DateTime<Utc>) -> DependencyAnalysis {
        let index = DocumentIndex::first_wins(documents);
        self.analyze_index(&index, now)
    }

    /// Like [`analyze`](Self::analyze), but refuses snapshots with more than
    /// one document of a tracked type.
    pub fn analyze_strict(
        &self,
        documents: &[Document],
        now: DateTime<Utc>,
    ) -> Result<DependencyAnalysis, EngineError> {
        let index = DocumentIndex::unique(documents)?;
        Ok(self.analyze_index(&index, now))
    }

    /// Expiry timeline across every supplied document
    pub fn timeline(&self, documents: &[Document], now: DateTime<Utc>) -> Vec<TimelineEvent> {
        timeline::build_timeline(documents, now)
    }

    fn analyze_index(&self, index: &DocumentIndex<'_>, now: DateTime<Utc>) -> DependencyAnalysis {
        let Some(visa) = index.get(&DocumentType::UaeVisa) else {
            debug!(tracked = index.len(), "no UAE visa in snapshot");
            return DependencyAnalysis {
                health_score: 0,
                critical_alerts: vec![alerts::missing_anchor_alert()],
                dependencies: Vec::new(),
            };
        };

        let anchor = Anchor::new(visa, now);
        let mut critical_alerts = Vec::new();
        let mut dependencies = Vec::new();

        if anchor.within_horizon() {
            for rule in RULES.iter() {
                if let Some(outcome) = rule.evaluate(index, &anchor, now) {
                    debug!(rule = rule.name, status = ?outcome.edge.status, "rule evaluated");
                    dependencies.push(outcome.edge);
                    critical_alerts.extend(outcome.alert);
                }
            }
        } else {
            debug!(
                visa_expiry_days = anchor.days_until_expiry,
                horizon = ANALYSIS_HORIZON_DAYS,
                "visa renewal beyond horizon, skipping dependency checks"
            );
        }

        let health_score = scoring::health_score(&critical_alerts);
        let analysis = DependencyAnalysis {
            health_score,
            critical_alerts,
            dependencies,
        };

        debug!(
            critical = analysis.count(Severity::Critical),
            warning = analysis.count(Severity::Warning),
            health_score,
            "health score calculated"
        );

        analysis
    }
}

impl Default for DependencyEngine {
    fn default() -> Self {
        Self::new()
    }
}
