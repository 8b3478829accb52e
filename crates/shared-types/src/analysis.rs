use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{DocumentStatus, DocumentType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Warning,
    Info,
}

/// Outcome of evaluating one dependency edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeStatus {
    Ok,
    Warning,
    Failing,
}

impl EdgeStatus {
    /// Alert severity raised for an edge in this state, if any
    pub fn severity(&self) -> Option<Severity> {
        match self {
            EdgeStatus::Ok => None,
            EdgeStatus::Warning => Some(Severity::Warning),
            EdgeStatus::Failing => Some(Severity::Critical),
        }
    }
}

/// Directed relationship: `parent` requires `requires` to meet a validity condition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyEdge {
    pub parent: DocumentType,
    pub requires: DocumentType,
    pub status: EdgeStatus,
    pub reason: String,
    pub current_validity: String,
    pub required_validity: String,
}

/// User-facing finding produced by the analyzer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriticalAlert {
    pub severity: Severity,
    pub title: String,
    pub description: String,
    pub affected_documents: Vec<DocumentType>,
    pub action_required: String,
    pub deadline: String,
    /// Zero or negative means overdue
    pub days_until_deadline: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyAnalysis {
    pub health_score: u8,
    pub critical_alerts: Vec<CriticalAlert>,
    pub dependencies: Vec<DependencyEdge>,
}

impl DependencyAnalysis {
    pub fn count(&self, severity: Severity) -> usize {
        self.critical_alerts
            .iter()
            .filter(|alert| alert.severity == severity)
            .count()
    }

    /// Edge for the given relationship, if one was evaluated
    pub fn edge(&self, parent: &DocumentType, requires: &DocumentType) -> Option<&DependencyEdge> {
        self.dependencies
            .iter()
            .find(|edge| &edge.parent == parent && &edge.requires == requires)
    }
}

/// Timeline status, finer-grained than [`crate::DocumentStatus`] near expiry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimelineStatus {
    Valid,
    Warning,
    Critical,
    Expired,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEvent {
    pub id: String,
    pub document_type: DocumentType,
    pub expiry_date: NaiveDate,
    pub status: TimelineStatus,
    /// Coarser status for document cards, see [`DocumentStatus::derive`]
    pub document_status: DocumentStatus,
    pub days_until_expiry: i64,
}
