//! API handlers for the ExpatOS server
//!
//! Provides REST endpoints for:
//! - Dependency analysis
//! - Expiry timeline
//! - Document type listing

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use dependency_engine::rules::{Measure, Threshold, WhenMissing};
use dependency_engine::{DependencyEngine, HealthBand, Urgency, ANALYSIS_HORIZON_DAYS, RULES};
use shared_types::{DependencyAnalysis, Document, DocumentRecord, DocumentType, TimelineEvent};

use crate::error::ServerError;
use crate::AppState;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Handler: GET /health
pub async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "expatos-server",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Query parameters shared by the analysis endpoints
#[derive(Debug, Default, Deserialize)]
pub struct AnalysisParams {
    /// Reference date (YYYY-MM-DD), defaults to now
    pub as_of: Option<String>,

    /// Reject duplicate document types instead of using the first
    pub strict: Option<bool>,
}

/// Analysis response
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub success: bool,
    pub analysis: DependencyAnalysis,
    pub health_band: HealthBand,
    pub health_label: &'static str,
    /// One entry per alert, same order
    pub urgencies: Vec<Urgency>,
}

/// Handler: POST /api/analyze
///
/// Body is a JSON array of documents; `null` is treated as an empty list.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Query(params): Query<AnalysisParams>,
    Json(records): Json<Option<Vec<DocumentRecord>>>,
) -> Result<Json<AnalyzeResponse>, ServerError> {
    let documents = parse_documents(records)?;
    let now = resolve_now(params.as_of.as_deref())?;
    let strict = params.strict.unwrap_or(state.strict);

    info!(
        "Analyze request: documents={}, as_of={}, strict={}",
        documents.len(),
        now.date_naive(),
        strict
    );

    let engine = DependencyEngine::new();
    let analysis = if strict {
        engine.analyze_strict(&documents, now)?
    } else {
        engine.analyze(&documents, now)
    };

    debug!(
        "Analysis: score={}, alerts={}, dependencies={}",
        analysis.health_score,
        analysis.critical_alerts.len(),
        analysis.dependencies.len()
    );

    let health_band = HealthBand::from_score(analysis.health_score);
    let urgencies = analysis.critical_alerts.iter().map(Urgency::of).collect();

    Ok(Json(AnalyzeResponse {
        success: true,
        analysis,
        health_band,
        health_label: health_band.label(),
        urgencies,
    }))
}

/// Timeline response
#[derive(Serialize)]
pub struct TimelineResponse {
    pub success: bool,
    pub events: Vec<TimelineEvent>,
    pub count: usize,
}

/// Handler: POST /api/timeline
pub async fn handle_timeline(
    Query(params): Query<AnalysisParams>,
    Json(records): Json<Option<Vec<DocumentRecord>>>,
) -> Result<Json<TimelineResponse>, ServerError> {
    let documents = parse_documents(records)?;
    let now = resolve_now(params.as_of.as_deref())?;

    info!("Timeline request: documents={}", documents.len());

    let events = DependencyEngine::new().timeline(&documents, now);
    let count = events.len();

    Ok(Json(TimelineResponse {
        success: true,
        events,
        count,
    }))
}

/// Supported document types response
#[derive(Serialize)]
pub struct DocumentTypesResponse {
    pub success: bool,
    pub anchor: DocumentTypeInfo,
    pub types: Vec<DocumentTypeInfo>,
    pub total_types: usize,
}

/// Document type information
#[derive(Serialize)]
pub struct DocumentTypeInfo {
    pub api_value: String,
    pub name: String,
    pub requirement: String,
    pub optional: bool,
}

/// Handler: GET /api/document-types
pub async fn handle_list_document_types() -> Json<DocumentTypesResponse> {
    let anchor = DocumentTypeInfo {
        api_value: DocumentType::UaeVisa.to_string(),
        name: DocumentType::UaeVisa.label().to_string(),
        requirement: format!(
            "Anchor document; dependencies are checked when it expires within {} days",
            ANALYSIS_HORIZON_DAYS
        ),
        optional: false,
    };

    let types: Vec<DocumentTypeInfo> = RULES
        .iter()
        .map(|rule| DocumentTypeInfo {
            api_value: rule.subject.to_string(),
            name: rule.subject.label().to_string(),
            requirement: describe_requirement(rule.measure, rule.threshold),
            optional: rule.when_missing == WhenMissing::Skip,
        })
        .collect();

    let total_types = types.len() + 1;

    Json(DocumentTypesResponse {
        success: true,
        anchor,
        types,
        total_types,
    })
}

fn describe_requirement(measure: Measure, threshold: Threshold) -> String {
    let (comparison, days) = match threshold {
        Threshold::Below(days) => ("at least", days),
        Threshold::AtMost(days) => ("more than", days),
    };

    match measure {
        Measure::DaysFromNow => format!("Must remain valid {} {} days from today", comparison, days),
        Measure::GapAfterAnchor => format!(
            "Must remain valid {} {} days past the visa expiry",
            comparison, days
        ),
    }
}

/// Convert raw records into documents, failing on the first bad one
fn parse_documents(records: Option<Vec<DocumentRecord>>) -> Result<Vec<Document>, ServerError> {
    records
        .unwrap_or_default()
        .into_iter()
        .map(|record| Document::try_from(record).map_err(ServerError::from))
        .collect()
}

/// Resolve the reference instant: midnight UTC of `as_of`, or now
fn resolve_now(as_of: Option<&str>) -> Result<DateTime<Utc>, ServerError> {
    match as_of {
        None => Ok(Utc::now()),
        Some(value) => NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
            .map(|date| date.and_time(NaiveTime::MIN).and_utc())
            .map_err(|_| {
                ServerError::InvalidRequest(format!(
                    "Invalid as_of date '{}'. Expected YYYY-MM-DD",
                    value
                ))
            }),
    }
}
