use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Kind of identity/status document.
///
/// Only the first five variants take part in dependency analysis; anything
/// else round-trips through `Other` so uploads of unknown kinds survive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DocumentType {
    Passport,
    UaeVisa,
    EmiratesId,
    Ejari,
    HealthInsurance,
    Other(String),
}

impl DocumentType {
    /// Wire identifier, e.g. `uae_visa`
    pub fn as_str(&self) -> &str {
        match self {
            DocumentType::Passport => "passport",
            DocumentType::UaeVisa => "uae_visa",
            DocumentType::EmiratesId => "emirates_id",
            DocumentType::Ejari => "ejari",
            DocumentType::HealthInsurance => "health_insurance",
            DocumentType::Other(name) => name,
        }
    }

    /// Human-readable name for alert text
    pub fn label(&self) -> &str {
        match self {
            DocumentType::Passport => "Passport",
            DocumentType::UaeVisa => "UAE Visa",
            DocumentType::EmiratesId => "Emirates ID",
            DocumentType::Ejari => "Ejari",
            DocumentType::HealthInsurance => "Health Insurance",
            DocumentType::Other(name) => name,
        }
    }

    pub fn is_tracked(&self) -> bool {
        !matches!(self, DocumentType::Other(_))
    }
}

impl From<&str> for DocumentType {
    fn from(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "passport" => DocumentType::Passport,
            "uae_visa" => DocumentType::UaeVisa,
            "emirates_id" => DocumentType::EmiratesId,
            "ejari" => DocumentType::Ejari,
            "health_insurance" => DocumentType::HealthInsurance,
            _ => DocumentType::Other(value.to_string()),
        }
    }
}

impl From<String> for DocumentType {
    fn from(value: String) -> Self {
        DocumentType::from(value.as_str())
    }
}

impl From<DocumentType> for String {
    fn from(value: DocumentType) -> Self {
        match value {
            DocumentType::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status hint attached by the upstream document store.
///
/// The hint is free text upstream; anything unrecognised reads as `Valid`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DocumentStatus {
    #[default]
    Valid,
    Warning,
    Expired,
}

impl DocumentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentStatus::Valid => "valid",
            DocumentStatus::Warning => "warning",
            DocumentStatus::Expired => "expired",
        }
    }

    /// Days before expiry at which a document is flagged as a warning
    pub const WARNING_WINDOW_DAYS: i64 = 90;

    /// Derive the displayed status from the remaining validity.
    ///
    /// The expiry date always wins; the upstream hint is only consulted
    /// for documents that are comfortably valid by date.
    pub fn derive(days_until_expiry: i64, hint: DocumentStatus) -> DocumentStatus {
        if days_until_expiry <= 0 {
            DocumentStatus::Expired
        } else if days_until_expiry <= Self::WARNING_WINDOW_DAYS {
            DocumentStatus::Warning
        } else {
            hint
        }
    }
}

impl From<&str> for DocumentStatus {
    fn from(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "warning" => DocumentStatus::Warning,
            "expired" => DocumentStatus::Expired,
            _ => DocumentStatus::Valid,
        }
    }
}

impl From<String> for DocumentStatus {
    fn from(value: String) -> Self {
        DocumentStatus::from(value.as_str())
    }
}

impl From<DocumentStatus> for String {
    fn from(value: DocumentStatus) -> Self {
        value.as_str().to_string()
    }
}

/// A single identity/status document as supplied to the analyzer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    #[serde(rename = "type")]
    pub document_type: DocumentType,
    pub expiry_date: NaiveDate,
    #[serde(default)]
    pub status: DocumentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub holder_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuing_authority: Option<String>,
}

impl Document {
    pub fn new(
        id: impl Into<String>,
        document_type: impl Into<DocumentType>,
        expiry_date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            document_type: document_type.into(),
            expiry_date,
            status: DocumentStatus::default(),
            number: None,
            holder_name: None,
            issue_date: None,
            issuing_authority: None,
        }
    }

    pub fn with_status(mut self, status: DocumentStatus) -> Self {
        self.status = status;
        self
    }
}

/// Errors raised while turning loosely-typed input into a [`Document`]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DocumentError {
    #[error("document '{id}' has an invalid {field} '{value}' (expected YYYY-MM-DD)")]
    InvalidDate {
        id: String,
        field: &'static str,
        value: String,
    },

    #[error("document is missing an id")]
    MissingId,
}

/// Document as it arrives from an upload form or API body, dates unparsed
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type")]
    pub document_type: DocumentType,
    pub expiry_date: String,
    #[serde(default)]
    pub status: DocumentStatus,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub holder_name: Option<String>,
    #[serde(default)]
    pub issue_date: Option<String>,
    #[serde(default)]
    pub issuing_authority: Option<String>,
}

fn parse_date(id: &str, field: &'static str, value: &str) -> Result<NaiveDate, DocumentError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| DocumentError::InvalidDate {
        id: id.to_string(),
        field,
        value: value.to_string(),
    })
}

impl TryFrom<DocumentRecord> for Document {
    type Error = DocumentError;

    fn try_from(record: DocumentRecord) -> Result<Self, Self::Error> {
        if record.id.trim().is_empty() {
            return Err(DocumentError::MissingId);
        }

        let expiry_date = parse_date(&record.id, "expiryDate", &record.expiry_date)?;
        let issue_date = record
            .issue_date
            .as_deref()
            .map(|value| parse_date(&record.id, "issueDate", value))
            .transpose()?;

        Ok(Document {
            id: record.id,
            document_type: record.document_type,
            expiry_date,
            status: record.status,
            number: record.number,
            holder_name: record.holder_name,
            issue_date,
            issuing_authority: record.issuing_authority,
        })
    }
}
