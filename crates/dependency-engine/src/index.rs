//! Keyed lookup of the documents the analyzer cares about
//!
//! Each tracked [`DocumentType`] maps to at most one document. How
//! duplicates are resolved is chosen by the constructor:
//! [`DocumentIndex::first_wins`] keeps the earliest in input order,
//! [`DocumentIndex::unique`] refuses the whole snapshot.

use std::collections::HashMap;

use shared_types::{Document, DocumentType};
use tracing::warn;

use crate::error::EngineError;

#[derive(Debug, Default)]
pub struct DocumentIndex<'a> {
    by_type: HashMap<&'a DocumentType, &'a Document>,
}

impl<'a> DocumentIndex<'a> {
    /// Index tracked documents; on duplicates the first in input order wins
    pub fn first_wins(documents: &'a [Document]) -> Self {
        let mut by_type: HashMap<&'a DocumentType, &'a Document> = HashMap::new();

        for doc in documents.iter().filter(|d| d.document_type.is_tracked()) {
            if let Some(first) = by_type.get(&doc.document_type) {
                warn!(
                    document_type = %doc.document_type,
                    kept = %first.id,
                    ignored = %doc.id,
                    "duplicate document type, keeping the first"
                );
                continue;
            }
            by_type.insert(&doc.document_type, doc);
        }

        Self { by_type }
    }

    /// Index tracked documents, rejecting any duplicated type
    pub fn unique(documents: &'a [Document]) -> Result<Self, EngineError> {
        let mut by_type: HashMap<&'a DocumentType, &'a Document> = HashMap::new();

        for doc in documents.iter().filter(|d| d.document_type.is_tracked()) {
            if let Some(first) = by_type.get(&doc.document_type) {
                return Err(EngineError::DuplicateDocument {
                    document_type: doc.document_type.clone(),
                    first_id: first.id.clone(),
                    duplicate_id: doc.id.clone(),
                });
            }
            by_type.insert(&doc.document_type, doc);
        }

        Ok(Self { by_type })
    }

    pub fn get(&self, document_type: &DocumentType) -> Option<&'a Document> {
        self.by_type.get(document_type).copied()
    }

    pub fn len(&self) -> usize {
        self.by_type.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_type.is_empty()
    }
}
