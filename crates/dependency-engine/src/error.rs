use shared_types::DocumentType;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("more than one {document_type} document supplied ('{first_id}' and '{duplicate_id}')")]
    DuplicateDocument {
        document_type: DocumentType,
        first_id: String,
        duplicate_id: String,
    },
}
