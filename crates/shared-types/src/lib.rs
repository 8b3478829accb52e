pub mod analysis;
pub mod types;

pub use analysis::{
    CriticalAlert, DependencyAnalysis, DependencyEdge, EdgeStatus, Severity, TimelineEvent,
    TimelineStatus,
};
pub use types::{Document, DocumentError, DocumentRecord, DocumentStatus, DocumentType};
