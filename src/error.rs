//! Error types for the document store layer.
//!
//! Only contract violations are errors here. Data-shape anomalies inside
//! stored documents (missing references, stringly numbers, absent fields)
//! are absorbed by lenient decoding and never surface as `StoreError`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Unknown collection: {0}")]
    UnknownCollection(String),

    #[error("Document not found: {collection}/{id}")]
    NotFound { collection: String, id: String },

    #[error("Document is not a JSON object")]
    NotAnObject,
}

impl StoreError {
    /// True when the failure is a missing target rather than caller misuse.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}
