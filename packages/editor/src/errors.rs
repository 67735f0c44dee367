//! Error types for the editor

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Malformed form document: {0}")]
    MalformedImport(#[source] serde_json::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[source] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] formsmith_common::StorageError),

    #[error("Export error: {0}")]
    Export(#[from] formsmith_responses::ExportError),

    #[error("Mutation error: {0}")]
    Mutation(#[from] crate::mutations::MutationError),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type EditorResult<T> = Result<T, EditorError>;
