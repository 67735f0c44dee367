use crate::error::StorageError;

/// Result alias for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
