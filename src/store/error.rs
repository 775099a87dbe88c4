use thiserror::Error;

use crate::db::RecordKey;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A read or mutation arrived before `initialize` completed.
    #[error("user data store is not initialized")]
    NotInitialized,

    /// A record write failed after the in-memory mutation was applied.
    /// Memory and disk diverge until the next successful write or reload.
    #[error("failed to persist the {key} record: {source:#}")]
    Persistence { key: RecordKey, source: anyhow::Error },

    /// Import payload carries an export-format version this build does not
    /// understand.
    #[error("incompatible export version {found}, expected {expected}")]
    IncompatibleImport { found: u32, expected: u32 },
}
