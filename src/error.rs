use thiserror::Error;

/// Failures of the key-value storage medium.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("could not serialize stored value: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// The errors the ledger operations can return.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// A field supplied for add/update is missing or invalid. Nothing was changed.
    #[error("{0}")]
    Validation(String),

    #[error("Transaction with ID {0} not found")]
    NotFound(String),

    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The import file could not be read. Nothing was imported.
    #[error("Failed to read file '{path}': {source}")]
    CsvRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write CSV: {0}")]
    CsvWrite(String),

    #[error("No transactions to export")]
    NothingToExport,
}

impl From<csv::Error> for LedgerError {
    fn from(e: csv::Error) -> Self {
        LedgerError::CsvWrite(e.to_string())
    }
}
