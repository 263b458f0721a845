use std::path::PathBuf;
use thiserror::Error;

/// Result type for lawabbr operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for lawabbr operations
#[derive(Error, Debug)]
pub enum Error {
    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// The input dataset could not be read or parsed
    #[error("Dataset error in {}: {message}", path.display())]
    Dataset { path: PathBuf, message: String },

    /// An existing checkpoint file is not a valid result array.
    ///
    /// Never recovered from automatically: discarding prior results would
    /// silently change the accuracy figures of a resumed run.
    #[error("Corrupt checkpoint {}: {message}", path.display())]
    CorruptCheckpoint { path: PathBuf, message: String },

    /// Another process holds the checkpoint lock
    #[error("Checkpoint {} is in use by another run", path.display())]
    CheckpointLocked { path: PathBuf },

    /// A result record with this id is already stored
    #[error("Duplicate result record: {0}")]
    DuplicateRecord(String),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl Error {
    /// Creates a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates a dataset error
    pub fn dataset(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Dataset {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a corrupt checkpoint error
    pub fn corrupt_checkpoint(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::CorruptCheckpoint {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Adds context to any error
    pub fn with_context<E>(context: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::WithContext {
            context: context.into(),
            source: Box::new(source),
        }
    }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::with_context(context, e))
    }
}
