use predictus_client::ClientError;
use thiserror::Error;

/// Shown when the import endpoint rejects without an `erro` message.
pub const IMPORT_FALLBACK: &str = "Falha ao importar";

/// Shown when the findings endpoint rejects without an `erro` message.
pub const QUERY_FALLBACK: &str = "Falha ao buscar achados.";

/// Why a submission ended in the error panel.
///
/// The display text is exactly what the panel shows.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WorkflowError {
    /// The import endpoint rejected the submission.
    #[error("{0}")]
    Import(String),

    /// The findings endpoint rejected the lookup.
    #[error("{0}")]
    Query(String),

    /// Transport or parse failure on either call.
    #[error("{0}")]
    Network(String),
}

impl WorkflowError {
    pub(crate) fn at_import(err: ClientError) -> Self {
        match err {
            ClientError::Rejected { message, .. } => {
                Self::Import(message.unwrap_or_else(|| IMPORT_FALLBACK.to_string()))
            }
            other => Self::Network(other.to_string()),
        }
    }

    pub(crate) fn at_query(err: ClientError) -> Self {
        match err {
            ClientError::Rejected { message, .. } => {
                Self::Query(message.unwrap_or_else(|| QUERY_FALLBACK.to_string()))
            }
            other => Self::Network(other.to_string()),
        }
    }

    /// Text for the error panel.
    pub fn message(&self) -> &str {
        match self {
            Self::Import(m) | Self::Query(m) | Self::Network(m) => m,
        }
    }
}
