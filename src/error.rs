use thiserror::Error;

/// Reasons the correlation pipeline stops short of producing a matrix.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("dataset has no rows")]
    EmptyDataset,

    #[error("insufficient data: {numeric} numeric column(s), at least 2 required")]
    InsufficientData { numeric: usize },
}
