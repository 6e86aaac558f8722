use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("database error: {0}")]
    Db(#[from] rusqlite::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("missing column: {0}")]
    MissingColumn(String),
    #[error("missing table: {0}")]
    MissingTable(String),
    #[error("template error: {0}")]
    Template(String),
}

pub type Result<T> = std::result::Result<T, ReportError>;
