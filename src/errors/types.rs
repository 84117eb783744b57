use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Type mismatch: cannot average field '{field}' holding {found} values")]
    TypeMismatch { field: String, found: String },

    #[error("Empty view: '{0}' has no groups to draw")]
    EmptyView(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Display error: {0}")]
    Display(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
