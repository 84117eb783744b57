use serde::Serialize;
use super::types::ReportError;

/// How far an error reaches: a single report, or the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorScope {
    Report,
    Run,
}

#[derive(Debug, Clone)]
pub struct ErrorClassification {
    pub error_type: &'static str,
    pub scope: ErrorScope,
}

impl ErrorClassification {
    pub fn is_fatal_to_run(&self) -> bool {
        self.scope == ErrorScope::Run
    }
}

impl ReportError {
    /// Process exit code for an error that ended the command.
    ///
    /// Report-scoped errors exit like a failed report (1). Run-scoped errors
    /// exit 2 for configuration, 3 for the store and 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        if !self.classify().is_fatal_to_run() {
            return 1;
        }
        match self {
            ReportError::Config(_) | ReportError::Yaml(_) => 2,
            ReportError::Database(_) => 3,
            _ => 1,
        }
    }

    /// Classify this error by type name and by the scope it aborts.
    pub fn classify(&self) -> ErrorClassification {
        match self {
            // Confined to the report that raised them
            ReportError::TypeMismatch { .. } => ErrorClassification {
                error_type: "TypeMismatch",
                scope: ErrorScope::Report,
            },
            ReportError::EmptyView(_) => ErrorClassification {
                error_type: "EmptyView",
                scope: ErrorScope::Report,
            },
            ReportError::Render(_) => ErrorClassification {
                error_type: "RenderError",
                scope: ErrorScope::Report,
            },
            ReportError::Display(_) => ErrorClassification {
                error_type: "DisplayError",
                scope: ErrorScope::Report,
            },
            ReportError::Io(_) => ErrorClassification {
                error_type: "IOError",
                scope: ErrorScope::Report,
            },

            // Abort the run before any report is attempted
            ReportError::Config(_) => ErrorClassification {
                error_type: "ConfigError",
                scope: ErrorScope::Run,
            },
            ReportError::Yaml(_) => ErrorClassification {
                error_type: "YamlError",
                scope: ErrorScope::Run,
            },
            ReportError::Json(_) => ErrorClassification {
                error_type: "JsonError",
                scope: ErrorScope::Run,
            },
            ReportError::Database(_) => ErrorClassification {
                error_type: "DatabaseError",
                scope: ErrorScope::Run,
            },
            ReportError::Internal(_) => ErrorClassification {
                error_type: "InternalError",
                scope: ErrorScope::Run,
            },
        }
    }
}
