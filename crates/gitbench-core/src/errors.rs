use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias using BenchError
pub type Result<T> = std::result::Result<T, BenchError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Every failure that leaves a crate boundary is classified by one of these
/// kinds. Each kind maps to a stable code used in log events and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Validation
    InvalidInput,
    InvalidConfig,
    NoRowsToUpdate,

    // Integration/IO
    Io,
    Persistence,
    /// An external tool ran but exited unsuccessfully
    ExternalTool,
    /// An external tool could not be spawned at all
    ToolMissing,
    Serialization,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::NoRowsToUpdate => "ERR_NO_ROWS_TO_UPDATE",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::ExternalTool => "ERR_EXTERNAL_TOOL",
            ExErrorKind::ToolMissing => "ERR_TOOL_MISSING",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries the classification kind plus optional context about where the
/// failure happened (operation, tool, path).
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    tool: Option<String>,
    path: Option<PathBuf>,
    exit_code: Option<i32>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            tool: None,
            path: None,
            exit_code: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add the name of the external tool involved
    pub fn with_tool(mut self, tool: impl Into<String>) -> Self {
        self.tool = Some(tool.into());
        self
    }

    /// Add the filesystem path involved
    pub fn with_path(mut self, path: impl AsRef<Path>) -> Self {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Add the exit code of a failed subprocess
    pub fn with_exit_code(mut self, code: i32) -> Self {
        self.exit_code = Some(code);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn tool(&self) -> Option<&str> {
        self.tool.as_deref()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn exit_code(&self) -> Option<i32> {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(tool) = &self.tool {
            write!(f, " (tool: {})", tool)?;
        }
        if let Some(code) = self.exit_code {
            write!(f, " (exit code: {})", code)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Domain errors raised while planning and generating the workload
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BenchError {
    /// An update was requested for a table that has no rows yet
    #[error("Cannot update table{table}: it has no rows")]
    NoRowsToUpdate { table: usize },

    /// Fewer fields per table than an update touches
    #[error("Tables need at least {required} fields, got {fields}")]
    TooFewFields { fields: usize, required: usize },

    /// Configuration value out of range or malformed
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl From<BenchError> for ExError {
    fn from(err: BenchError) -> Self {
        match err {
            BenchError::NoRowsToUpdate { table } => ExError::new(ExErrorKind::NoRowsToUpdate)
                .with_op("random_update")
                .with_message(format!("table{} has no rows", table)),

            BenchError::TooFewFields { fields, required } => {
                ExError::new(ExErrorKind::InvalidConfig)
                    .with_op("validate_config")
                    .with_message(format!(
                        "tables need at least {} fields, got {}",
                        required, fields
                    ))
            }

            BenchError::InvalidConfig { reason } => ExError::new(ExErrorKind::InvalidConfig)
                .with_op("validate_config")
                .with_message(reason),
        }
    }
}

impl From<toml::de::Error> for BenchError {
    fn from(err: toml::de::Error) -> Self {
        BenchError::InvalidConfig {
            reason: err.to_string(),
        }
    }
}
