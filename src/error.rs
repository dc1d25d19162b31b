// Console Error Types
use serde_json::{json, Value};

use crate::auth::StoreError;
use crate::filter::FilterError;
use crate::routing::RouteError;

/// Console-level error with a stable code for scripted callers
#[derive(Debug)]
pub enum ConsoleError {
    // Bad input from the operator
    InvalidInput(String),

    // Credential persistence failed
    Storage(String),

    // Route lookup or guard failure
    RouteNotFound(String),
    RedirectLoop(String),
    InvalidRouteTable(String),

    // Records could not be read
    InvalidRecords(String),
}

impl ConsoleError {
    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ConsoleError::InvalidInput(msg) => msg,
            ConsoleError::Storage(msg) => msg,
            ConsoleError::RouteNotFound(msg) => msg,
            ConsoleError::RedirectLoop(msg) => msg,
            ConsoleError::InvalidRouteTable(msg) => msg,
            ConsoleError::InvalidRecords(msg) => msg,
        }
    }

    /// Get error code for scripted handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ConsoleError::InvalidInput(_) => "INVALID_INPUT",
            ConsoleError::Storage(_) => "STORAGE_ERROR",
            ConsoleError::RouteNotFound(_) => "ROUTE_NOT_FOUND",
            ConsoleError::RedirectLoop(_) => "REDIRECT_LOOP",
            ConsoleError::InvalidRouteTable(_) => "INVALID_ROUTE_TABLE",
            ConsoleError::InvalidRecords(_) => "INVALID_RECORDS",
        }
    }

    /// Process exit status for the CLI
    pub fn exit_code(&self) -> i32 {
        match self {
            ConsoleError::InvalidInput(_) | ConsoleError::InvalidRecords(_) => 2,
            ConsoleError::RouteNotFound(_) | ConsoleError::RedirectLoop(_) => 3,
            ConsoleError::Storage(_) | ConsoleError::InvalidRouteTable(_) => 1,
        }
    }

    pub fn to_json(&self) -> Value {
        json!({
            "success": false,
            "error": self.message(),
            "error_code": self.error_code()
        })
    }
}

impl ConsoleError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        ConsoleError::InvalidInput(message.into())
    }

    pub fn invalid_records(message: impl Into<String>) -> Self {
        ConsoleError::InvalidRecords(message.into())
    }
}

impl From<StoreError> for ConsoleError {
    fn from(err: StoreError) -> Self {
        tracing::error!("Credential store error: {}", err);
        ConsoleError::Storage(err.to_string())
    }
}

impl From<FilterError> for ConsoleError {
    fn from(err: FilterError) -> Self {
        ConsoleError::InvalidInput(err.to_string())
    }
}

impl From<RouteError> for ConsoleError {
    fn from(err: RouteError) -> Self {
        match err {
            RouteError::NotFound(_) => ConsoleError::RouteNotFound(err.to_string()),
            RouteError::RedirectLoop { .. } => ConsoleError::RedirectLoop(err.to_string()),
            RouteError::InvalidTable(_) | RouteError::Yaml(_) => ConsoleError::InvalidRouteTable(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for ConsoleError {
    fn from(err: serde_json::Error) -> Self {
        ConsoleError::InvalidRecords(format!("Invalid JSON: {}", err))
    }
}

impl std::fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ConsoleError {}
