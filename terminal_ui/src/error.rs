use std::fmt;

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Create,
    Update,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::List => "Failed to fetch tasks",
            Operation::Create => "Failed to create task",
            Operation::Update => "Failed to update task",
            Operation::Delete => "Failed to delete task",
        })
    }
}

#[derive(Debug, Error)]
pub enum Cause {
    #[error("request failed: {0}")]
    Http(#[source] reqwest::Error),
    #[error("server responded with {0}")]
    Status(StatusCode),
    #[error("cannot build request URL: {0}")]
    Url(#[source] url::ParseError),
}

/// Failure of a single gateway call. Displays only the generic per-operation
/// message; the cause is there for logs.
#[derive(Debug, Error)]
#[error("{operation}")]
pub struct FetchError {
    pub operation: Operation,
    #[source]
    pub cause: Cause,
}

impl FetchError {
    pub fn http(operation: Operation, err: reqwest::Error) -> Self {
        Self {
            operation,
            cause: Cause::Http(err),
        }
    }

    pub fn status(operation: Operation, status: StatusCode) -> Self {
        Self {
            operation,
            cause: Cause::Status(status),
        }
    }

    pub fn url(operation: Operation, err: url::ParseError) -> Self {
        Self {
            operation,
            cause: Cause::Url(err),
        }
    }

    pub fn status_code(&self) -> Option<StatusCode> {
        match self.cause {
            Cause::Status(status) => Some(status),
            Cause::Http(ref err) => err.status(),
            Cause::Url(_) => None,
        }
    }
}
