//! Error types for entrypoint operations
//!
//! Every operation returns an [`Outcome`]: either its value or exactly one
//! [`ErrorDetail`]. Failures come in three flavours:
//!
//! - [`ValidationError`] for caller contract violations (always code 400)
//! - [`FailResult`] for expected operational failures that carry a real
//!   process exit status, such as a missing file or a nonzero child exit
//! - `Unexpected` for anything else, typically an I/O error from a
//!   dependency wrapped with `anyhow` context

use std::fmt::Write as _;

use thiserror::Error;

use crate::exit_code::ExitCode;

/// Result of every entrypoint operation
pub type Outcome<T> = std::result::Result<T, ErrorDetail>;

/// Code carried by every validation error
pub const VALIDATION_ERROR_CODE: i32 = 400;

/// Title used when a validation error does not name a specific parameter
pub const DEFAULT_VALIDATION_TITLE: &str = "One or more validation errors occurred";

fn message_suffix(message: &Option<String>) -> String {
    match message {
        Some(message) => format!("\n{}", message),
        None => String::new(),
    }
}

/// A caller passed arguments that break the operation's contract
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}{}", .title, message_suffix(.message))]
pub struct ValidationError {
    pub title: String,
    pub message: Option<String>,
}

impl ValidationError {
    /// Creates a validation error with the default title
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            title: DEFAULT_VALIDATION_TITLE.to_string(),
            message: Some(message.into()),
        }
    }

    /// Creates a validation error scoped to one parameter
    pub fn for_parameter(parameter: &str, message: impl Into<String>) -> Self {
        Self {
            title: format!("The '{}' parameter is not valid.", parameter),
            message: Some(message.into()),
        }
    }

    pub fn code(&self) -> i32 {
        VALIDATION_ERROR_CODE
    }
}

/// A handled failure carrying a literal process exit status
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Operation failed with code {}.{}", .code, message_suffix(.message))]
pub struct FailResult {
    pub code: i32,
    pub message: Option<String>,
}

impl FailResult {
    pub fn new(code: impl Into<i32>) -> Self {
        Self {
            code: code.into(),
            message: None,
        }
    }

    pub fn with_message(code: impl Into<i32>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: Some(message.into()),
        }
    }

    pub fn title(&self) -> String {
        format!("Operation failed with code {}.", self.code)
    }
}

/// The failure branch of an [`Outcome`]
#[derive(Error, Debug)]
pub enum ErrorDetail {
    /// Contract violation by the caller
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Expected operational failure with a process exit status
    #[error(transparent)]
    Fail(#[from] FailResult),

    /// Anything else, usually a dependency error wrapped with context
    #[error("{title}")]
    Unexpected { title: String, cause: anyhow::Error },
}

impl ErrorDetail {
    /// Returns the numeric code that becomes the process exit status
    pub fn code(&self) -> i32 {
        match self {
            Self::Validation(err) => err.code(),
            Self::Fail(err) => err.code,
            Self::Unexpected { .. } => ExitCode::GeneralError.code(),
        }
    }

    /// Whether this failure was anticipated and carries a meaningful exit code
    pub fn is_expected(&self) -> bool {
        matches!(self, Self::Fail(_))
    }

    /// Renders the detail as a `Title/Message/Code` block for bug reports
    pub fn describe(&self) -> String {
        let (title, message) = match self {
            Self::Validation(err) => (err.title.clone(), err.message.clone()),
            Self::Fail(err) => (err.title(), err.message.clone()),
            Self::Unexpected { title, cause } => (title.clone(), Some(format!("{:#}", cause))),
        };

        let mut block = format!("Title: {}\n", title);
        if let Some(message) = message {
            let _ = writeln!(block, "Message: {}", message);
        }
        let _ = writeln!(block, "Code: {}", self.code());
        block
    }
}

impl From<anyhow::Error> for ErrorDetail {
    fn from(cause: anyhow::Error) -> Self {
        Self::Unexpected {
            title: "An unexpected error occurred.".to_string(),
            cause,
        }
    }
}

/// Turns a child process exit status into an [`Outcome`]
///
/// Zero is success; any other value becomes a [`FailResult`] carrying that
/// exact code.
pub fn convert_code_to_result(code: i32) -> Outcome<()> {
    if code == 0 {
        Ok(())
    } else {
        Err(FailResult::new(code).into())
    }
}
