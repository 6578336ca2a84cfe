//! Terminal reporting of command outcomes
//!
//! Expected failures ([`FailResult`](crate::errors::FailResult)) are logged
//! as a short error line. Anything else is treated as a bug: the full detail
//! is logged together with the maintainer's contact details.

use std::fmt::Display;

use tracing::{error, info};

use crate::environment::EnvironmentSnapshot;
use crate::errors::{ErrorDetail, Outcome};

/// Logs the final outcome of a command
///
/// A success payload is logged at info level, an empty success logs nothing.
pub fn log_result<T: Display>(outcome: &Outcome<Option<T>>, environments: &EnvironmentSnapshot) {
    match outcome {
        Ok(Some(value)) => info!("{}", value),
        Ok(None) => {}
        Err(detail) if detail.is_expected() => error!("{}", detail),
        Err(detail) => log_error(detail, environments),
    }
}

/// Logs an unexpected failure followed by the support message
pub fn log_error(detail: &ErrorDetail, environments: &EnvironmentSnapshot) {
    error!("An error occurred:\n{}", detail.describe());
    info!(
        "Please report this error to help others who use this program.\n{}",
        environments.support_message()
    );
}
