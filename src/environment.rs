//! Container metadata read from the environment
//!
//! The image build bakes maintainer, version and repository details into
//! environment variables. This module reads them once into an
//! [`EnvironmentSnapshot`] that the commands render for `about`, `samples`,
//! `--version` and bug-report support messages.

use std::env;
use std::fmt::Write as _;

use serde::Serialize;

use crate::errors::{Outcome, ValidationError};

/// Default for every variable except the version
pub const NO_DATA: &str = "No Data!";

/// Default for `DOCKER_VERSION`
pub const DEFAULT_VERSION: &str = "latest";

/// Read-only snapshot of the container's build metadata
///
/// Each field is independently defaulted when its variable is unset or empty.
///
/// # Environment Variables
///
/// * `DOCKER_MAINTAINER` - Image maintainer (default: `No Data!`)
/// * `DOCKER_VERSION` - Image version (default: `latest`)
/// * `DOCKER_BUILD_DATE` - Build date (default: `No Data!`)
/// * `VCS_URL` - Source repository (default: `No Data!`)
/// * `BUG_REPORT` - Where to report bugs (default: `No Data!`)
/// * `DOCKER_NAME` - Image name used in samples (default: `No Data!`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvironmentSnapshot {
    pub maintainer: String,
    pub docker_version: String,
    pub build_date: String,
    pub vcs_url: String,
    pub bug_report: String,
    pub docker_name: String,
}

impl EnvironmentSnapshot {
    /// Reads the snapshot from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the snapshot from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str, default: &str| {
            lookup(key)
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            maintainer: read("DOCKER_MAINTAINER", NO_DATA),
            docker_version: read("DOCKER_VERSION", DEFAULT_VERSION),
            build_date: read("DOCKER_BUILD_DATE", NO_DATA),
            vcs_url: read("VCS_URL", NO_DATA),
            bug_report: read("BUG_REPORT", NO_DATA),
            docker_name: read("DOCKER_NAME", NO_DATA),
        }
    }

    /// Field names and values in declaration order
    pub fn properties(&self) -> [(&'static str, &str); 6] {
        [
            ("maintainer", self.maintainer.as_str()),
            ("docker_version", self.docker_version.as_str()),
            ("build_date", self.build_date.as_str()),
            ("vcs_url", self.vcs_url.as_str()),
            ("bug_report", self.bug_report.as_str()),
            ("docker_name", self.docker_name.as_str()),
        ]
    }

    /// Contact details appended to unexpected-failure reports
    pub fn support_message(&self) -> String {
        format!(
            "Support:\n\
             \tMaintainer: {}\n\
             \tDocker Version: {}\n\
             \tBuild Date: {}\n\
             \tRepository: {}\n\
             \tReport Bug: {}\n",
            self.maintainer, self.docker_version, self.build_date, self.vcs_url, self.bug_report
        )
    }
}

/// Renders `key: value` lines, indented under `title:` when a title is given
///
/// A blank title is rejected rather than silently dropped.
pub fn properties_to_string(properties: &[(&str, &str)], title: Option<&str>) -> Outcome<String> {
    if let Some(title) = title {
        if title.trim().is_empty() {
            return Err(ValidationError::for_parameter(
                "title",
                "The title must be None or non-empty string.",
            )
            .into());
        }
    }

    let mut result = String::new();
    let indent = match title {
        Some(title) => {
            let _ = writeln!(result, "{}:", title);
            "\t"
        }
        None => "",
    };
    for (key, value) in properties {
        let _ = writeln!(result, "{}{}: {}", indent, key, value);
    }
    Ok(result)
}
