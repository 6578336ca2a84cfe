//! `run` command: execute a JavaScript program once per input file.
//!
//! Each input file is fed to the program on stdin. The runs are sequential
//! and a failing run does not stop the ones after it; the command reports
//! the last nonzero exit code it saw, or success when every run passed.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use tracing::{debug, error, info, warn};

use super::{CommandOutcome, Context};
use crate::errors::{ErrorDetail, FailResult, Outcome, ValidationError, convert_code_to_result};
use crate::exit_code::ExitCode;
use crate::launcher::{D8, Invocation};

/// Printed to stdout after each run
pub const SEPARATOR: &str = "----------------------------------------------------------------";

/// Run `program` against every file found in `files_and_dirs`.
///
/// # Errors
///
/// Returns `ValidationError` for an empty program path, `IO_ERROR` when the
/// program or an input path does not exist, and the last nonzero child exit
/// code otherwise. A per-file launch failure such as an unreadable input
/// counts as that file's exit code and does not stop the remaining files.
pub fn execute(
    ctx: &Context<'_>,
    program: &str,
    files_and_dirs: &[PathBuf],
    args: &[String],
) -> CommandOutcome {
    if program.trim().is_empty() {
        return Err(ValidationError::new("The program is required and can not be empty.").into());
    }
    if !Path::new(program).is_file() {
        return Err(FailResult::with_message(
            ExitCode::IoError,
            format!("File '{}' does not exist.", program),
        )
        .into());
    }

    let files = collect_files(files_and_dirs)?;
    debug!("Number of input files: {}", files.len());

    if files.is_empty() {
        warn!("No file provided.");
        let invocation = Invocation::new(D8).arg(program).args(args);
        return ctx.launch_checked(&invocation);
    }

    let mut last_failure = 0;
    for (index, file) in files.iter().enumerate() {
        info!("file {}: {}", index + 1, file.display());
        let invocation = Invocation::new(D8).arg(program).args(args).stdin(file);
        // A file that cannot be fed to d8 counts as a failed run.
        let code = match ctx.launch(&invocation) {
            Ok(code) => code,
            Err(ErrorDetail::Fail(failure)) => {
                error!("{}", failure);
                failure.code
            }
            Err(err) => return Err(err),
        };
        if code != 0 {
            last_failure = code;
        }
        println!("{}", SEPARATOR);
    }

    convert_code_to_result(last_failure).map(|()| None)
}

/// Expands files and directories into a sorted list of regular files
///
/// Directories are walked recursively. Repeated paths are kept, so a file
/// named twice is run twice.
pub fn collect_files(files_and_dirs: &[PathBuf]) -> Outcome<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in files_and_dirs {
        if path.is_file() {
            files.push(path.clone());
        } else if path.is_dir() {
            collect_dir(path, &mut files)?;
        } else {
            return Err(FailResult::with_message(
                ExitCode::IoError,
                format!("File or directory is not valid: {}", path.display()),
            )
            .into());
        }
    }
    files.sort();
    Ok(files)
}

fn collect_dir(dir: &Path, files: &mut Vec<PathBuf>) -> Outcome<()> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?;

    for entry in entries {
        let entry =
            entry.with_context(|| format!("Failed to read directory entry in {}", dir.display()))?;
        let path = entry.path();
        // Symlinked directories are not followed.
        let file_type = entry
            .file_type()
            .with_context(|| format!("Failed to get file type: {}", path.display()))?;

        if file_type.is_dir() {
            collect_dir(&path, files)?;
        } else if path.is_file() {
            files.push(path);
        }
    }
    Ok(())
}
