//! Process exit codes
//!
//! The fixed registry of exit statuses this entrypoint reports on its own.
//! Exit codes returned by child processes outside this range are passed
//! through unchanged.

use std::fmt;

/// Exit statuses reported by the entrypoint itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(dead_code)]
pub enum ExitCode {
    /// Completed without errors
    Success = 0,
    /// An error not covered by any other code
    GeneralError = 1,
    /// Incorrect arguments or misuse of a shell builtin
    MisuseShellBuiltins = 2,
    /// Incorrect or incomplete command-line arguments
    CommandLineSyntaxError = 3,
    /// Insufficient permissions or privileges
    PermissionDenied = 4,
    /// Missing files, full disks and similar I/O problems
    IoError = 5,
    /// Aborted by a signal or an unexpected interruption
    ProgramAborted = 6,
    /// Executed on an incompatible machine architecture
    IncorrectMachineArchitecture = 7,
}

impl ExitCode {
    /// Returns the numeric process exit status
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Returns the symbolic name used in logs
    pub fn name(self) -> &'static str {
        match self {
            ExitCode::Success => "SUCCESS",
            ExitCode::GeneralError => "GENERAL_ERROR",
            ExitCode::MisuseShellBuiltins => "MISUSE_SHELL_BUILTINS",
            ExitCode::CommandLineSyntaxError => "COMMAND_LINE_SYNTAX_ERROR",
            ExitCode::PermissionDenied => "PERMISSION_DENIED",
            ExitCode::IoError => "IO_ERROR",
            ExitCode::ProgramAborted => "PROGRAM_ABORTED",
            ExitCode::IncorrectMachineArchitecture => "INCORRECT_MACHINE_ARCHITECTURE",
        }
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.code())
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.code()
    }
}
