//! External process launching
//!
//! Commands describe the child they want as an [`Invocation`] and hand it to
//! a [`Launcher`]. The [`SystemLauncher`] resolves the executable on `PATH`,
//! runs it in the foreground with inherited stdio (or a file on stdin) and
//! reports its exit status. Children always run one at a time.

use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use std::thread;
use std::time::Duration;

use anyhow::Context;

use crate::errors::{FailResult, Outcome};
use crate::exit_code::ExitCode;

/// The JavaScript engine shell
pub const D8: &str = "d8";
/// Line-editing wrapper used by the enhanced shell
pub const RLWRAP: &str = "rlwrap";
/// The bash shell
pub const BASH: &str = "bash";

/// Exit status the shell reports for a command it cannot find
pub const COMMAND_NOT_FOUND: i32 = 127;

/// A single child process to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Executable name, looked up on `PATH`
    pub program: String,
    /// Arguments passed verbatim
    pub args: Vec<String>,
    /// File redirected to the child's stdin
    pub stdin: Option<PathBuf>,
    /// Pause before the child starts
    pub delay: Option<Duration>,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            stdin: None,
            delay: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn stdin(mut self, path: impl Into<PathBuf>) -> Self {
        self.stdin = Some(path.into());
        self
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

/// Shell-like rendering used in debug logs
impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        if let Some(stdin) = &self.stdin {
            write!(f, " < {}", stdin.display())?;
        }
        Ok(())
    }
}

/// Runs child processes on behalf of the commands
pub trait Launcher {
    /// Runs the invocation to completion and returns its exit status
    ///
    /// A nonzero status is a normal return value. Errors are reserved for
    /// failures that prevent the child from running at all.
    fn launch(&self, invocation: &Invocation) -> Outcome<i32>;
}

/// Launches real processes through `std::process`
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemLauncher;

impl SystemLauncher {
    pub fn new() -> Self {
        Self
    }

    fn open_stdin(path: &Path) -> Outcome<Stdio> {
        let file = File::open(path).map_err(|err| {
            FailResult::with_message(
                ExitCode::IoError,
                format!("Cannot open input file '{}': {}", path.display(), err),
            )
        })?;
        Ok(Stdio::from(file))
    }
}

impl Launcher for SystemLauncher {
    fn launch(&self, invocation: &Invocation) -> Outcome<i32> {
        let executable = which::which(&invocation.program).map_err(|_| {
            FailResult::with_message(
                COMMAND_NOT_FOUND,
                format!("{}: command not found", invocation.program),
            )
        })?;

        let mut cmd = Command::new(&executable);
        cmd.args(&invocation.args);
        if let Some(path) = &invocation.stdin {
            cmd.stdin(Self::open_stdin(path)?);
        }

        if let Some(delay) = invocation.delay {
            thread::sleep(delay);
        }

        let status = cmd
            .status()
            .with_context(|| format!("Failed to launch {}", executable.display()))?;

        Ok(exit_status_code(status))
    }
}

/// Maps a child's exit status to a process exit code
///
/// Signal-terminated children follow the shell convention of `128 + signal`.
pub fn exit_status_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    ExitCode::ProgramAborted.code()
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let invocation = Invocation::new(D8)
            .arg("/samples/say-hello.js")
            .args(["arg1", "arg2"])
            .stdin("/samples/0.txt");
        assert_eq!(
            invocation.to_string(),
            "d8 /samples/say-hello.js arg1 arg2 < /samples/0.txt"
        );
        assert_eq!(Invocation::new(BASH).to_string(), "bash");
    }

    #[test]
    fn test_missing_executable_is_command_not_found() {
        let err = SystemLauncher::new()
            .launch(&Invocation::new("definitely-not-a-real-binary-d8e"))
            .unwrap_err();
        assert!(err.is_expected());
        assert_eq!(err.code(), COMMAND_NOT_FOUND);
    }

    #[cfg(unix)]
    #[test]
    fn test_exit_code_passthrough() {
        let launcher = SystemLauncher::new();
        assert_eq!(launcher.launch(&Invocation::new("true")).unwrap(), 0);
        assert_eq!(launcher.launch(&Invocation::new("false")).unwrap(), 1);
        let code = launcher
            .launch(&Invocation::new("sh").args(["-c", "exit 42"]))
            .unwrap();
        assert_eq!(code, 42);
    }

    #[cfg(unix)]
    #[test]
    fn test_stdin_redirection() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("input.txt");
        std::fs::write(&input, "hello\n").unwrap();

        let code = SystemLauncher::new()
            .launch(&Invocation::new("grep").arg("-q").arg("hello").stdin(&input))
            .unwrap();
        assert_eq!(code, 0);

        let err = SystemLauncher::new()
            .launch(&Invocation::new("cat").stdin(dir.path().join("missing.txt")))
            .unwrap_err();
        assert_eq!(err.code(), ExitCode::IoError.code());
    }
}
