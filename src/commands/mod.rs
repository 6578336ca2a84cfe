//! Command dispatch: routes the parsed command line to its handler.

pub mod about;
pub mod bash;
pub mod d8;
pub mod run;
pub mod samples;
pub mod shell;

use tracing::{debug, error};

use crate::cli::{Cli, Command};
use crate::environment::EnvironmentSnapshot;
use crate::errors::{FailResult, Outcome, convert_code_to_result};
use crate::exit_code::ExitCode;
use crate::launcher::{Invocation, Launcher};

/// Outcome of a command: an optional text payload reported on success
pub type CommandOutcome = Outcome<Option<String>>;

/// Everything a handler needs besides its own arguments
pub struct Context<'a> {
    pub environments: &'a EnvironmentSnapshot,
    pub launcher: &'a dyn Launcher,
}

impl<'a> Context<'a> {
    pub fn new(environments: &'a EnvironmentSnapshot, launcher: &'a dyn Launcher) -> Self {
        Self {
            environments,
            launcher,
        }
    }

    /// Runs a child process and returns its exit status
    pub(crate) fn launch(&self, invocation: &Invocation) -> Outcome<i32> {
        debug!("Command: {}", invocation);
        let code = self.launcher.launch(invocation)?;
        debug!("Return code: {}", code);
        Ok(code)
    }

    /// Runs a child process and maps its exit status to an outcome
    pub(crate) fn launch_checked(&self, invocation: &Invocation) -> CommandOutcome {
        let code = self.launch(invocation)?;
        convert_code_to_result(code).map(|()| None)
    }
}

/// Dispatch the parsed command line to its handler.
///
/// `print_help` is called when no command or an unknown command was given.
///
/// # Errors
///
/// Returns the handler's failure, or `MISUSE_SHELL_BUILTINS` when neither a
/// command nor `--version` was given.
pub fn dispatch(cli: &Cli, ctx: &Context<'_>, print_help: impl FnOnce()) -> CommandOutcome {
    match &cli.command {
        None if cli.version => Ok(Some(format!(
            "Program Version: {}",
            ctx.environments.docker_version
        ))),
        None => {
            debug!("No command specified.");
            print_help();
            Err(FailResult::with_message(ExitCode::MisuseShellBuiltins, "No command specified.").into())
        }
        Some(Command::Run(args)) => {
            let files_and_dirs: Vec<_> = args.file.iter().chain(&args.directory).cloned().collect();
            run::execute(ctx, &args.program, &files_and_dirs, &args.args)
        }
        Some(Command::D8(args)) => d8::execute(ctx, &args.args),
        Some(Command::Shell(args)) => shell::execute(ctx, &args.args),
        Some(Command::Bash(args)) => bash::execute(ctx, &args.args),
        Some(Command::Samples) => samples::execute(ctx),
        Some(Command::About(args)) => about::execute(ctx, args.json),
        // Unknown commands are reported but deliberately exit 0.
        Some(Command::External(external)) => {
            let name = external.first().map(String::as_str).unwrap_or_default();
            error!("Unknown command: {}", name);
            print_help();
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::launcher::testing::RecordingLauncher;
    use crate::logging::testing::capture;
    use std::cell::Cell;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_normalized(std::iter::once("d8-entrypoint").chain(args.iter().copied()))
            .unwrap()
    }

    fn dispatch_with(args: &[&str], launcher: &RecordingLauncher) -> (CommandOutcome, bool) {
        let environments = EnvironmentSnapshot::from_lookup(|_| None);
        let ctx = Context::new(&environments, launcher);
        let helped = Cell::new(false);
        let outcome = dispatch(&cli(args), &ctx, || helped.set(true));
        (outcome, helped.get())
    }

    #[test]
    fn test_no_command_is_misuse() {
        let launcher = RecordingLauncher::new();
        let (outcome, helped) = dispatch_with(&[], &launcher);
        let err = outcome.unwrap_err();
        assert!(err.is_expected());
        assert_eq!(err.code(), 2);
        assert_eq!(err.to_string(), "Operation failed with code 2.\nNo command specified.");
        assert!(helped);
        assert!(launcher.calls().is_empty());
    }

    #[test]
    fn test_version() {
        let launcher = RecordingLauncher::new();
        let (outcome, helped) = dispatch_with(&["--version"], &launcher);
        assert_eq!(outcome.unwrap().as_deref(), Some("Program Version: latest"));
        assert!(!helped);
    }

    #[test]
    fn test_unknown_command_succeeds() {
        let launcher = RecordingLauncher::new();
        let ((outcome, helped), logs) =
            capture(|| dispatch_with(&["invalid-command"], &launcher));
        assert!(outcome.unwrap().is_none());
        assert!(helped);
        assert!(logs.contains("ERROR Unknown command: invalid-command"));
        assert!(launcher.calls().is_empty());
    }

    #[test]
    fn test_known_commands_adopt_child_code() {
        let launcher = RecordingLauncher::with_codes(&[3]);
        let (outcome, _) = dispatch_with(&["BASH", "-c", "exit 3"], &launcher);
        assert_eq!(outcome.unwrap_err().code(), 3);

        let calls = launcher.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].program, "bash");
        assert_eq!(calls[0].args, vec!["-c", "exit 3"]);
    }

    #[test]
    fn test_samples_and_about_do_not_launch() {
        let launcher = RecordingLauncher::new();
        let (outcome, _) = dispatch_with(&["samples"], &launcher);
        assert!(outcome.unwrap().is_some());
        let (outcome, _) = dispatch_with(&["about"], &launcher);
        assert!(outcome.unwrap().unwrap().starts_with("About:\n"));
        assert!(launcher.calls().is_empty());
    }

    #[test]
    fn test_launch_logs_command_and_code() {
        let environments = EnvironmentSnapshot::from_lookup(|_| None);
        let launcher = RecordingLauncher::with_codes(&[9]);
        let ctx = Context::new(&environments, &launcher);

        let (outcome, logs) = capture(|| ctx.launch_checked(&Invocation::new("d8").arg("-e")));
        assert_eq!(outcome.unwrap_err().code(), 9);
        assert!(logs.contains("DEBUG Command: d8 -e\n"));
        assert!(logs.contains("DEBUG Return code: 9\n"));
    }
}
