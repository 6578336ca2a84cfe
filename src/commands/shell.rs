//! `shell` command: d8 under rlwrap with line editing and sensible defaults.

use std::time::Duration;

use tracing::info;

use super::d8::EXIT_HINT;
use super::{CommandOutcome, Context};
use crate::launcher::{D8, Invocation, RLWRAP};

/// Flags always passed to d8 ahead of the user's arguments
pub const DEFAULT_OPTIONS: [&str; 2] = ["--harmony", "--allow-natives-syntax"];

/// Pause before the shell starts
pub const STARTUP_DELAY: Duration = Duration::from_millis(500);

/// Run the enhanced d8 shell with the given arguments.
pub fn execute(ctx: &Context<'_>, args: &[String]) -> CommandOutcome {
    let invocation = Invocation::new(RLWRAP)
        .args(["-m", "-pgreen", D8])
        .args(DEFAULT_OPTIONS)
        .args(args)
        .delay(STARTUP_DELAY);

    info!("Default options: {}", DEFAULT_OPTIONS.join(" "));
    info!("{}", EXIT_HINT);
    ctx.launch_checked(&invocation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::EnvironmentSnapshot;
    use crate::launcher::testing::RecordingLauncher;
    use crate::logging::testing::capture;

    #[test]
    fn test_defaults_precede_passthrough() {
        let environments = EnvironmentSnapshot::from_lookup(|_| None);
        let launcher = RecordingLauncher::new();
        let ctx = Context::new(&environments, &launcher);
        let args = vec!["-a".to_string(), "arg1".to_string()];

        let (outcome, logs) = capture(|| execute(&ctx, &args));
        assert!(outcome.unwrap().is_none());
        assert!(logs.contains(" INFO Default options: --harmony --allow-natives-syntax\n"));
        assert!(logs.contains(
            "DEBUG Command: rlwrap -m -pgreen d8 --harmony --allow-natives-syntax -a arg1\n"
        ));

        let calls = launcher.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].program, "rlwrap");
        assert_eq!(calls[0].delay, Some(Duration::from_millis(500)));
    }
}
