//! `d8` command: the plain interactive d8 shell.

use tracing::info;

use super::{CommandOutcome, Context};
use crate::launcher::{D8, Invocation};

pub const EXIT_HINT: &str = "Use quit() or Ctrl-D (i.e. EOF) to exit the D8 Shell";

/// Run `d8` with the given arguments.
pub fn execute(ctx: &Context<'_>, args: &[String]) -> CommandOutcome {
    info!("{}", EXIT_HINT);
    ctx.launch_checked(&Invocation::new(D8).args(args))
}
