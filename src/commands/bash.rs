//! `bash` command: a bash subshell with the given arguments.

use tracing::info;

use super::{CommandOutcome, Context};
use crate::launcher::{BASH, Invocation};

pub fn execute(ctx: &Context<'_>, args: &[String]) -> CommandOutcome {
    info!("Running bash command. Use --help to see other commands.");
    ctx.launch_checked(&Invocation::new(BASH).args(args))
}
