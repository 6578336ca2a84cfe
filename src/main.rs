//! d8 docker entrypoint
//!
//! This application is the entrypoint of a container image that ships the d8
//! JavaScript shell. It dispatches to a small set of subcommands that run d8,
//! an enhanced d8 shell or bash, and reports the child's exit code as its own.

use clap::CommandFactory;
use tracing::debug;

mod cli;
mod commands;
mod environment;
mod errors;
mod exit_code;
mod launcher;
mod logging;
mod report;

use cli::Cli;
use commands::{CommandOutcome, Context};
use environment::{EnvironmentSnapshot, properties_to_string};
use launcher::SystemLauncher;

/// Main entry point for the d8 docker entrypoint
///
/// Parses command-line arguments, sets up logging, reads the environment
/// snapshot, runs the selected command and exits with its code.
fn main() {
    let cli = Cli::parse_normalized();
    logging::init(cli.debug);

    let environments = EnvironmentSnapshot::from_env();
    let launcher = SystemLauncher::new();
    let ctx = Context::new(&environments, &launcher);

    let outcome = run(&cli, &ctx);
    report::log_result(&outcome, &environments);

    let code = match &outcome {
        Ok(_) => exit_code::ExitCode::Success.code(),
        Err(detail) => {
            if !detail.is_expected() {
                println!("{:?}", detail);
            }
            detail.code()
        }
    };
    std::process::exit(code);
}

/// Logs the startup state and dispatches the command
fn run(cli: &Cli, ctx: &Context<'_>) -> CommandOutcome {
    properties_to_string(&ctx.environments.properties(), Some("Environments"))
        .inspect(|text| debug!("{}", text))?;
    debug!("known params: {:?}", cli);

    commands::dispatch(cli, ctx, || {
        if let Err(err) = Cli::command().print_help() {
            debug!("Failed to print help: {}", err);
        }
    })
}
