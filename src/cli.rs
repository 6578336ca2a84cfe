//! Command-line definitions
//!
//! Unknown subcommands are not a parse error: they are captured as
//! [`Command::External`] so the dispatcher can report them. Command names
//! are matched case-insensitively by re-parsing when the captured name is a
//! known command in another case.

use std::ffi::OsString;
use std::path::PathBuf;
use std::str::FromStr;

use clap::{Args, Parser, Subcommand};

/// d8 flags worth knowing about, shown in `d8 --help` and `shell --help`
pub const D8_RECOMMENDED_OPTIONS: &[(&str, &str)] = &[
    (
        "--harmony",
        "Enables support for some of the experimental ES6 features that are not yet fully standardized",
    ),
    (
        "--allow-natives-syntax",
        "Enables the use of V8-specific syntax in JavaScript code",
    ),
    ("--trace-opt", "Enables logging of V8's optimization process"),
    (
        "--print-bytecode",
        "Prints the generated bytecode for JavaScript functions",
    ),
    (
        "--print-opt-code",
        "Prints the generated optimized machine code for JavaScript functions",
    ),
    ("--trace", "Enables detailed logging of V8 internals"),
    ("--log-timer-events", "Enables logging of timer events"),
    ("--log-gc", "Enables logging of garbage collection events"),
    ("--prof", "Enables CPU profiling"),
    (
        "--trace-deopt",
        "Enables logging of V8's deoptimization process",
    ),
    ("--trace-ic", "Enables logging of inline caching events"),
];

fn d8_options_help() -> String {
    let width = D8_RECOMMENDED_OPTIONS
        .iter()
        .map(|(option, _)| option.len())
        .max()
        .unwrap_or(0);

    let mut help = String::from("RECOMMENDED D8 OPTIONS:\n");
    for (option, description) in D8_RECOMMENDED_OPTIONS {
        help.push_str(&format!("  {:<width$}  {}\n", option, description, width = width));
    }
    help
}

/// Top-level arguments of the d8 docker entrypoint
#[derive(Debug, Parser)]
#[command(
    name = "d8-entrypoint",
    about = "The d8 docker entrypoint",
    disable_version_flag = true,
    after_help = "ENVIRONMENT VARIABLES:
  DOCKER_MAINTAINER       Image maintainer
  DOCKER_VERSION          Image version (default: latest)
  DOCKER_BUILD_DATE       Image build date
  VCS_URL                 Source repository
  BUG_REPORT              Where to report bugs
  DOCKER_NAME             Image name used in samples"
)]
pub struct Cli {
    /// Show program version
    #[arg(long)]
    pub version: bool,

    /// Show logs at debug level
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// All subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Execute a javascript program with arguments
    Run(RunArgs),
    /// Execute an enhanced d8 shell with arguments
    #[command(after_help = d8_options_help())]
    Shell(PassthroughArgs),
    /// Default d8 shell
    #[command(name = "d8", after_help = d8_options_help())]
    D8(PassthroughArgs),
    /// Execute a bash shell with arguments
    Bash(PassthroughArgs),
    /// Show samples
    Samples,
    /// Show About message
    About(AboutArgs),
    /// Anything else
    #[command(external_subcommand)]
    External(Vec<String>),
}

/// Arguments for `run`
#[derive(Debug, Args)]
pub struct RunArgs {
    /// The javascript program to execute
    pub program: String,

    /// Input file(s)
    #[arg(short, long, value_name = "FILE")]
    pub file: Vec<PathBuf>,

    /// Input directory(s)
    #[arg(short, long, value_name = "DIR")]
    pub directory: Vec<PathBuf>,

    /// Arguments passed to the program
    #[arg(value_name = "ARGS")]
    pub args: Vec<String>,
}

/// Arguments handed to the child process verbatim
#[derive(Debug, Args)]
pub struct PassthroughArgs {
    #[arg(value_name = "ARGS", trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

/// Arguments for `about`
#[derive(Debug, Args)]
pub struct AboutArgs {
    /// Print the metadata as JSON
    #[arg(long)]
    pub json: bool,
}

/// Names of the known subcommands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandName {
    Run,
    D8,
    Shell,
    Bash,
    Samples,
    About,
}

impl CommandName {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommandName::Run => "run",
            CommandName::D8 => "d8",
            CommandName::Shell => "shell",
            CommandName::Bash => "bash",
            CommandName::Samples => "samples",
            CommandName::About => "about",
        }
    }
}

impl FromStr for CommandName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "run" => Ok(CommandName::Run),
            "d8" => Ok(CommandName::D8),
            "shell" => Ok(CommandName::Shell),
            "bash" => Ok(CommandName::Bash),
            "samples" => Ok(CommandName::Samples),
            "about" => Ok(CommandName::About),
            _ => Err(format!("Unknown command: {}", s)),
        }
    }
}

impl Cli {
    /// Parses arguments, accepting known command names in any case
    pub fn try_parse_normalized<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
        let cli = Self::try_parse_from(&args)?;

        let name = match &cli.command {
            Some(Command::External(external)) => external.first().cloned(),
            _ => None,
        };
        let Some(name) = name else {
            return Ok(cli);
        };
        let Ok(known) = name.parse::<CommandName>() else {
            return Ok(cli);
        };

        // The captured name is the first argument equal to it after argv[0];
        // only global flags can precede it.
        let mut args = args;
        if let Some(position) = args.iter().skip(1).position(|arg| arg.as_os_str() == name.as_str()) {
            args[position + 1] = OsString::from(known.as_str());
        }
        Self::try_parse_from(&args)
    }

    /// Parses the process arguments, exiting on clap errors
    pub fn parse_normalized() -> Self {
        Self::try_parse_normalized(std::env::args_os()).unwrap_or_else(|err| err.exit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_normalized(std::iter::once("d8-entrypoint").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_command() {
        let cli = parse(&[]);
        assert!(cli.command.is_none());
        assert!(!cli.version);

        let cli = parse(&["--version"]);
        assert!(cli.version);
    }

    #[test]
    fn test_run_args() {
        let cli = parse(&[
            "--debug", "run", "prog.js", "arg1", "arg2", "-f", "a.txt", "-d", "inputs", "-f",
            "b.txt",
        ]);
        assert!(cli.debug);
        let Some(Command::Run(run)) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(run.program, "prog.js");
        assert_eq!(run.args, vec!["arg1", "arg2"]);
        assert_eq!(run.file, vec![PathBuf::from("a.txt"), PathBuf::from("b.txt")]);
        assert_eq!(run.directory, vec![PathBuf::from("inputs")]);
    }

    #[test]
    fn test_run_args_after_separator() {
        let cli = parse(&["run", "prog.js", "-f", "a.txt", "--", "-x", "--flag"]);
        let Some(Command::Run(run)) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(run.args, vec!["-x", "--flag"]);
    }

    #[test]
    fn test_run_requires_program() {
        let args = ["d8-entrypoint", "run"];
        assert!(Cli::try_parse_normalized(args).is_err());
    }

    #[test]
    fn test_passthrough_hyphen_values() {
        let cli = parse(&["bash", "-a", "arg1", "arg2"]);
        let Some(Command::Bash(bash)) = cli.command else {
            panic!("expected bash");
        };
        assert_eq!(bash.args, vec!["-a", "arg1", "arg2"]);

        let cli = parse(&["d8", "--harmony", "script.js"]);
        let Some(Command::D8(d8)) = cli.command else {
            panic!("expected d8");
        };
        assert_eq!(d8.args, vec!["--harmony", "script.js"]);
    }

    #[test]
    fn test_unknown_command_is_external() {
        let cli = parse(&["--debug", "invalid-command", "x"]);
        let Some(Command::External(external)) = cli.command else {
            panic!("expected external");
        };
        assert_eq!(external, vec!["invalid-command", "x"]);
    }

    #[test]
    fn test_command_names_are_case_insensitive() {
        let cli = parse(&["--debug", "ABOUT", "--json"]);
        assert!(matches!(cli.command, Some(Command::About(AboutArgs { json: true }))));

        let cli = parse(&["Samples"]);
        assert!(matches!(cli.command, Some(Command::Samples)));
    }

    #[test]
    fn test_command_name_from_str() {
        assert_eq!("RUN".parse::<CommandName>().unwrap(), CommandName::Run);
        assert_eq!("d8".parse::<CommandName>().unwrap(), CommandName::D8);
        assert!("unknown".parse::<CommandName>().is_err());
        assert_eq!(CommandName::Shell.as_str(), "shell");
    }
}
