use clap::{CommandFactory, Parser};

const AFTER_HELP: &str = "\
Commands:
  default         Restore the stock banner from ./images/DefaultSplashScreen.png
  edit            Apply ./images/EditedSplashBanner.png
  edit <PATH>     Apply the image at PATH
  admin           Grant the Users group full control over the banner
                  (asks for elevation first and exits with code 1829)

Every argument counts toward the command, switches included: `default --no-log`
is two words and does nothing, and `edit --no-log` applies a file named
`--no-log`. Any unrecognised combination is silently ignored and exits with
status 0.";

/// Replace the EasiNote splash banner
///
/// Only rendered for `--help` and `--version`; the command words are matched
/// literally on the raw argument list.
#[derive(Parser, Debug)]
#[command(name = "splashedit")]
#[command(author = "Aquc")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Replaces the EasiNote splash banner image", long_about = None)]
#[command(after_help = AFTER_HELP)]
#[allow(dead_code)]
pub struct Args {
    /// Command words: `default`, `edit`, `edit <PATH>` or `admin`
    #[arg(value_name = "COMMAND", trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,

    /// Do not log to the console (the daily log file is still written)
    #[arg(long = "no-log")]
    pub no_log: bool,

    /// Debug-level console logging
    #[arg(long = "verbose")]
    pub verbose: bool,
}

/// What the process was asked to do
#[derive(Debug, PartialEq)]
pub enum Request {
    Help,
    Version,
    Run(Invocation),
}

/// Raw arguments plus the logging switches found among them
#[derive(Debug, PartialEq)]
pub struct Invocation {
    pub args: Vec<String>,
    pub no_log: bool,
    pub verbose: bool,
}

impl Invocation {
    /// Switches are looked up in the raw list and left in place, so they
    /// still count toward the command's arguments.
    pub fn from_raw(args: Vec<String>) -> Self {
        let no_log = args.iter().any(|a| a == "--no-log");
        let verbose = args.iter().any(|a| a == "--verbose");
        Self {
            args,
            no_log,
            verbose,
        }
    }
}

/// Parses command-line arguments
pub fn parse_args() -> Request {
    let raw = std::env::args_os()
        .skip(1)
        .map(|a| a.to_string_lossy().into_owned())
        .collect();
    classify(raw)
}

fn classify(raw: Vec<String>) -> Request {
    match raw.as_slice() {
        [only] if only == "-h" || only == "--help" => Request::Help,
        [only] if only == "-V" || only == "--version" => Request::Version,
        _ => Request::Run(Invocation::from_raw(raw)),
    }
}

pub fn print_help() -> std::io::Result<()> {
    Args::command().print_help()
}

pub fn print_version() {
    print!("{}", Args::command().render_version());
}
