use clap::{ArgGroup, Parser};

#[derive(Parser, Debug, Clone)]
#[command(name = "tio", about = "Run code on tio.run from the terminal", version)]
#[command(group(ArgGroup::new("source").args(["code", "file", "json"]).multiple(false)))]
#[command(group(ArgGroup::new("listing").args(["list_languages", "examples"]).multiple(false)))]
pub struct Cli {
    /// The code to run. Reads stdin when omitted and stdin is piped.
    #[arg(value_name = "CODE")]
    pub code: Option<String>,

    /// Language id, e.g. python3 (see --list-languages).
    #[arg(short = 'l', long)]
    pub language: Option<String>,

    /// Read the code from a file instead of the command line.
    #[arg(short = 'f', long)]
    pub file: Option<String>,

    /// Text fed to the program's standard input.
    #[arg(short = 'i', long)]
    pub input: Option<String>,

    /// Compiler flag. Can be used multiple times: --flag -O2 --flag -Wall
    #[arg(long = "flag", action = clap::ArgAction::Append)]
    pub flags: Vec<String>,

    /// Interpreter/compiler command-line option (repeatable).
    #[arg(long = "option", action = clap::ArgAction::Append)]
    pub options: Vec<String>,

    /// Driver argument (repeatable).
    #[arg(long = "driver", action = clap::ArgAction::Append)]
    pub driver: Vec<String>,

    /// Argument passed to the program (repeatable).
    #[arg(short = 'a', long = "arg", action = clap::ArgAction::Append)]
    pub args: Vec<String>,

    /// Time to wait for the result, in milliseconds. 0 submits the request
    /// without waiting for its output.
    #[arg(short = 't', long)]
    pub timeout: Option<u64>,

    /// Read the full option set from a JSON object file; use '-' for stdin.
    #[arg(long)]
    pub json: Option<String>,

    /// Print the debug and warnings sections too.
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// List every language id the service knows.
    #[arg(long = "list-languages", visible_alias = "ll")]
    pub list_languages: bool,

    /// Show the catalog examples for a language id.
    #[arg(long)]
    pub examples: Option<String>,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }
}
