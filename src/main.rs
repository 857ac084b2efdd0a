mod cli;

use std::fs;
use std::io::{self, Read};
use std::time::Duration;

use anyhow::{bail, Result};
use is_terminal::IsTerminal;
use owo_colors::OwoColorize;

use tio::config::Config;
use tio::{Client, EvaluateOptions, Status};

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();
    let cfg = Config::load();
    let client = Client::from_config(&cfg)?;

    if args.list_languages {
        for language in client.languages().await? {
            println!("{}\t{}", language.id, language.name);
        }
        return Ok(());
    }

    if let Some(id) = &args.examples {
        let languages = client.languages().await?;
        let Some(language) = languages.iter().find(|l| l.id == *id) else {
            bail!("unknown language: {}", id);
        };
        if language.examples.is_empty() {
            println!("no examples for {}", id);
            return Ok(());
        }
        for example in &language.examples {
            println!("{} {}", "# expected:".green(), example.expected);
            println!("{}\n", example.options.code);
        }
        return Ok(());
    }

    // Resolve options: --json wins, otherwise flags plus code from the
    // positional argument, --file, or piped stdin.
    let options = if let Some(path) = &args.json {
        let raw = if path == "-" {
            read_stdin()?
        } else {
            fs::read_to_string(path)?
        };
        let value: serde_json::Value = serde_json::from_str(&raw)?;
        EvaluateOptions::from_value(&value)?
    } else {
        let code = if let Some(path) = &args.file {
            fs::read_to_string(path)?
        } else if let Some(code) = args.code.clone() {
            code
        } else if !io::stdin().is_terminal() {
            read_stdin()?
        } else {
            bail!("no code given; pass CODE, --file, --json, or pipe stdin");
        };

        EvaluateOptions {
            language: args.language.clone().unwrap_or_default(),
            code,
            input: args.input.clone(),
            flags: none_if_empty(args.flags.clone()),
            options: none_if_empty(args.options.clone()),
            driver: none_if_empty(args.driver.clone()),
            args: none_if_empty(args.args.clone()),
        }
    };

    let timeout = Duration::from_millis(args.timeout.unwrap_or_else(|| cfg.default_timeout_ms()));
    let result = client.evaluate_with_timeout(&options, timeout).await?;

    match result.status {
        Status::Passed => {
            println!("{}", result.output);
            if args.verbose {
                if let Some(debug) = result.debug.filter(|s| !s.is_empty()) {
                    eprintln!("{}\n{}", "debug:".cyan(), debug);
                }
                if let Some(warnings) = result.warnings.filter(|s| !s.is_empty()) {
                    eprintln!("{}\n{}", "warnings:".yellow(), warnings);
                }
            }
        }
        Status::TimedOut => {
            eprintln!("{}", result.output.red());
            std::process::exit(1);
        }
    }
    Ok(())
}

fn read_stdin() -> Result<String> {
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn none_if_empty(values: Vec<String>) -> Option<Vec<String>> {
    if values.is_empty() {
        None
    } else {
        Some(values)
    }
}
