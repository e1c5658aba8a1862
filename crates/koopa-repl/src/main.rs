//! koopa CLI entry point.
//!
//! Usage:
//!   koopa                        # Interactive REPL on the demo world
//!   koopa --world <file>         # Interactive REPL on a JSON world
//!   koopa -c <line>              # Execute one line and exit

use std::env;
use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use koopa_repl::{Repl, ReplConfig};

fn main() -> ExitCode {
    // Initialize tracing (respects RUST_LOG env var)
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:?}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    let mut config = ReplConfig::load()?;
    let mut command: Option<String> = None;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" => {
                print_help();
                return Ok(ExitCode::SUCCESS);
            }

            "--version" | "-V" => {
                println!("koopa {}", env!("CARGO_PKG_VERSION"));
                return Ok(ExitCode::SUCCESS);
            }

            "-c" => {
                let line = args.next().context("-c requires a command argument")?;
                command = Some(line);
            }

            "--world" => {
                let path = args.next().context("--world requires a file path")?;
                config = config.with_world(path);
            }

            _ if arg.starts_with("--world=") => {
                config = config.with_world(&arg["--world=".len()..]);
            }

            unknown => {
                eprintln!("Unknown option: {unknown}");
                eprintln!("Run 'koopa --help' for usage.");
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    match command {
        Some(line) => run_command(&config, &line),
        None => {
            koopa_repl::run(&config)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn print_help() {
    println!(
        r#"koopa v{}

Usage:
  koopa                        Interactive REPL
  koopa -c <line>              Execute one command line and exit

Options:
  -c <line>                    Execute a command line and exit
  --world <file>               Load a JSON world instead of the demo
  -h, --help                   Show this help
  -V, --version                Show version

Configuration is read from the koopa config directory (repl.toml).

Examples:
  koopa                        # Play the demo world
  koopa -c 'ls /Desktop'       # List the demo desktop
  koopa --world level2.json    # Play another world
"#,
        env!("CARGO_PKG_VERSION")
    );
}

/// Execute a command line and exit.
fn run_command(config: &ReplConfig, line: &str) -> Result<ExitCode> {
    let mut repl = Repl::with_config(config)?;
    let result = repl.execute(line)?;

    if !result.out.is_empty() {
        println!("{}", result.out);
    }

    if result.ok() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(u8::try_from(result.code).unwrap_or(1)))
    }
}
