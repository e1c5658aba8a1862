//! koopa REPL: Interactive host for the koopa puzzle kernel.
//!
//! This REPL provides an interactive interface to the koopa kernel.
//! It handles:
//! - Meta-commands: `/help`, `/quit`, `/cwd`, `/level`, `/tools`
//! - Command execution via the Kernel
//! - The `(koopa) user@host cwd $ ` prompt
//! - Command history via rustyline

pub mod config;

use std::path::PathBuf;

use anyhow::{Context, Result};
use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;

use koopa_kernel::{ExecResult, Kernel, load_world_file};

pub use config::ReplConfig;

/// World used when no `--world` file is given.
pub const DEMO_WORLD: &str = include_str!("../worlds/demo.json");

/// What the host should do after a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Continue with optional output
    Continue(Option<String>),
    /// Exit the REPL (caller should save history and exit)
    Exit,
}

/// REPL state: one kernel plus the prompt identity.
pub struct Repl {
    kernel: Kernel,
    user: String,
    host: String,
}

impl Repl {
    /// Create a REPL on the bundled demo world with default settings.
    pub fn new() -> Result<Self> {
        Self::with_world(&ReplConfig::default(), DEMO_WORLD)
    }

    /// Create a REPL from configuration, loading its world file if one is set.
    pub fn with_config(config: &ReplConfig) -> Result<Self> {
        let Some(path) = &config.world else {
            return Self::with_world(config, DEMO_WORLD);
        };
        let world = load_world_file(path)
            .with_context(|| format!("Failed to load world from {}", path.display()))?;
        let kernel = Kernel::new(config.kernel.clone(), &world).context("Failed to create kernel")?;
        Ok(Self::assemble(config, kernel))
    }

    /// Create a REPL on a JSON world given inline.
    pub fn with_world(config: &ReplConfig, json: &str) -> Result<Self> {
        let kernel =
            Kernel::from_json(config.kernel.clone(), json).context("Failed to create kernel")?;
        Ok(Self::assemble(config, kernel))
    }

    fn assemble(config: &ReplConfig, kernel: Kernel) -> Self {
        Self {
            kernel,
            user: config.user.clone(),
            host: config.host.clone(),
        }
    }

    /// The prompt for the current location.
    pub fn prompt(&self) -> String {
        format!("(koopa) {}@{} {} $ ", self.user, self.host, self.kernel.cwd())
    }

    pub fn kernel(&self) -> &Kernel {
        &self.kernel
    }

    /// Run one koopa command line through the kernel.
    pub fn execute(&mut self, line: &str) -> Result<ExecResult> {
        self.kernel
            .execute(line)
            .with_context(|| format!("world fault while running `{}`", line.trim()))
    }

    /// Process a single line of input.
    ///
    /// Lines starting with `/` are REPL meta-commands; everything else goes to
    /// the kernel. Empty responses produce no output.
    pub fn process_line(&mut self, line: &str) -> Result<Step> {
        let trimmed = line.trim();

        if trimmed.starts_with('/') {
            return Ok(self.handle_meta_command(trimmed));
        }

        let result = self.execute(trimmed)?;
        if result.out.is_empty() {
            Ok(Step::Continue(None))
        } else {
            Ok(Step::Continue(Some(result.out)))
        }
    }

    /// Handle a meta-command (starts with /).
    fn handle_meta_command(&self, cmd: &str) -> Step {
        let command = cmd.split_whitespace().next().unwrap_or("");

        match command {
            "/quit" | "/q" | "/exit" => Step::Exit,
            "/help" | "/h" | "/?" => Step::Continue(Some(HELP_TEXT.to_string())),
            "/cwd" => Step::Continue(Some(self.kernel.cwd().to_string())),
            "/level" => Step::Continue(Some(format!(
                "permission level: {}",
                self.kernel.permission_level()
            ))),
            "/tools" => {
                let schemas = self.kernel.tool_schemas();
                let usage: Vec<_> = schemas.iter().map(|s| s.usage()).collect();
                Step::Continue(Some(usage.join("\n")))
            }
            _ => Step::Continue(Some(format!(
                "Unknown command: {command}\nType /help for REPL commands."
            ))),
        }
    }
}

const HELP_TEXT: &str = r#"koopa REPL

Meta commands:
  /help, /h, /?     Show this help
  /quit, /q         Exit the REPL
  /cwd              Show the current directory
  /level            Show the permission level
  /tools            List command usage

Everything else is a koopa command line. Start with:
  assist please
"#;

/// Save REPL history to disk.
fn save_history(rl: &mut Editor<(), DefaultHistory>, history_path: &Option<PathBuf>) {
    if let Some(path) = history_path {
        if let Some(parent) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                tracing::warn!("Failed to create history directory: {}", e);
            }
        }
        if let Err(e) = rl.save_history(path) {
            tracing::warn!("Failed to save history: {}", e);
        }
    }
}

/// Run the interactive REPL.
pub fn run(config: &ReplConfig) -> Result<()> {
    println!("koopa v{}", env!("CARGO_PKG_VERSION"));
    println!("Type /help for commands, /quit to exit.");

    let mut rl: Editor<(), DefaultHistory> = Editor::new().context("Failed to create editor")?;

    let history_path = directories::BaseDirs::new()
        .map(|b| b.data_dir().join("koopa").join("history.txt"))
        .filter(|_| config.history);
    if let Some(ref path) = history_path {
        if let Err(e) = rl.load_history(path) {
            // Only log if it's not a "file not found" error (expected on first run)
            let is_not_found = matches!(
                &e,
                ReadlineError::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
            );
            if !is_not_found {
                tracing::warn!("Failed to load history: {}", e);
            }
        }
    }

    let mut repl = Repl::with_config(config)?;
    println!();

    loop {
        match rl.readline(&repl.prompt()) {
            Ok(line) => {
                if let Err(e) = rl.add_history_entry(line.as_str()) {
                    tracing::warn!("Failed to add history entry: {}", e);
                }

                match repl.process_line(&line) {
                    Ok(Step::Continue(Some(output))) => println!("{output}"),
                    Ok(Step::Continue(None)) => {}
                    Ok(Step::Exit) => break,
                    Err(e) => eprintln!("Error: {e:#}"),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("^D");
                break;
            }
            Err(err) => {
                eprintln!("Error: {}", err);
                break;
            }
        }
    }

    save_history(&mut rl, &history_path);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_tracks_cwd() {
        let mut repl = Repl::new().unwrap();
        assert_eq!(repl.prompt(), "(koopa) larrypig@larrypig / $ ");
        repl.process_line("trv Desktop").unwrap();
        assert_eq!(repl.prompt(), "(koopa) larrypig@larrypig /Desktop $ ");
    }

    #[test]
    fn meta_commands() {
        let mut repl = Repl::new().unwrap();
        assert_eq!(repl.process_line("/quit").unwrap(), Step::Exit);
        assert_eq!(
            repl.process_line("/cwd").unwrap(),
            Step::Continue(Some("/".to_string()))
        );
        assert_eq!(
            repl.process_line("/level").unwrap(),
            Step::Continue(Some("permission level: 0".to_string()))
        );
        let Step::Continue(Some(unknown)) = repl.process_line("/bogus").unwrap() else {
            panic!("expected output");
        };
        assert!(unknown.starts_with("Unknown command: /bogus"));
    }

    #[test]
    fn tools_lists_usage() {
        let mut repl = Repl::new().unwrap();
        let Step::Continue(Some(out)) = repl.process_line("/tools").unwrap() else {
            panic!("expected output");
        };
        assert!(out.lines().any(|l| l.starts_with("rlc")));
        assert_eq!(out.lines().count(), 6);
    }

    #[test]
    fn empty_output_is_none() {
        let mut repl = Repl::new().unwrap();
        assert_eq!(repl.process_line("").unwrap(), Step::Continue(None));
        assert_eq!(repl.process_line("trv Desktop").unwrap(), Step::Continue(None));
    }

    #[test]
    fn custom_identity() {
        let config = ReplConfig {
            user: "bowser".into(),
            host: "castle".into(),
            ..ReplConfig::default()
        };
        let repl = Repl::with_world(&config, "{}").unwrap();
        assert_eq!(repl.prompt(), "(koopa) bowser@castle / $ ");
    }
}
