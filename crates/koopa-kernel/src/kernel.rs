//! The Kernel: owns the tree, the session and the key, and runs one line at
//! a time.
//!
//! ```text
//! ┌───────────────────────────────────────────────────────┐
//! │                        Kernel                         │
//! │  ┌──────────────┐  ┌──────────────┐  ┌─────────────┐  │
//! │  │  Filesystem  │  │ ToolRegistry │  │   Session   │  │
//! │  │  (arena)     │  │  (builtins)  │  │ (cwd, lvl)  │  │
//! │  └──────────────┘  └──────────────┘  └─────────────┘  │
//! │  ┌──────────────────────────────┐                     │
//! │  │  Vault (one AES-256-GCM key) │                     │
//! │  └──────────────────────────────┘                     │
//! └───────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::loader::{LoadError, WorldSpec, parse_world};
use crate::result::{CommandError, ExecResult};
use crate::session::Session;
use crate::tools::{ExecContext, ToolArgs, ToolRegistry, ToolSchema, register_builtins};
use crate::trigger::{is_invocation, run_executable};
use crate::vault::{Vault, VaultError};
use crate::vfs::{Filesystem, Node, NodeId, Trigger};

/// Faults in the world itself. Player mistakes never produce these.
#[derive(Debug, Error)]
pub enum KernelError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error("unlock target {0} is missing or not a directory in the world")]
    UnlockTarget(String),
    #[error("vault failure: {0}")]
    Vault(#[from] VaultError),
}

/// Configuration for initializing a kernel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KernelConfig {
    /// Name of this kernel (for identification).
    pub name: String,

    /// Directory unlocked by `DecryptPass.exe`.
    pub vault_path: String,

    /// Directory unlocked by `Findings<N>.exe`; `{n}` is replaced by N.
    pub findings_template: String,

    /// Level granted by `god`.
    pub escalation_level: u32,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            vault_path: "/Documents".to_string(),
            findings_template: "/Findings{n}".to_string(),
            escalation_level: 1,
        }
    }
}

impl KernelConfig {
    /// Create a kernel config with the given name.
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn with_vault_path(mut self, path: impl Into<String>) -> Self {
        self.vault_path = path.into();
        self
    }

    pub fn with_findings_template(mut self, template: impl Into<String>) -> Self {
        self.findings_template = template.into();
        self
    }

    pub fn with_escalation_level(mut self, level: u32) -> Self {
        self.escalation_level = level;
        self
    }

    /// Unlock target for `Findings<n>.exe`.
    pub fn findings_path(&self, n: u32) -> String {
        self.findings_template.replace("{n}", &n.to_string())
    }

    /// Directory a trigger unlocks.
    pub fn unlock_path(&self, trigger: Trigger) -> String {
        match trigger {
            Trigger::DecryptVault => self.vault_path.clone(),
            Trigger::Findings(n) => self.findings_path(n),
        }
    }
}

/// Executes koopa command lines against one world.
pub struct Kernel {
    config: KernelConfig,
    fs: Filesystem,
    session: Session,
    vault: Vault,
    tools: ToolRegistry,
}

impl std::fmt::Debug for Kernel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Kernel")
            .field("name", &self.config.name)
            .field("nodes", &self.fs.len())
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl Kernel {
    /// Build the tree for `world`, sealing its `enc_` files under a fresh key.
    pub fn new(config: KernelConfig, world: &WorldSpec) -> Result<Self, KernelError> {
        let vault = Vault::generate();
        let fs = Filesystem::from_world(world, &vault)?;
        check_unlock_targets(&fs, &config)?;
        let session = Session::new(&fs);

        let mut tools = ToolRegistry::new();
        register_builtins(&mut tools);

        tracing::debug!(name = %config.name, nodes = fs.len(), "kernel ready");
        Ok(Self {
            config,
            fs,
            session,
            vault,
            tools,
        })
    }

    /// Parse a JSON world document and build a kernel for it.
    pub fn from_json(config: KernelConfig, json: &str) -> Result<Self, KernelError> {
        let world = parse_world(json)?;
        Self::new(config, &world)
    }

    /// Run one command line.
    ///
    /// Every player-facing outcome, failures included, is an `Ok` result;
    /// `Err` is reserved for a broken world.
    #[tracing::instrument(level = "info", skip(self), fields(input_len = line.len()))]
    pub fn execute(&mut self, line: &str) -> Result<ExecResult, KernelError> {
        let line = line.trim();
        let result = if line.is_empty() {
            ExecResult::success("")
        } else if is_invocation(line) {
            let mut ctx = ExecContext::new(&mut self.fs, &mut self.session, &self.config);
            run_executable(&mut ctx, &self.vault, line)?
        } else {
            self.dispatch(line)
        };

        self.session.refresh(&self.fs);
        Ok(result.at(self.session.display_path()))
    }

    fn dispatch(&mut self, line: &str) -> ExecResult {
        let mut tokens = line.split_whitespace();
        let command = tokens.next().unwrap_or_default();
        let args = ToolArgs::from_tokens(tokens);

        let Some(tool) = self.tools.get(command) else {
            tracing::debug!(command, "unknown command");
            return ExecResult::failure(&CommandError::CommandNotFound(command.to_string()));
        };
        let mut ctx = ExecContext::new(&mut self.fs, &mut self.session, &self.config);
        tool.run(&args, &mut ctx)
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn config(&self) -> &KernelConfig {
        &self.config
    }

    /// Display path of the current directory.
    pub fn cwd(&self) -> &str {
        self.session.display_path()
    }

    pub fn permission_level(&self) -> u32 {
        self.session.level()
    }

    pub fn filesystem(&self) -> &Filesystem {
        &self.fs
    }

    /// Resolve `path` from the current directory without changing anything.
    pub fn locate(&self, path: &str) -> Option<NodeId> {
        self.fs.locate(path, self.session.cwd())
    }

    /// Schemas of every registered command, sorted by name.
    pub fn tool_schemas(&self) -> Vec<ToolSchema> {
        self.tools.schemas()
    }
}

/// Every executable in a freshly built world must have its unlock directory.
fn check_unlock_targets(fs: &Filesystem, config: &KernelConfig) -> Result<(), KernelError> {
    for (_, node) in fs.iter() {
        let Some(exe) = node.as_executable() else {
            continue;
        };
        let path = config.unlock_path(exe.trigger());
        let present = fs
            .locate(&path, fs.root())
            .and_then(|id| fs.get(id))
            .is_some_and(Node::is_dir);
        if !present {
            tracing::warn!(%path, executable = node.name(), "world has no unlock target");
            return Err(KernelError::UnlockTarget(path));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const WORLD: &str = r#"{
        "Documents": { "enc_passwords": "secret123" },
        "Desktop": { "DecryptPass.exe": "" },
        "classified.txt": { "permission": 1, "content": "eyes only" }
    }"#;

    fn kernel() -> Kernel {
        Kernel::from_json(KernelConfig::named("test"), WORLD).unwrap()
    }

    #[test]
    fn config_defaults() {
        let config = KernelConfig::default();
        assert_eq!(config.vault_path, "/Documents");
        assert_eq!(config.findings_path(3), "/Findings3");
        assert_eq!(config.escalation_level, 1);

        let custom = KernelConfig::named("x")
            .with_findings_template("/Case/{n}/files")
            .with_escalation_level(4);
        assert_eq!(custom.name, "x");
        assert_eq!(custom.findings_path(12), "/Case/12/files");
        assert_eq!(custom.escalation_level, 4);
    }

    #[test]
    fn config_partial_deserialize_uses_defaults() {
        let config: KernelConfig = serde_json::from_str(r#"{ "escalation_level": 2 }"#).unwrap();
        assert_eq!(config.escalation_level, 2);
        assert_eq!(config.vault_path, "/Documents");
    }

    #[test]
    fn empty_line_is_a_no_op() {
        let mut k = kernel();
        let result = k.execute("   ").unwrap();
        assert!(result.ok());
        assert_eq!(result.out, "");
        assert_eq!(result.cwd, "/");
    }

    #[test]
    fn unknown_command() {
        let mut k = kernel();
        let result = k.execute("cd Desktop").unwrap();
        assert!(!result.ok());
        assert_eq!(result.out, "koopa: command not found: cd");
    }

    #[test]
    fn result_carries_location() {
        let mut k = kernel();
        let result = k.execute("trv Desktop").unwrap();
        assert_eq!(result.out, "");
        assert_eq!(result.cwd, "/Desktop");
        assert_eq!(k.cwd(), "/Desktop");
    }

    #[test]
    fn vault_unlock_through_execute() {
        let mut k = kernel();
        assert_eq!(k.execute("../Desktop/DecryptPass.exe").unwrap().out, "success");
        assert_eq!(k.execute("rd Documents/passwords").unwrap().out, "secret123");
    }

    #[test]
    fn god_uses_configured_level() {
        let mut k =
            Kernel::from_json(KernelConfig::default().with_escalation_level(5), WORLD).unwrap();
        assert_eq!(k.execute("god").unwrap().out, "permission level: 5");
        assert_eq!(k.permission_level(), 5);
    }

    #[test]
    fn schemas_cover_builtins() {
        let names: Vec<String> = kernel().tool_schemas().into_iter().map(|s| s.name).collect();
        assert_eq!(names, ["assist", "god", "ls", "rd", "rlc", "trv"]);
    }

    #[test]
    fn bad_world_is_an_error() {
        let err = Kernel::from_json(KernelConfig::default(), r#"{ "x": 1 }"#).unwrap_err();
        assert!(matches!(err, KernelError::Load(LoadError::Unclassifiable { .. })));
    }

    #[test]
    fn world_without_unlock_target_is_rejected() {
        let err = Kernel::from_json(KernelConfig::default(), r#"{ "DecryptPass.exe": "" }"#)
            .unwrap_err();
        assert!(matches!(err, KernelError::UnlockTarget(path) if path == "/Documents"));

        let err = Kernel::from_json(
            KernelConfig::default(),
            r#"{ "d": { "Findings3.exe": "" }, "Findings3": "not a directory" }"#,
        )
        .unwrap_err();
        assert!(matches!(err, KernelError::UnlockTarget(path) if path == "/Findings3"));
    }

    #[test]
    fn unlock_paths_follow_config() {
        let config = KernelConfig::default().with_vault_path("/Safe");
        assert_eq!(config.unlock_path(Trigger::DecryptVault), "/Safe");
        assert_eq!(config.unlock_path(Trigger::Findings(2)), "/Findings2");
    }
}
