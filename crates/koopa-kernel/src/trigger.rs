//! Executable invocation: `./path [password]` and `../path [password]`.
//!
//! The whole first token is the path, resolved like any other, so `../X.exe`
//! runs `X.exe` from the current directory and `./X.exe` from the previous one.
//! What an executable does is fixed by its [`Trigger`] when the world is built.

use crate::kernel::KernelError;
use crate::result::{CommandError, ExecResult};
use crate::tools::{ExecContext, ToolResult};
use crate::vault::{Vault, decrypt_subtree};
use crate::vfs::{Filesystem, Node, NodeId, Trigger};

/// True if `line` uses the executable-invocation shape.
pub fn is_invocation(line: &str) -> bool {
    line.starts_with("./") || line.starts_with("../")
}

/// Resolve, authorize and fire the executable named by `line`.
///
/// Recoverable failures, including an unlock target the player moved away,
/// come back as a failed [`ExecResult`]. Only a vault fault is `Err`.
pub(crate) fn run_executable(
    ctx: &mut ExecContext<'_>,
    vault: &Vault,
    line: &str,
) -> Result<ExecResult, KernelError> {
    let mut tokens = line.split_whitespace();
    let invocation = tokens.next().unwrap_or_default();
    let extra: Vec<&str> = tokens.collect();

    let (id, trigger) = match authorize(ctx, invocation, &extra) {
        Ok(found) => found,
        Err(err) => return Ok(ExecResult::failure(&err)),
    };
    tracing::debug!(invocation, ?trigger, "firing executable");
    Ok(ExecResult::from(fire(ctx, vault, id, trigger)?))
}

fn authorize(
    ctx: &ExecContext<'_>,
    invocation: &str,
    extra: &[&str],
) -> Result<(NodeId, Trigger), CommandError> {
    let id = ctx.locate(invocation).ok_or(CommandError::FileNotFound)?;
    let exe = ctx
        .fs
        .get(id)
        .and_then(Node::as_executable)
        .ok_or(CommandError::NotExecutable)?;
    if extra.len() > 1 {
        return Err(CommandError::TooManyArguments);
    }
    if let Some(expected) = exe.password() {
        if extra.first().copied() != Some(expected) {
            return Err(CommandError::WrongPassword {
                invocation: invocation.to_string(),
            });
        }
    }
    Ok((id, exe.trigger()))
}

fn fire(
    ctx: &mut ExecContext<'_>,
    vault: &Vault,
    exe: NodeId,
    trigger: Trigger,
) -> Result<ToolResult, KernelError> {
    match trigger {
        Trigger::DecryptVault => {
            let path = ctx.config.unlock_path(trigger);
            let target = match unlock_target(ctx.fs, &path) {
                Ok(target) => target,
                Err(err) => return Ok(Err(err)),
            };
            let unlocked = unlock(ctx, target, vault)?;
            tracing::info!(%path, unlocked, "vault decrypted");
            Ok(Ok("success".to_string()))
        }
        Trigger::Findings(n) => {
            let dependency = format!("findings{n}.txt");
            let Some(dep) = find_dependency(ctx.fs, exe, &dependency) else {
                return Ok(Err(CommandError::MissingDependency(dependency)));
            };
            let path = ctx.config.unlock_path(trigger);
            let target = match unlock_target(ctx.fs, &path) {
                Ok(target) => target,
                Err(err) => return Ok(Err(err)),
            };

            ctx.fs.remove(dep);
            let unlocked = unlock(ctx, target, vault)?;
            ctx.fs.remove(exe);
            tracing::info!(%path, unlocked, "findings decrypted");
            Ok(Ok("success".to_string()))
        }
    }
}

/// Decrypt below `target`, then free whatever the unsealed names displaced.
///
/// A displaced directory may hold the current directory; the session steps
/// out to the directory the displacement happened in before it is freed.
fn unlock(
    ctx: &mut ExecContext<'_>,
    target: NodeId,
    vault: &Vault,
) -> Result<usize, KernelError> {
    let unsealed = decrypt_subtree(ctx.fs, target, vault)?;
    for displaced in unsealed.displaced {
        if let Some(parent) = ctx.fs.parent(displaced) {
            ctx.session.evacuate(ctx.fs, displaced, parent);
        }
        ctx.fs.discard(displaced);
    }
    Ok(unsealed.count)
}

/// A plaintext `name` beside `exe` in the same directory.
fn find_dependency(fs: &Filesystem, exe: NodeId, name: &str) -> Option<NodeId> {
    let dir = fs.parent(exe)?;
    let dep = fs.lookup(dir, name)?;
    let text = fs.get(dep)?.as_text()?;
    (!text.contents().is_sealed()).then_some(dep)
}

/// The directory at `path`, if the player has not moved or replaced it.
fn unlock_target(fs: &Filesystem, path: &str) -> Result<NodeId, CommandError> {
    fs.locate(path, fs.root())
        .filter(|&id| fs.directory(id).is_some())
        .ok_or_else(|| {
            tracing::debug!(path, "unlock target gone");
            CommandError::UnlockTargetNotFound(path.to_string())
        })
}
