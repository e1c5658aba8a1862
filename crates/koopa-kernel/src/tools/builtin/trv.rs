//! trv: Change the current directory.

use crate::result::CommandError;
use crate::tools::{ExecContext, ParamSchema, Tool, ToolArgs, ToolResult, ToolSchema};

/// Trv tool: move the session into a directory.
pub struct Trv;

impl Tool for Trv {
    fn name(&self) -> &str {
        "trv"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("trv", "Change the current directory")
            .param(ParamSchema::required("path", "Directory to enter (. = previous, .. = current)"))
    }

    fn execute(&self, args: &ToolArgs, ctx: &mut ExecContext<'_>) -> ToolResult {
        let path = args.get(0).unwrap_or_default();
        let dir = ctx.locate(path).ok_or(CommandError::FileNotFound)?;
        let is_dir = ctx.fs.get(dir).is_some_and(|node| node.is_dir());
        if !is_dir {
            return Err(CommandError::CannotTraverse);
        }

        ctx.session.enter(ctx.fs, dir);
        tracing::debug!(cwd = %ctx.session.display_path(), "traversed");
        Ok(String::new())
    }
}
