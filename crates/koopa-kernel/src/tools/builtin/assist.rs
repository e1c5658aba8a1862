//! assist: Show the command summary, if asked politely.

use crate::help::HELP_TEXT;
use crate::result::CommandError;
use crate::tools::{ExecContext, ParamSchema, Tool, ToolArgs, ToolResult, ToolSchema};

/// Assist tool: returns the static command summary.
pub struct Assist;

impl Tool for Assist {
    fn name(&self) -> &str {
        "assist"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("assist", "Show the command summary")
            .param(ParamSchema::required("courtesy", "Must include the word please"))
    }

    fn execute(&self, args: &ToolArgs, _ctx: &mut ExecContext<'_>) -> ToolResult {
        let courtesy = args.get(0).unwrap_or_default();
        if courtesy.to_lowercase().contains("please") {
            Ok(HELP_TEXT.to_string())
        } else {
            Err(CommandError::SayPlease)
        }
    }
}
