//! god: Raise the session's permission level.

use crate::tools::{ExecContext, Tool, ToolArgs, ToolResult, ToolSchema};

/// God tool: unauthenticated, capped privilege bump.
pub struct God;

impl Tool for God {
    fn name(&self) -> &str {
        "god"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("god", "Escalate permissions")
    }

    fn execute(&self, _args: &ToolArgs, ctx: &mut ExecContext<'_>) -> ToolResult {
        let level = ctx.session.escalate(ctx.config.escalation_level);
        tracing::info!(level, "permissions escalated");
        Ok(format!("permission level: {level}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::builtin::testing::Harness;

    #[test]
    fn test_god_raises_once() {
        let mut h = Harness::new("{}");
        assert_eq!(h.run(&God, &[]).out, "permission level: 1");
        assert_eq!(h.run(&God, &[]).out, "permission level: 1");
        assert_eq!(h.session.level(), 1);
    }

    #[test]
    fn test_god_never_lowers() {
        let mut h = Harness::new("{}");
        h.session.escalate(5);
        assert_eq!(h.run(&God, &[]).out, "permission level: 5");
    }

    #[test]
    fn test_god_takes_no_arguments() {
        let mut h = Harness::new("{}");
        let result = h.run(&God, &["now"]);
        assert!(!result.ok());
        assert_eq!(h.session.level(), 0);
    }
}
