//! rd: Read a text file.

use crate::result::CommandError;
use crate::tools::{ExecContext, ParamSchema, Tool, ToolArgs, ToolResult, ToolSchema};

/// Rd tool: print a text file, subject to the session's permission level.
pub struct Rd;

impl Tool for Rd {
    fn name(&self) -> &str {
        "rd"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("rd", "Read a text file")
            .param(ParamSchema::required("path", "File to read"))
    }

    fn execute(&self, args: &ToolArgs, ctx: &mut ExecContext<'_>) -> ToolResult {
        let path = args.get(0).unwrap_or_default();
        let node = ctx
            .locate(path)
            .and_then(|id| ctx.fs.get(id))
            .ok_or(CommandError::NoSuchFile)?;
        let text = node.as_text().ok_or(CommandError::NotATextFile)?;

        if text.permission() > ctx.session.level() {
            tracing::debug!(
                path,
                needed = text.permission(),
                level = ctx.session.level(),
                "read denied"
            );
            return Err(CommandError::PermissionDenied);
        }
        Ok(text.contents().as_display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::builtin::testing::Harness;

    const WORLD: &str = r#"{
        "hello.txt": "hi there",
        "secret.txt": { "permission": 1, "content": "level one" },
        "Documents": { "enc_passwords": "secret123" },
        "DecryptPass.exe": ""
    }"#;

    #[test]
    fn test_rd_plain() {
        let mut h = Harness::new(WORLD);
        let result = h.run(&Rd, &["hello.txt"]);
        assert!(result.ok());
        assert_eq!(result.out, "hi there");
    }

    #[test]
    fn test_rd_missing() {
        let mut h = Harness::new(WORLD);
        let result = h.run(&Rd, &["/nope.txt"]);
        assert!(!result.ok());
        assert_eq!(result.out, "no such file");
    }

    #[test]
    fn test_rd_directory_and_executable() {
        let mut h = Harness::new(WORLD);
        assert_eq!(h.run(&Rd, &["Documents"]).out, "not a text file");
        assert_eq!(h.run(&Rd, &["DecryptPass.exe"]).out, "not a text file");
    }

    #[test]
    fn test_rd_permission_gate() {
        let mut h = Harness::new(WORLD);
        let denied = h.run(&Rd, &["secret.txt"]);
        assert!(!denied.ok());
        assert_eq!(denied.out, "permission denied");

        h.session.escalate(1);
        assert_eq!(h.run(&Rd, &["secret.txt"]).out, "level one");
    }

    #[test]
    fn test_rd_sealed_shows_ciphertext() {
        let mut h = Harness::new(WORLD);
        let result = h.run(&Rd, &["/Documents/enc_passwords"]);
        assert!(result.ok());
        assert_ne!(result.out, "secret123");
        assert!(result.out.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_rd_arity() {
        let mut h = Harness::new(WORLD);
        assert_eq!(
            h.run(&Rd, &[]).out,
            "rd: wrong number of arguments (expected 1, got 0)"
        );
        assert_eq!(
            h.run(&Rd, &["a", "b"]).out,
            "rd: wrong number of arguments (expected 1, got 2)"
        );
    }
}
