//! ls: List directory contents.

use crate::result::CommandError;
use crate::tools::{ExecContext, ParamSchema, Tool, ToolArgs, ToolResult, ToolSchema};

/// Separator between listed names.
const SEPARATOR: &str = "  ";

/// Ls tool: names of a directory's direct children.
pub struct Ls;

impl Tool for Ls {
    fn name(&self) -> &str {
        "ls"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("ls", "List directory contents")
            .param(ParamSchema::optional("path", "Directory to list (default: current)"))
    }

    fn execute(&self, args: &ToolArgs, ctx: &mut ExecContext<'_>) -> ToolResult {
        let dir = match args.get(0) {
            Some(path) => ctx.locate(path).ok_or(CommandError::FileNotFound)?,
            None => ctx.session.cwd(),
        };
        let dir = ctx.fs.directory(dir).ok_or(CommandError::NotADirectory)?;
        Ok(dir.names().collect::<Vec<_>>().join(SEPARATOR))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::builtin::testing::Harness;

    const WORLD: &str = r#"{
        "Desktop": { "notes.txt": "n", "DecryptPass.exe": "" },
        "Documents": { "enc_passwords": "p" },
        "readme.txt": "r",
        "Empty": {}
    }"#;

    fn names(out: &str) -> Vec<&str> {
        let mut names: Vec<_> = out.split(SEPARATOR).filter(|s| !s.is_empty()).collect();
        names.sort();
        names
    }

    #[test]
    fn test_ls_cwd() {
        let mut h = Harness::new(WORLD);
        let result = h.run(&Ls, &[]);
        assert!(result.ok());
        assert_eq!(names(&result.out), ["Desktop", "Documents", "Empty", "readme.txt"]);
    }

    #[test]
    fn test_ls_path() {
        let mut h = Harness::new(WORLD);
        let result = h.run(&Ls, &["/Desktop"]);
        assert_eq!(names(&result.out), ["DecryptPass.exe", "notes.txt"]);
    }

    #[test]
    fn test_ls_follows_cwd() {
        let mut h = Harness::new(WORLD);
        h.cd("/Documents");
        assert_eq!(h.run(&Ls, &[]).out, "enc_passwords");
        // `.` is the previous directory
        assert_eq!(names(&h.run(&Ls, &["."]).out).len(), 4);
    }

    #[test]
    fn test_ls_empty_dir() {
        let mut h = Harness::new(WORLD);
        let result = h.run(&Ls, &["Empty"]);
        assert!(result.ok());
        assert_eq!(result.out, "");
    }

    #[test]
    fn test_ls_errors() {
        let mut h = Harness::new(WORLD);
        assert_eq!(h.run(&Ls, &["/nope"]).out, "file not found");
        assert_eq!(h.run(&Ls, &["readme.txt"]).out, "not a directory");
        assert_eq!(
            h.run(&Ls, &["a", "b"]).out,
            "ls: wrong number of arguments (expected 0 to 1, got 2)"
        );
    }
}
