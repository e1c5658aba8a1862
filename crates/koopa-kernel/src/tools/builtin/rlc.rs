//! rlc: Relocate a node into another directory.

use crate::result::CommandError;
use crate::tools::{ExecContext, ParamSchema, Tool, ToolArgs, ToolResult, ToolSchema};

/// Rlc tool: move a file or directory, keeping its name.
///
/// Arguments are destination first, then source. A same-named entry already
/// in the destination is overwritten.
///
/// Unlike a plain unlink-and-insert, moving the root or moving a directory
/// into itself or one of its descendants is refused: either would leave the
/// tree with a cycle that path display and unlocking could never walk out of.
pub struct Rlc;

impl Tool for Rlc {
    fn name(&self) -> &str {
        "rlc"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("rlc", "Relocate a file or directory")
            .param(ParamSchema::required("dest", "Destination directory"))
            .param(ParamSchema::required("src", "Node to move"))
    }

    fn execute(&self, args: &ToolArgs, ctx: &mut ExecContext<'_>) -> ToolResult {
        let dest_path = args.get(0).unwrap_or_default();
        let src_path = args.get(1).unwrap_or_default();

        let dest = ctx.locate(dest_path).ok_or(CommandError::DestinationNotFound)?;
        if ctx.fs.directory(dest).is_none() {
            return Err(CommandError::DestinationNotADirectory);
        }
        let src = ctx.locate(src_path).ok_or(CommandError::SourceNotFound)?;
        if src == ctx.fs.root() {
            return Err(CommandError::RelocateRoot);
        }
        if ctx.fs.is_ancestor_or_self(src, dest) {
            return Err(CommandError::RelocateIntoSelf);
        }

        if let Some(displaced) = ctx.fs.relocate(src, dest) {
            ctx.session.evacuate(ctx.fs, displaced, dest);
            ctx.fs.discard(displaced);
        }
        ctx.session.refresh(ctx.fs);

        tracing::info!(src = src_path, dest = dest_path, "relocated");
        Ok("success".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::builtin::testing::Harness;
    use crate::vfs::Contents;

    const WORLD: &str = r#"{
        "Desktop": { "findings1.txt": "raw", "Findings1.exe": "" },
        "Archive": { "old": { "deep.txt": "d" } },
        "Trash": { "findings1.txt": "stale" },
        "note.txt": "n"
    }"#;

    #[test]
    fn test_rlc_file() {
        let mut h = Harness::new(WORLD);
        let note = h.node("/note.txt").unwrap();
        let result = h.run(&Rlc, &["/Desktop", "/note.txt"]);
        assert!(result.ok());
        assert_eq!(result.out, "success");

        assert!(h.node("/note.txt").is_none());
        assert_eq!(h.node("/Desktop/note.txt"), Some(note));
        assert_eq!(h.fs.parent(note), h.node("/Desktop"));
    }

    #[test]
    fn test_rlc_directory_keeps_subtree() {
        let mut h = Harness::new(WORLD);
        assert!(h.run(&Rlc, &["/Desktop", "/Archive/old"]).ok());
        assert!(h.node("/Archive/old").is_none());
        assert!(h.node("/Desktop/old/deep.txt").is_some());
    }

    #[test]
    fn test_rlc_overwrites_same_name() {
        let mut h = Harness::new(WORLD);
        let stale = h.node("/Trash/findings1.txt").unwrap();
        assert!(h.run(&Rlc, &["/Trash", "/Desktop/findings1.txt"]).ok());

        assert!(h.fs.get(stale).is_none());
        let moved = h.node("/Trash/findings1.txt").unwrap();
        let text = h.fs.get(moved).unwrap().as_text().unwrap();
        assert_eq!(text.contents(), &Contents::Plain("raw".into()));
    }

    #[test]
    fn test_rlc_moves_cwd_with_subtree() {
        let mut h = Harness::new(WORLD);
        h.cd("/Archive/old");
        assert!(h.run(&Rlc, &["/Desktop", "/Archive/old"]).ok());
        assert_eq!(h.session.display_path(), "/Desktop/old");
        assert_eq!(h.node("/Desktop/old"), Some(h.session.cwd()));
    }

    #[test]
    fn test_rlc_overwriting_cwd_moves_session_to_dest() {
        let mut h = Harness::new(r#"{ "a": { "x": "file" }, "b": { "x": {} } }"#);
        h.cd("/b/x");
        assert!(h.run(&Rlc, &["/b", "/a/x"]).ok());
        assert_eq!(h.session.display_path(), "/b");
        assert_eq!(h.node("/b"), Some(h.session.cwd()));
    }

    #[test]
    fn test_rlc_errors() {
        let mut h = Harness::new(WORLD);
        assert_eq!(h.run(&Rlc, &["/nope", "/note.txt"]).out, "destination not found");
        assert_eq!(
            h.run(&Rlc, &["/note.txt", "/Desktop"]).out,
            "destination must be a directory"
        );
        assert_eq!(h.run(&Rlc, &["/Desktop", "/nope"]).out, "source not found");
        assert_eq!(h.run(&Rlc, &["/Desktop", "/"]).out, "cannot relocate the root directory");
        assert_eq!(
            h.run(&Rlc, &["/Archive/old", "/Archive"]).out,
            "cannot relocate a directory into itself"
        );
        assert_eq!(
            h.run(&Rlc, &["/Archive", "/Archive"]).out,
            "cannot relocate a directory into itself"
        );
        assert_eq!(
            h.run(&Rlc, &["/Desktop"]).out,
            "rlc: wrong number of arguments (expected 2, got 1)"
        );
        // Nothing moved
        assert!(h.node("/note.txt").is_some());
        assert!(h.node("/Archive/old/deep.txt").is_some());
    }
}
