//! Session state: where the player is and how much they may read.

use crate::vfs::{Filesystem, NodeId};

/// Current directory (with its display path) plus the permission level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    cwd: NodeId,
    display: String,
    level: u32,
}

impl Session {
    /// Start at the root with level 0.
    pub fn new(fs: &Filesystem) -> Self {
        let root = fs.root();
        Self {
            cwd: root,
            display: fs.display_path(root),
            level: 0,
        }
    }

    pub fn cwd(&self) -> NodeId {
        self.cwd
    }

    /// Absolute path of the current directory, e.g. `/Documents`.
    pub fn display_path(&self) -> &str {
        &self.display
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Make `dir` the current directory.
    pub fn enter(&mut self, fs: &Filesystem, dir: NodeId) {
        self.cwd = dir;
        self.display = fs.display_path(dir);
    }

    /// Step out to `fallback` if the current directory lies inside `removed`.
    ///
    /// Call before `removed` is freed so its parent links can still be walked.
    /// Returns true if the session moved.
    pub fn evacuate(&mut self, fs: &Filesystem, removed: NodeId, fallback: NodeId) -> bool {
        if !fs.is_ancestor_or_self(removed, self.cwd) {
            return false;
        }
        tracing::debug!(to = %fs.display_path(fallback), "current directory removed");
        self.enter(fs, fallback);
        true
    }

    /// Recompute the display path after the tree has moved around us.
    pub fn refresh(&mut self, fs: &Filesystem) {
        self.display = fs.display_path(self.cwd);
    }

    /// Raise the level to at least `to`; never lowers it. Returns the new level.
    pub fn escalate(&mut self, to: u32) -> u32 {
        self.level = self.level.max(to);
        self.level
    }
}
