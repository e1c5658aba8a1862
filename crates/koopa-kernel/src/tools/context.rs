//! Execution context for tools.

use crate::kernel::KernelConfig;
use crate::session::Session;
use crate::vfs::{Filesystem, NodeId};

/// Mutable view of kernel state handed to a tool for one command.
pub struct ExecContext<'a> {
    /// The filesystem tree.
    pub fs: &'a mut Filesystem,
    /// Current directory and permission level.
    pub session: &'a mut Session,
    /// Kernel configuration.
    pub config: &'a KernelConfig,
}

impl<'a> ExecContext<'a> {
    pub fn new(fs: &'a mut Filesystem, session: &'a mut Session, config: &'a KernelConfig) -> Self {
        Self {
            fs,
            session,
            config,
        }
    }

    /// Resolve `path` against the current directory.
    pub fn locate(&self, path: &str) -> Option<NodeId> {
        self.fs.locate(path, self.session.cwd())
    }
}
