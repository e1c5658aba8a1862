//! Virtual filesystem for koopa.
//!
//! A single in-memory tree of directories, text files and executables:
//!
//! ```text
//! /                       # root (unnamed, no parent)
//! ├── Documents/
//! │   └── enc_passwords   # sealed until DecryptPass.exe runs
//! └── Desktop/
//!     └── DecryptPass.exe
//! ```
//!
//! - **node**: the tagged node kinds and naming rules
//! - **tree**: the arena that owns every node and keeps parent back-references
//! - **resolve**: slash-path resolution with koopa's `.`/`..` convention

mod node;
mod resolve;
mod tree;

pub use node::{
    Contents, Directory, EXECUTABLE_SUFFIX, Executable, Node, NodeId, NodeKind, SEALED_PREFIX,
    TextFile, Trigger, is_valid_name,
};
pub use tree::Filesystem;
