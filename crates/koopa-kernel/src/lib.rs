//! koopa-kernel: the engine of the koopa puzzle shell.
//!
//! This crate provides:
//!
//! - **VFS**: An arena tree of directories, text files and executables
//! - **Resolver**: koopa's path rules, where `.` is the parent and `..` stays put
//! - **Loader**: Classifies JSON world documents into a [`WorldSpec`]
//! - **Vault**: The per-world AES-256-GCM key and subtree unlocking
//! - **Tools**: The command trait, registry and the builtin vocabulary
//! - **Kernel**: Runs one line at a time and reports an [`ExecResult`]

pub mod help;
pub mod kernel;
pub mod loader;
pub mod result;
pub mod session;
pub mod tools;
pub mod trigger;
pub mod vault;
pub mod vfs;

pub use kernel::{Kernel, KernelConfig, KernelError};
pub use loader::{EntrySpec, LoadError, WorldSpec, load_world_file, parse_world};
pub use result::{CommandError, ExecResult};
pub use vault::{Vault, VaultError};
