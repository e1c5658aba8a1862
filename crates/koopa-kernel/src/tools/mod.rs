//! Command tools for koopa.
//!
//! Every mnemonic the interpreter understands is a [`Tool`]. The kernel looks
//! the first token up in the [`ToolRegistry`], checks the argument count
//! against the tool's schema, then hands it an [`ExecContext`].
//!
//! ```text
//! ToolRegistry
//! ├── rd      read a text file
//! ├── assist  command summary (ask nicely)
//! ├── trv     change directory
//! ├── rlc     move a node
//! ├── god     raise permission level
//! └── ls      list a directory
//! ```

pub(crate) mod builtin;
mod context;
mod registry;
mod traits;

pub use builtin::register_builtins;
pub use context::ExecContext;
pub use registry::ToolRegistry;
pub use traits::{ParamSchema, Tool, ToolArgs, ToolResult, ToolSchema, validate_arity};
