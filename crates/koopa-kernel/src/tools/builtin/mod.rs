//! Built-in commands for koopa.
//!
//! These are the whole command vocabulary; executables are invoked through
//! the `./path` form instead and never pass through the registry.

mod assist;
mod god;
mod ls;
mod rd;
mod rlc;
mod trv;

use super::ToolRegistry;

/// Register all built-in tools with the registry.
pub fn register_builtins(registry: &mut ToolRegistry) {
    registry.register(assist::Assist);
    registry.register(god::God);
    registry.register(ls::Ls);
    registry.register(rd::Rd);
    registry.register(rlc::Rlc);
    registry.register(trv::Trv);
}
