//! ECMAScript/TypeScript AST for debugstrip.
//!
//! Re-exports the standard SWC AST and adds the pieces shared by every
//! stage of the pipeline:
//! - the `DEBUG` sentinel that marks a debug-only block
//! - [`StripOptions`], the per-pass configuration

pub use swc_ecma_ast::*;

use serde::{Deserialize, Serialize};

/// Name that marks a debug-only block when it is the whole test of an `if`.
///
/// `if (DEBUG) { ... }` is rewritten to `if ("DEBUG") { ... }`, and removed
/// entirely when building for the target environment.
pub const SENTINEL: &str = "DEBUG";

/// Environment targeted when no configuration is given.
pub const DEFAULT_TARGET_ENV: &str = "production";

/// Configuration fixed when the pass is constructed.
///
/// Deserializes from the plugin-options shape `{ "env": "production" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StripOptions {
    /// Environment in which guarded blocks are deleted.
    pub env: String,
}

impl StripOptions {
    pub fn new(env: impl Into<String>) -> Self {
        Self { env: env.into() }
    }

    /// Whether guarded blocks are deleted when building for `current_env`.
    ///
    /// Exact, case-sensitive comparison. Every other value preserves them.
    pub fn removes_in(&self, current_env: &str) -> bool {
        self.env == current_env
    }
}

impl Default for StripOptions {
    fn default() -> Self {
        Self::new(DEFAULT_TARGET_ENV)
    }
}
