//! Debug-block elimination over an SWC module.
//!
//! Transforms:
//! - `if (DEBUG) { ... }`   → `if ("DEBUG") { ... }` (always)
//! - `if ("DEBUG") { ... }` → removed, when the current environment is the
//!   configured target environment
//!
//! Only a sentinel that is the entire test of an `if` is recognised.
//! `if (!DEBUG)`, `if (DEBUG && x)` and every other mention of `DEBUG` are
//! left alone.

pub mod eliminator;
pub mod guard;
pub mod strip;

pub use eliminator::{DebugBlockEliminator, EliminationStats};
pub use guard::{classify_guard, normalize_guard, GuardState};
pub use strip::eliminate_debug_blocks;
