//! Top-level elimination entry point.

use ds_ast::{self as ast, StripOptions};
use swc_ecma_visit::VisitMutWith;

use crate::eliminator::DebugBlockEliminator;

/// Run the debug-block eliminator over a whole module.
///
/// `current_env` is the environment being built for. Guarded blocks are
/// removed only when it equals `options.env`.
pub fn eliminate_debug_blocks(
    mut module: ast::Module,
    options: &StripOptions,
    current_env: &str,
) -> ast::Module {
    let mut eliminator = DebugBlockEliminator::new(options.clone(), current_env);
    module.visit_mut_with(&mut eliminator);

    let stats = eliminator.stats();
    log::info!(
        "DEBUG guards: {} normalized, {} removed, {} kept (target {:?}, current {:?})",
        stats.normalized,
        stats.eliminated,
        stats.preserved,
        options.env,
        current_env
    );

    module
}
