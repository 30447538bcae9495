//! The [`DebugBlockEliminator`] visitor.

use ds_ast::{self as ast, StripOptions};
use swc_common::{Span, Spanned};
use swc_ecma_visit::{VisitMut, VisitMutWith};

use crate::guard::{classify_guard, normalize_guard, GuardState};

/// Counters collected over one run of the eliminator.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EliminationStats {
    /// Bare `DEBUG` guards rewritten to `"DEBUG"`.
    pub normalized: usize,
    /// Guarded statements removed.
    pub eliminated: usize,
    /// Guarded statements left standing with a literal guard.
    pub preserved: usize,
}

/// Visitor that normalizes `DEBUG` guards and removes guarded statements
/// when the current environment is the target environment.
///
/// Guards are handled before the visitor descends into a statement, so a
/// removed statement is never visited. Labels in front of a guarded `if` go
/// with it. Where the removed statement sat:
/// - in a statement list: it is dropped from the list
/// - in the `else` slot of another `if`: the `else` branch is dropped
/// - in any other single-statement body: it becomes `{}`
pub struct DebugBlockEliminator {
    options: StripOptions,
    current_env: String,
    stats: EliminationStats,
}

impl DebugBlockEliminator {
    pub fn new(options: StripOptions, current_env: impl Into<String>) -> Self {
        Self {
            options,
            current_env: current_env.into(),
            stats: EliminationStats::default(),
        }
    }

    pub fn stats(&self) -> EliminationStats {
        self.stats
    }

    /// Whether this run deletes guarded statements at all.
    pub fn removes_guarded_blocks(&self) -> bool {
        self.options.removes_in(&self.current_env)
    }

    /// Whether `stmt` is a guarded `if` (possibly labeled) with a literal
    /// guard that this run deletes.
    pub fn is_eliminated(&self, stmt: &ast::Stmt) -> bool {
        self.removes_guarded_blocks()
            && guarded_if(stmt)
                .is_some_and(|if_stmt| classify_guard(&if_stmt.test) == Some(GuardState::Literal))
    }

    /// Normalize the guard of `stmt`, if it has one, and decide its fate.
    ///
    /// Returns `true` if the caller must detach `stmt`.
    fn settle(&mut self, stmt: &mut ast::Stmt) -> bool {
        let Some(if_stmt) = guarded_if_mut(stmt) else {
            return false;
        };

        if normalize_guard(if_stmt) {
            self.stats.normalized += 1;
            log::debug!("normalized DEBUG guard at {:?}", if_stmt.test.span());
        }

        if classify_guard(&if_stmt.test) != Some(GuardState::Literal) {
            return false;
        }

        if self.is_eliminated(stmt) {
            self.stats.eliminated += 1;
            log::debug!(
                "removing DEBUG block at {:?} (env {:?})",
                stmt.span(),
                self.current_env
            );
            true
        } else {
            self.stats.preserved += 1;
            false
        }
    }
}

impl VisitMut for DebugBlockEliminator {
    fn visit_mut_module_items(&mut self, items: &mut Vec<ast::ModuleItem>) {
        items.retain_mut(|item| match item {
            ast::ModuleItem::Stmt(stmt) => {
                if self.settle(stmt) {
                    return false;
                }
                stmt.visit_mut_children_with(self);
                true
            }
            ast::ModuleItem::ModuleDecl(decl) => {
                decl.visit_mut_with(self);
                true
            }
        });
    }

    fn visit_mut_stmts(&mut self, stmts: &mut Vec<ast::Stmt>) {
        stmts.retain_mut(|stmt| {
            if self.settle(stmt) {
                return false;
            }
            stmt.visit_mut_children_with(self);
            true
        });
    }

    // Statement lists are handled above, so this only sees single-statement
    // bodies: `if` consequents, loop bodies and `with` bodies.
    fn visit_mut_stmt(&mut self, stmt: &mut ast::Stmt) {
        if self.settle(stmt) {
            *stmt = empty_block(stmt.span());
            return;
        }
        stmt.visit_mut_children_with(self);
    }

    // The body's guard was settled together with the label.
    fn visit_mut_labeled_stmt(&mut self, node: &mut ast::LabeledStmt) {
        (*node.body).visit_mut_children_with(self);
    }

    fn visit_mut_if_stmt(&mut self, node: &mut ast::IfStmt) {
        node.test.visit_mut_with(self);
        node.cons.visit_mut_with(self);

        let Some(alt) = node.alt.as_mut() else {
            return;
        };
        if self.settle(alt) {
            node.alt = None;
        } else {
            (**alt).visit_mut_children_with(self);
        }
    }
}

/// The `if` statement `stmt` is, looking through any labels.
fn guarded_if(stmt: &ast::Stmt) -> Option<&ast::IfStmt> {
    match stmt {
        ast::Stmt::If(if_stmt) => Some(if_stmt),
        ast::Stmt::Labeled(labeled) => guarded_if(&labeled.body),
        _ => None,
    }
}

fn guarded_if_mut(stmt: &mut ast::Stmt) -> Option<&mut ast::IfStmt> {
    match stmt {
        ast::Stmt::If(if_stmt) => Some(if_stmt),
        ast::Stmt::Labeled(labeled) => guarded_if_mut(&mut labeled.body),
        _ => None,
    }
}

fn empty_block(span: Span) -> ast::Stmt {
    ast::Stmt::Block(ast::BlockStmt {
        span,
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ds_parser::{emit_module, parse_source};

    fn run(source: &str, filename: &str, current_env: &str) -> (String, EliminationStats) {
        let mut parsed = parse_source(source, filename).unwrap();
        let mut eliminator = DebugBlockEliminator::new(StripOptions::new("production"), current_env);
        parsed.module.visit_mut_with(&mut eliminator);
        let code = emit_module(&parsed.module, &parsed.source_map, false)
            .unwrap()
            .code;
        (code, eliminator.stats())
    }

    fn strip(source: &str, current_env: &str) -> String {
        run(source, "input.js", current_env).0
    }

    /// Print `source` the way the emitter would, so comparisons ignore formatting.
    fn normalized(source: &str) -> String {
        let parsed = parse_source(source, "expected.js").unwrap();
        emit_module(&parsed.module, &parsed.source_map, false)
            .unwrap()
            .code
    }

    const GUARDED: &str = "console.log(\"kept\");\nif (DEBUG) { const a = 1; }\n";

    #[test]
    fn preserves_block_outside_target_env() {
        let (code, stats) = run(GUARDED, "input.js", "development");
        assert_eq!(
            code,
            normalized("console.log(\"kept\");\nif (\"DEBUG\") { const a = 1; }\n")
        );
        assert_eq!(
            stats,
            EliminationStats {
                normalized: 1,
                eliminated: 0,
                preserved: 1,
            }
        );
    }

    #[test]
    fn removes_block_in_target_env() {
        let (code, stats) = run(GUARDED, "input.js", "production");
        assert_eq!(code, normalized("console.log(\"kept\");"));
        assert!(!code.contains("DEBUG"));
        assert!(!code.contains("const a"));
        assert_eq!(
            stats,
            EliminationStats {
                normalized: 1,
                eliminated: 1,
                preserved: 0,
            }
        );
    }

    #[test]
    fn literal_guard_in_source_is_removed() {
        let source = "if (\"DEBUG\") { a(); }\nif ('DEBUG') { b(); }\nc();";
        assert_eq!(strip(source, "production"), normalized("c();"));
        assert_eq!(strip(source, "development"), normalized(source));
    }

    #[test]
    fn empty_current_env_never_matches() {
        let (_, stats) = run(GUARDED, "input.js", "");
        assert_eq!(stats.eliminated, 0);
        assert_eq!(stats.preserved, 1);
    }

    #[test]
    fn other_uses_of_the_name_are_untouched() {
        let source = r#"
            const DEBUG = x;
            if (other) { DEBUG; }
            foo(DEBUG);
            let s = "DEBUG";
            while (DEBUG) { step(); }
            const y = DEBUG ? 1 : 2;
        "#;
        for env in ["production", "development"] {
            let (code, stats) = run(source, "input.js", env);
            assert_eq!(code, normalized(source), "env {env}");
            assert_eq!(stats, EliminationStats::default());
        }
    }

    #[test]
    fn compound_guards_are_untouched() {
        let source = r#"
            if (!DEBUG) { a(); }
            if (DEBUG && x) { b(); }
            if ((DEBUG || x)) { c(); }
            if ("DEBUG" === mode) { d(); }
        "#;
        for env in ["production", "development"] {
            assert_eq!(strip(source, env), normalized(source), "env {env}");
        }
    }

    #[test]
    fn parenthesized_bare_guard() {
        let source = "if ((DEBUG)) { a(); }";
        assert_eq!(
            strip(source, "development"),
            normalized("if (\"DEBUG\") { a(); }")
        );
        assert_eq!(strip(source, "production"), normalized(""));
    }

    #[test]
    fn removes_nested_blocks() {
        let source = r#"
            function f() {
                if (DEBUG) { log("enter"); }
                return () => {
                    if (DEBUG) { log("inner"); }
                    return 1;
                };
            }
        "#;
        let expected = r#"
            function f() {
                return () => {
                    return 1;
                };
            }
        "#;
        assert_eq!(strip(source, "production"), normalized(expected));
    }

    #[test]
    fn guard_inside_guarded_block() {
        let source = "if (DEBUG) { if (DEBUG) { a(); } }";
        let (code, stats) = run(source, "input.js", "development");
        assert_eq!(
            code,
            normalized("if (\"DEBUG\") { if (\"DEBUG\") { a(); } }")
        );
        assert_eq!(stats.normalized, 2);
        assert_eq!(stats.preserved, 2);

        // The outer block goes first, its contents are never visited.
        let (code, stats) = run(source, "input.js", "production");
        assert_eq!(code, normalized(""));
        assert_eq!(
            stats,
            EliminationStats {
                normalized: 1,
                eliminated: 1,
                preserved: 0,
            }
        );
    }

    #[test]
    fn else_branch_is_removed_with_guard() {
        let source = "if (DEBUG) { a(); } else { b(); }\nc();";
        assert_eq!(strip(source, "production"), normalized("c();"));
    }

    #[test]
    fn guarded_else_if_is_dropped() {
        let source = "if (x) { a(); } else if (DEBUG) { b(); } else { c(); }";
        assert_eq!(strip(source, "production"), normalized("if (x) { a(); }"));
        assert_eq!(
            strip(source, "development"),
            normalized("if (x) { a(); } else if (\"DEBUG\") { b(); } else { c(); }")
        );
    }

    #[test]
    fn single_statement_bodies_become_empty_blocks() {
        let source = r#"
            if (x) if (DEBUG) a();
            while (y) if (DEBUG) b();
            for (const k of ks) if (DEBUG) c(k);
            if (w) outer: if (DEBUG) d();
        "#;
        let expected = r#"
            if (x) {}
            while (y) {}
            for (const k of ks) {}
            if (w) {}
        "#;
        assert_eq!(strip(source, "production"), normalized(expected));
    }

    #[test]
    fn labeled_guard_is_removed_with_its_label() {
        let source = "a();\nouter: if (DEBUG) { d(); }\nb();";
        let (code, stats) = run(source, "input.js", "production");
        assert_eq!(code, normalized("a();\nb();"));
        assert_eq!(stats.eliminated, 1);

        let source = "function f() { x: y: if (DEBUG) { d(); } return 1; }";
        assert_eq!(
            strip(source, "production"),
            normalized("function f() { return 1; }")
        );
    }

    #[test]
    fn labeled_guard_is_counted_once_when_kept() {
        let source = "outer: if (DEBUG) { d(); }";
        let (code, stats) = run(source, "input.js", "development");
        assert_eq!(code, normalized("outer: if (\"DEBUG\") { d(); }"));
        assert_eq!(
            stats,
            EliminationStats {
                normalized: 1,
                eliminated: 0,
                preserved: 1,
            }
        );
    }

    #[test]
    fn is_eliminated_looks_through_labels() {
        let parsed = parse_source("l: if (\"DEBUG\") {}\nif (DEBUG) {}\nif (x) {}", "input.js").unwrap();
        let stmts: Vec<&ast::Stmt> = parsed
            .module
            .body
            .iter()
            .filter_map(|item| match item {
                ast::ModuleItem::Stmt(stmt) => Some(stmt),
                ast::ModuleItem::ModuleDecl(_) => None,
            })
            .collect();

        let production = DebugBlockEliminator::new(StripOptions::new("production"), "production");
        assert!(production.is_eliminated(stmts[0]));
        // Bare guards are normalized before the decision is made.
        assert!(!production.is_eliminated(stmts[1]));
        assert!(!production.is_eliminated(stmts[2]));

        let development = DebugBlockEliminator::new(StripOptions::new("production"), "development");
        assert!(!development.is_eliminated(stmts[0]));
    }

    #[test]
    fn switch_case_statements() {
        let source = "switch (x) { case 1: if (DEBUG) { a(); } break; default: b(); }";
        assert_eq!(
            strip(source, "production"),
            normalized("switch (x) { case 1: break; default: b(); }")
        );
    }

    #[test]
    fn exported_declarations_are_visited() {
        let source = "export function f() { if (DEBUG) { a(); } return 1; }";
        assert_eq!(
            strip(source, "production"),
            normalized("export function f() { return 1; }")
        );
    }

    #[test]
    fn typescript_input() {
        let source = "namespace N { if (DEBUG) { const a: number = 1; } }\nexport const b: string = \"x\";";
        let (code, stats) = run(source, "input.ts", "production");
        assert_eq!(stats.eliminated, 1);
        assert!(!code.contains("DEBUG"));
        assert!(code.contains("export const b: string"));
    }

    #[test]
    fn unrelated_statements_keep_their_order() {
        let source = "a();\nif (DEBUG) { x(); }\nb();\nif (DEBUG) { y(); }\nc();";
        assert_eq!(strip(source, "production"), normalized("a();\nb();\nc();"));
    }

    #[test]
    fn second_run_is_a_no_op() {
        for env in ["production", "development"] {
            let once = strip(GUARDED, env);
            let twice = strip(&once, env);
            assert_eq!(once, twice, "env {env}");
        }
    }
}
