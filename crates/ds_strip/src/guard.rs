//! Recognition and normalization of `DEBUG` guards.
//!
//! A guard is the test slot of an `if` statement. It is a debug guard when
//! the slot holds the sentinel itself, either as a bare name or as a string
//! literal. Nested occurrences (`!DEBUG`, `DEBUG && x`, `f(DEBUG)`) are not.

use ds_ast::{self as ast, SENTINEL};
use swc_common::{Span, Spanned};

/// Where a debug guard is in its lifecycle.
///
/// `Bare` guards become `Literal` through [`normalize_guard`]; `Literal`
/// guards are either removed with their statement or left standing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    /// `if (DEBUG)`: a reference to an undeclared name.
    Bare,
    /// `if ("DEBUG")`: the recognised marker.
    Literal,
}

/// Classify the test slot of an `if` statement.
///
/// Parentheses directly around the sentinel are transparent, so
/// `if ((DEBUG))` is a bare guard. Parentheses around anything else are not.
pub fn classify_guard(test: &ast::Expr) -> Option<GuardState> {
    match test {
        ast::Expr::Ident(ident) if &*ident.sym == SENTINEL => Some(GuardState::Bare),
        ast::Expr::Lit(ast::Lit::Str(s)) if is_sentinel_str(s) => Some(GuardState::Literal),
        ast::Expr::Paren(paren) => classify_guard(&paren.expr),
        _ => None,
    }
}

/// Rewrite a bare `DEBUG` test into the `"DEBUG"` string literal.
///
/// Returns `true` if the test slot was replaced. The literal keeps the span
/// of the replaced expression.
pub fn normalize_guard(if_stmt: &mut ast::IfStmt) -> bool {
    if classify_guard(&if_stmt.test) != Some(GuardState::Bare) {
        return false;
    }

    let span = if_stmt.test.span();
    *if_stmt.test = ast::Expr::Lit(ast::Lit::Str(sentinel_str(span)));
    true
}

fn sentinel_str(span: Span) -> ast::Str {
    ast::Str {
        span,
        value: SENTINEL.into(),
        raw: None,
    }
}

fn is_sentinel_str(s: &ast::Str) -> bool {
    atom_is(&s.value, SENTINEL)
}

/// Compare an interned string against `text` through its own atom type.
fn atom_is<A>(atom: &A, text: &str) -> bool
where
    A: PartialEq + for<'a> From<&'a str>,
{
    *atom == A::from(text)
}
