//! InlineExp: hoist a marked assignment statement into the next
//! structurally-equal occurrence of one of its operands.
//!
//! `target = value // .InlineExp` searches forward from the end of the
//! assignment for the first subexpression equal to `target` (`Right` hoists
//! by `value` instead), replaces that occurrence with the whole assignment,
//! and deletes the original statement. Searching only positions after the
//! assignment keeps evaluation order intact: the hoisted occurrence is the
//! one the assignment would have fed.

use cn_ast::{needs_parens, Directive, Side};
use swc_common::{BytePos, Span, Spanned, DUMMY_SP};
use swc_ecma_ast::{Expr, ParenExpr, Stmt};
use swc_ecma_visit::{Visit, VisitMut, VisitMutWith, VisitWith};

use crate::equal::{assign_target_expr, nodes_equal};
use crate::expand::{Cx, StmtListItem};
use crate::{scanner, trivia};

pub(crate) fn expand_in_list<T: StmtListItem>(cx: &mut Cx<'_>, stmts: &mut Vec<T>) {
    let mut i = 0;
    while i < stmts.len() {
        if cx.failed() {
            return;
        }
        if !try_expand_at(cx, stmts, i) {
            i += 1;
        }
    }
}

fn try_expand_at<T: StmtListItem>(cx: &mut Cx<'_>, stmts: &mut Vec<T>, i: usize) -> bool {
    let span = stmts[i].span();
    let Some(Stmt::Expr(expr_stmt)) = stmts[i].as_stmt() else {
        return false;
    };
    let Some(m) = scanner::trailing_directive(cx.comments, span) else {
        return false;
    };
    let Directive::InlineExp { side, explicit } = m.directive else {
        return false;
    };
    let label = match (side, explicit) {
        (_, false) => "found InlineExp",
        (Side::Left, true) => "found InlineExp(Left)",
        (Side::Right, true) => "found InlineExp(Right)",
    };
    cx.found(label, Span::new(span.lo, m.comment_span.hi));

    let Expr::Assign(assign) = &*expr_stmt.expr else {
        cx.warn("expected an assignment, skipping", span);
        return false;
    };
    let inline = match side {
        Side::Left => match assign_target_expr(&assign.left) {
            Some(expr) => expr,
            None => {
                cx.warn("expected a simple assignment target, skipping", span);
                return false;
            }
        },
        Side::Right => (*assign.right).clone(),
    };
    let search_from = assign.span.hi;
    let replacement = (*expr_stmt.expr).clone();

    let mut finder = MatchFinder {
        inline: &inline,
        from: search_from,
        found: None,
        error: None,
    };
    for item in stmts.iter() {
        item.visit_item(&mut finder);
        if finder.found.is_some() || finder.error.is_some() {
            break;
        }
    }
    if let Some(error) = finder.error {
        cx.fail(error);
        return false;
    }
    let Some(target) = finder.found else {
        cx.warn("not referenced, skipping", span);
        return false;
    };

    let mut replacer = ReplaceAt {
        target,
        from: search_from,
        replacement: &replacement,
        // An explicit side marks use in comma or argument position, where
        // the parentheses must appear even around kinds that would not
        // normally need them.
        wrap: explicit || needs_parens(&replacement),
        done: false,
    };
    for item in stmts.iter_mut() {
        item.visit_mut_item(&mut replacer);
        if replacer.done {
            break;
        }
    }

    let next_lo = stmts.get(i + 1).map(|s| s.span().lo);
    trivia::remove_stmt_trivia(cx.comments, span, m.key, m.slot, next_lo);
    stmts.remove(i);
    true
}

/// Phase one: find the first node in source order, at or after `from`, that
/// is structurally equal to `inline`. Runs over an immutable view so the
/// search can never race the mutation it decides.
struct MatchFinder<'a> {
    inline: &'a Expr,
    from: BytePos,
    found: Option<Span>,
    error: Option<anyhow::Error>,
}

impl Visit for MatchFinder<'_> {
    fn visit_expr(&mut self, expr: &Expr) {
        if self.found.is_some() || self.error.is_some() {
            return;
        }
        if expr.span().lo >= self.from {
            match nodes_equal(expr, self.inline) {
                Ok(true) => {
                    self.found = Some(expr.span());
                    return;
                }
                Ok(false) => {}
                Err(error) => {
                    self.error = Some(error);
                    return;
                }
            }
        }
        expr.visit_children_with(self);
    }
}

/// Phase two: swap the found node for the assignment clone.
struct ReplaceAt<'a> {
    target: Span,
    from: BytePos,
    replacement: &'a Expr,
    wrap: bool,
    done: bool,
}

impl ReplaceAt<'_> {
    fn is_target(&self, expr: &Expr) -> bool {
        let span = expr.span();
        span == self.target && span.lo >= self.from
    }

    fn wrapped(&self, parenthesized: bool) -> Expr {
        if self.wrap && !parenthesized {
            Expr::Paren(ParenExpr {
                span: DUMMY_SP,
                expr: Box::new(self.replacement.clone()),
            })
        } else {
            self.replacement.clone()
        }
    }
}

impl VisitMut for ReplaceAt<'_> {
    fn visit_mut_expr(&mut self, expr: &mut Expr) {
        if self.done {
            return;
        }
        if let Expr::Paren(paren) = expr {
            if self.is_target(&paren.expr) {
                *paren.expr = self.wrapped(true);
                self.done = true;
                return;
            }
        }
        if self.is_target(expr) {
            *expr = self.wrapped(false);
            self.done = true;
            return;
        }
        expr.visit_mut_children_with(self);
    }
}
