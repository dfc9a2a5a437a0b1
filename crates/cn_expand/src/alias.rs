//! Alias and Inline: collapse a single-declarator `const` into its
//! initializer at every reference site, then remove the declaration.
//!
//! `.Alias` is a pure rename (the initializer must itself be a name) with no
//! reference-count gate; `.Inline(N)` accepts any initializer but rewrites
//! only when the binding has exactly N references. An initializer with side
//! effects is cloned into every site; the directive author owns that risk.

use cn_ast::{needs_parens, Directive};
use swc_common::{Span, DUMMY_SP};
use swc_ecma_ast::{
    Decl, Expr, IdentName, KeyValueProp, ParenExpr, Pat, Prop, PropName, Stmt, VarDeclKind,
};
use swc_ecma_visit::{VisitMut, VisitMutWith};

use crate::expand::{Cx, StmtListItem};
use crate::{resolve, scanner, trivia};

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

/// Returns true when the statement at `i` was rewritten away; the caller
/// must then revisit index `i`, which now holds the next statement.
fn try_expand_at<T: StmtListItem>(cx: &mut Cx<'_>, stmts: &mut Vec<T>, i: usize) -> bool {
    let span = stmts[i].span();
    let Some(Stmt::Decl(Decl::Var(var))) = stmts[i].as_stmt() else {
        return false;
    };
    let Some(m) = scanner::trailing_directive(cx.comments, span) else {
        return false;
    };
    let count = match m.directive {
        Directive::Alias if cx.macros.alias => None,
        Directive::Inline(n) if cx.macros.inline => Some(n),
        _ => return false,
    };
    // The reported span runs from the declaration through its directive.
    let report = Span::new(span.lo, m.comment_span.hi);
    match count {
        None => cx.found("found Alias", report),
        Some(n) => cx.found(format!("found Inline({n})"), report),
    }

    if var.kind != VarDeclKind::Const {
        cx.warn("expected a const declaration, skipping", span);
        return false;
    }
    if var.decls.len() != 1 {
        cx.warn("expected a single declarator, skipping", span);
        return false;
    }
    let declarator = &var.decls[0];
    let Pat::Ident(binding_ident) = &declarator.name else {
        cx.warn("expected an identifier declarator, skipping", span);
        return false;
    };
    let Some(init) = declarator.init.as_deref() else {
        cx.warn("expected an initializer, skipping", span);
        return false;
    };
    if count.is_none() && !matches!(init, Expr::Ident(_)) {
        cx.warn("alias initializer must be a name, skipping", span);
        return false;
    }

    let name = binding_ident.id.sym.to_string();
    let binding = resolve::resolve_binding(stmts, &name, span);
    if binding.shadowed {
        cx.warn("shadowed by a nested declaration, skipping", span);
        return false;
    }
    if !binding.referenced() {
        cx.warn("not referenced, skipping", span);
        return false;
    }
    if let Some(n) = count {
        let got = binding.references.len();
        if got != n as usize {
            cx.warn(
                format!("want {n} references, got {got} instead, skipping"),
                span,
            );
            return false;
        }
    }

    let init = init.clone();
    let mut replacer = ReplaceRefs {
        name: &name,
        init: &init,
        wrap: needs_parens(&init),
    };
    for (j, item) in stmts.iter_mut().enumerate() {
        if j != i {
            item.visit_mut_item(&mut replacer);
        }
    }

    let next_lo = stmts.get(i + 1).map(|s| s.span().lo);
    trivia::remove_stmt_trivia(cx.comments, span, m.key, m.slot, next_lo);
    stmts.remove(i);
    true
}

/// Replaces every reference identifier with a clone of the initializer,
/// parenthesizing where the initializer would bind looser than its new
/// context and the site is not already parenthesized.
struct ReplaceRefs<'a> {
    name: &'a str,
    init: &'a Expr,
    wrap: bool,
}

impl ReplaceRefs<'_> {
    fn is_ref(&self, expr: &Expr) -> bool {
        matches!(expr, Expr::Ident(ident) if ident.sym.as_ref() == self.name)
    }

    fn replacement(&self, parenthesized: bool) -> Expr {
        if self.wrap && !parenthesized {
            Expr::Paren(ParenExpr {
                span: DUMMY_SP,
                expr: Box::new(self.init.clone()),
            })
        } else {
            self.init.clone()
        }
    }
}

impl VisitMut for ReplaceRefs<'_> {
    fn visit_mut_expr(&mut self, expr: &mut Expr) {
        if let Expr::Paren(paren) = expr {
            if self.is_ref(&paren.expr) {
                *paren.expr = self.replacement(true);
                return;
            }
        }
        if self.is_ref(expr) {
            *expr = self.replacement(false);
            return;
        }
        expr.visit_mut_children_with(self);
    }

    fn visit_mut_prop(&mut self, prop: &mut Prop) {
        // Shorthand `{ name }` becomes `{ name: init }`.
        if let Prop::Shorthand(ident) = prop {
            if ident.sym.as_ref() == self.name {
                *prop = Prop::KeyValue(KeyValueProp {
                    key: PropName::Ident(IdentName {
                        span: ident.span,
                        sym: ident.sym.clone(),
                    }),
                    value: Box::new(self.replacement(false)),
                });
                return;
            }
        }
        prop.visit_mut_children_with(self);
    }
}
