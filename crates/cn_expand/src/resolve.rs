//! Binding resolution collaborator.
//!
//! Given a declared name, produces the ordered list of expression positions
//! that reference it within the declaring statement list. This is a
//! syntactic collector: member properties and non-computed object keys do
//! not count, property shorthand does. It does not build scopes, but it
//! does notice when the name is declared again somewhere in the list (a
//! parameter, a nested `let`/`const`/`var`, a function or class name) and
//! reports the binding as shadowed so the caller can refuse to substitute
//! through it. The interface matches a full scope resolver
//! (`resolve_binding -> Binding`), so one can be swapped in behind it.

use swc_common::Span;
use swc_ecma_ast::{BindingIdent, ClassDecl, Expr, FnDecl, Ident, Prop};
use swc_ecma_visit::{Visit, VisitWith};

use crate::expand::{span_within, StmtListItem};

pub(crate) struct Binding {
    /// Reference spans in source order.
    pub references: Vec<Span>,
    /// The name is declared again elsewhere in the list, so some of the
    /// collected references may belong to the other declaration.
    pub shadowed: bool,
}

impl Binding {
    pub fn referenced(&self) -> bool {
        !self.references.is_empty()
    }
}

/// Collect every syntactic reference to `name` in `stmts`, excluding the
/// declaration statement itself.
pub(crate) fn resolve_binding<T: StmtListItem>(
    stmts: &[T],
    name: &str,
    decl_span: Span,
) -> Binding {
    let mut collector = RefCollector {
        name,
        decl_span,
        references: Vec::new(),
        shadowed: false,
    };
    for item in stmts {
        item.visit_item(&mut collector);
    }
    Binding {
        references: collector.references,
        shadowed: collector.shadowed,
    }
}

struct RefCollector<'a> {
    name: &'a str,
    decl_span: Span,
    references: Vec<Span>,
    shadowed: bool,
}

impl RefCollector<'_> {
    fn record(&mut self, ident: &Ident) {
        if ident.sym.as_ref() == self.name && !span_within(self.decl_span, ident.span) {
            self.references.push(ident.span);
        }
    }

    fn check_redeclaration(&mut self, ident: &Ident) {
        if ident.sym.as_ref() == self.name && !span_within(self.decl_span, ident.span) {
            self.shadowed = true;
        }
    }
}

impl Visit for RefCollector<'_> {
    fn visit_expr(&mut self, expr: &Expr) {
        if let Expr::Ident(ident) = expr {
            self.record(ident);
            return;
        }
        expr.visit_children_with(self);
    }

    fn visit_prop(&mut self, prop: &Prop) {
        // `{ name }` reads the binding even though no Expr node appears.
        if let Prop::Shorthand(ident) = prop {
            self.record(ident);
            return;
        }
        prop.visit_children_with(self);
    }

    // Binding positions: parameters, nested variable declarators,
    // destructuring elements, catch params.
    fn visit_binding_ident(&mut self, ident: &BindingIdent) {
        self.check_redeclaration(&ident.id);
        ident.visit_children_with(self);
    }

    fn visit_fn_decl(&mut self, decl: &FnDecl) {
        self.check_redeclaration(&decl.ident);
        decl.visit_children_with(self);
    }

    fn visit_class_decl(&mut self, decl: &ClassDecl) {
        self.check_redeclaration(&decl.ident);
        decl.visit_children_with(self);
    }
}
