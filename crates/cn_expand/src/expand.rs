//! The driving walk: one top-down traversal per file, applying directive
//! families in a fixed order (Alias, Inline, InlineExp, then per block
//! DeadCode and RewriteProps). Rewrites mutate statement lists during the
//! walk, so each pass re-reads the list instead of holding iterators
//! across mutations.

use anyhow::{Error, Result};
use cn_ast::{Diagnostics, MacroSet};
use swc_common::{comments::SingleThreadedComments, Span, Spanned};
use swc_ecma_ast::{Module, ModuleItem, Stmt};
use swc_ecma_visit::{Visit, VisitMut, VisitMutWith, VisitWith};

use crate::{alias, dead_code, inline_exp, rewrite_props};

/// Shared state for one file's expansion.
pub(crate) struct Cx<'a> {
    pub comments: &'a SingleThreadedComments,
    pub macros: &'a MacroSet,
    pub diagnostics: Diagnostics,
    pub error: Option<Error>,
}

impl Cx<'_> {
    pub fn found(&mut self, message: impl Into<String>, span: Span) {
        self.diagnostics.found(message, span);
    }

    pub fn warn(&mut self, message: impl Into<String>, span: Span) {
        self.diagnostics.warning(message, span);
    }

    /// Record a fatal error; the first one wins and stops the file's walk.
    pub fn fail(&mut self, error: Error) {
        if self.error.is_none() {
            self.error = Some(error);
        }
    }

    pub fn failed(&self) -> bool {
        self.error.is_some()
    }
}

/// Element of a statement list. Plain statements participate in directive
/// recognition; module declarations are opaque to recognition but still
/// traversed, so references inside exported functions are rewritten.
pub(crate) trait StmtListItem: Spanned {
    fn as_stmt(&self) -> Option<&Stmt>;
    fn visit_item<V: Visit>(&self, visitor: &mut V);
    fn visit_mut_item<V: VisitMut>(&mut self, visitor: &mut V);
}

impl StmtListItem for Stmt {
    fn as_stmt(&self) -> Option<&Stmt> {
        Some(self)
    }

    fn visit_item<V: Visit>(&self, visitor: &mut V) {
        self.visit_with(visitor);
    }

    fn visit_mut_item<V: VisitMut>(&mut self, visitor: &mut V) {
        self.visit_mut_with(visitor);
    }
}

impl StmtListItem for ModuleItem {
    fn as_stmt(&self) -> Option<&Stmt> {
        match self {
            ModuleItem::Stmt(stmt) => Some(stmt),
            ModuleItem::ModuleDecl(_) => None,
        }
    }

    fn visit_item<V: Visit>(&self, visitor: &mut V) {
        self.visit_with(visitor);
    }

    fn visit_mut_item<V: VisitMut>(&mut self, visitor: &mut V) {
        self.visit_mut_with(visitor);
    }
}

pub(crate) fn span_within(outer: Span, inner: Span) -> bool {
    outer.lo <= inner.lo && inner.hi <= outer.hi
}

struct Expander<'a> {
    cx: Cx<'a>,
}

impl Expander<'_> {
    fn expand_list<T: StmtListItem>(&mut self, stmts: &mut Vec<T>) {
        if self.cx.macros.alias || self.cx.macros.inline {
            alias::expand_in_list(&mut self.cx, stmts);
        }
        if self.cx.failed() {
            return;
        }
        if self.cx.macros.inline_exp {
            inline_exp::expand_in_list(&mut self.cx, stmts);
        }
    }
}

impl VisitMut for Expander<'_> {
    fn visit_mut_module_items(&mut self, items: &mut Vec<ModuleItem>) {
        if self.cx.failed() {
            return;
        }
        self.expand_list(items);
        items.visit_mut_children_with(self);
    }

    fn visit_mut_stmts(&mut self, stmts: &mut Vec<Stmt>) {
        if self.cx.failed() {
            return;
        }
        self.expand_list(stmts);
        if !self.cx.failed() && self.cx.macros.dead_code {
            dead_code::expand_block(&mut self.cx, stmts);
        }
        if !self.cx.failed() && self.cx.macros.rewrite_props {
            rewrite_props::expand_block(&mut self.cx, stmts);
        }
        stmts.visit_mut_children_with(self);
    }
}

/// Expand every enabled directive in `module`, splicing consumed trivia out
/// of `comments` as it goes.
///
/// Returns the ordered diagnostic stream for the file. The only error is an
/// unsupported node kind inside a structural-equality comparison, which
/// aborts the file rather than risk a silently wrong rewrite; every other
/// problem is a warning diagnostic and the offending node is left untouched.
pub fn expand_module(
    module: &mut Module,
    comments: &SingleThreadedComments,
    macros: &MacroSet,
) -> Result<Diagnostics> {
    let mut expander = Expander {
        cx: Cx {
            comments,
            macros,
            diagnostics: Diagnostics::default(),
            error: None,
        },
    };
    module.visit_mut_with(&mut expander);
    match expander.cx.error {
        Some(error) => Err(error),
        None => Ok(expander.cx.diagnostics),
    }
}
