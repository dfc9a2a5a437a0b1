//! RewriteProps: rename member properties throughout one block. The
//! directive rides the first leading comment slot of the block's first
//! statement and carries an `old=new` table. Dot access and string-keyed
//! computed access are renamed; dynamic keys and private names are not.

use cn_ast::Directive;
use swc_common::comments::CommentKind;
use swc_common::Spanned;
use swc_ecma_ast::{Expr, Lit, MemberExpr, MemberProp, Stmt};
use swc_ecma_visit::{VisitMut, VisitMutWith};

use crate::expand::Cx;
use crate::{scanner, trivia};

pub(crate) fn expand_block(cx: &mut Cx<'_>, stmts: &mut Vec<Stmt>) {
    let Some(first) = stmts.first() else {
        return;
    };
    let lo = first.span().lo;
    let leading = trivia::leading(cx.comments, lo);
    let Some(comment) = leading.first() else {
        return;
    };
    if comment.kind != CommentKind::Line {
        return;
    }
    let Some(Directive::RewriteProps(renames)) = scanner::parse_directive(comment.text.as_ref())
    else {
        return;
    };
    cx.found("found RewriteProps", comment.span);
    if renames.is_empty() {
        cx.warn("no properties, skipping", comment.span);
        return;
    }

    let mut renamer = PropRenamer { renames: &renames };
    for stmt in stmts.iter_mut() {
        stmt.visit_mut_with(&mut renamer);
    }
    trivia::splice_leading_slot(cx.comments, lo, 0);
}

struct PropRenamer<'a> {
    renames: &'a [(String, String)],
}

impl PropRenamer<'_> {
    fn new_name(&self, old: &str) -> Option<&str> {
        self.renames
            .iter()
            .find(|(from, _)| from == old)
            .map(|(_, to)| to.as_str())
    }
}

impl VisitMut for PropRenamer<'_> {
    fn visit_mut_member_expr(&mut self, member: &mut MemberExpr) {
        member.obj.visit_mut_with(self);
        match &mut member.prop {
            MemberProp::Ident(ident) => {
                if let Some(to) = self.new_name(ident.sym.as_ref()) {
                    ident.sym = to.into();
                }
            }
            MemberProp::Computed(computed) => {
                if let Expr::Lit(Lit::Str(key)) = &mut *computed.expr {
                    if let Some(to) = key.value.as_str().and_then(|v| self.new_name(v)) {
                        key.value = to.into();
                        key.raw = None;
                    }
                } else {
                    computed.expr.visit_mut_with(self);
                }
            }
            MemberProp::PrivateName(_) => {}
        }
    }
}
