//! Structural equality: syntax-only comparison of expression subtrees,
//! ignoring formatting and position.

use anyhow::{bail, Result};
use swc_ecma_ast::{AssignTarget, Expr, Lit, MemberExpr, MemberProp, SimpleAssignTarget};

/// Compare two expressions by structure alone.
///
/// Supported kinds: identifiers (by name), numeric and string literals (by
/// value), member accesses (object and property, recursively), and `this`.
/// Nodes of different kinds are unequal. Nodes of an equal but unsupported
/// kind abort the file: incomplete coverage here must not silently report
/// a wrong answer.
pub(crate) fn nodes_equal(a: &Expr, b: &Expr) -> Result<bool> {
    match (a, b) {
        (Expr::Ident(a), Expr::Ident(b)) => Ok(a.sym == b.sym),
        (Expr::This(_), Expr::This(_)) => Ok(true),
        (Expr::Lit(a), Expr::Lit(b)) => lits_equal(a, b),
        (Expr::Member(a), Expr::Member(b)) => members_equal(a, b),
        (a, b) if std::mem::discriminant(a) == std::mem::discriminant(b) => {
            bail!(
                "structural equality is not implemented for {} expressions",
                kind_name(a)
            )
        }
        _ => Ok(false),
    }
}

fn lits_equal(a: &Lit, b: &Lit) -> Result<bool> {
    match (a, b) {
        (Lit::Num(a), Lit::Num(b)) => Ok(a.value == b.value),
        (Lit::Str(a), Lit::Str(b)) => Ok(a.value == b.value),
        (a, b) if std::mem::discriminant(a) == std::mem::discriminant(b) => {
            bail!(
                "structural equality is not implemented for {} literals",
                lit_kind_name(a)
            )
        }
        _ => Ok(false),
    }
}

fn members_equal(a: &MemberExpr, b: &MemberExpr) -> Result<bool> {
    if !nodes_equal(&a.obj, &b.obj)? {
        return Ok(false);
    }
    match (&a.prop, &b.prop) {
        (MemberProp::Ident(a), MemberProp::Ident(b)) => Ok(a.sym == b.sym),
        (MemberProp::PrivateName(a), MemberProp::PrivateName(b)) => Ok(a.name == b.name),
        (MemberProp::Computed(a), MemberProp::Computed(b)) => nodes_equal(&a.expr, &b.expr),
        _ => Ok(false),
    }
}

/// View an assignment target as a plain expression, when it is one.
pub(crate) fn assign_target_expr(target: &AssignTarget) -> Option<Expr> {
    match target {
        AssignTarget::Simple(SimpleAssignTarget::Ident(ident)) => {
            Some(Expr::Ident(ident.id.clone()))
        }
        AssignTarget::Simple(SimpleAssignTarget::Member(member)) => {
            Some(Expr::Member(member.clone()))
        }
        _ => None,
    }
}

fn kind_name(e: &Expr) -> &'static str {
    match e {
        Expr::This(_) => "this",
        Expr::Array(_) => "array",
        Expr::Object(_) => "object",
        Expr::Fn(_) => "function",
        Expr::Unary(_) => "unary",
        Expr::Update(_) => "update",
        Expr::Bin(_) => "binary",
        Expr::Assign(_) => "assignment",
        Expr::Member(_) => "member",
        Expr::SuperProp(_) => "super member",
        Expr::Cond(_) => "conditional",
        Expr::Call(_) => "call",
        Expr::New(_) => "new",
        Expr::Seq(_) => "sequence",
        Expr::Ident(_) => "identifier",
        Expr::Lit(_) => "literal",
        Expr::Tpl(_) => "template",
        Expr::TaggedTpl(_) => "tagged template",
        Expr::Arrow(_) => "arrow function",
        Expr::Class(_) => "class",
        Expr::Yield(_) => "yield",
        Expr::Await(_) => "await",
        Expr::Paren(_) => "parenthesized",
        Expr::OptChain(_) => "optional chain",
        _ => "unsupported",
    }
}

fn lit_kind_name(l: &Lit) -> &'static str {
    match l {
        Lit::Str(_) => "string",
        Lit::Bool(_) => "boolean",
        Lit::Null(_) => "null",
        Lit::Num(_) => "numeric",
        Lit::BigInt(_) => "bigint",
        Lit::Regex(_) => "regex",
        Lit::JSXText(_) => "JSX text",
    }
}
