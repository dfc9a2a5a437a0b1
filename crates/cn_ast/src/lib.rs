//! Shared AST surface for condense.
//!
//! Re-exports the standard SWC AST and adds the types the macro engine and
//! the CLI exchange:
//! - [`Directive`] — a parsed comment directive
//! - [`MacroSet`] — feature flags controlling which directives are active
//! - [`Diagnostics`] — the ordered found/warning sink returned per file
//! - [`needs_parens`] — the parenthesization rule for substituted expressions

pub use swc_ecma_ast::*;

use serde::{Deserialize, Serialize};
use swc_common::Span;

/// Which operand of a marked assignment an `InlineExp` directive hoists.
///
/// The bare `// .InlineExp` form defaults to [`Side::Left`], matching the
/// left-to-right reading of `target = value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

/// A directive recognized from a single line comment.
///
/// Always derived from exactly one comment; never constructed independently
/// of its source trivia.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Directive {
    /// `// .Alias` — collapse a const name binding into its initializer at
    /// every reference site, any reference count.
    Alias,
    /// `// .Inline` or `// .Inline(N)` — same rewrite, gated on exactly N
    /// references (N defaults to 1).
    Inline(u32),
    /// `// .InlineExp`, `// .InlineExp(Left)`, `// .InlineExp(Right)` —
    /// hoist an assignment statement into its next occurrence.
    /// `explicit` records whether a side was spelled out, which forces
    /// parenthesization of the hoisted expression.
    InlineExp { side: Side, explicit: bool },
    /// `// .RewriteProps(old=new, …)` — ordered property rename table.
    RewriteProps(Vec<(String, String)>),
    /// `// .DeadCode` — start of a removable statement range.
    DeadCodeStart,
    /// `// .End(DeadCode)` — end of a removable statement range.
    DeadCodeEnd,
}

/// Feature flags controlling which directive families are expanded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroSet {
    pub alias: bool,
    pub inline: bool,
    pub inline_exp: bool,
    pub rewrite_props: bool,
    pub dead_code: bool,
}

impl Default for MacroSet {
    fn default() -> Self {
        Self {
            alias: true,
            inline: true,
            inline_exp: true,
            rewrite_props: true,
            dead_code: true,
        }
    }
}

impl MacroSet {
    /// A set with every directive family disabled.
    pub fn none() -> Self {
        Self {
            alias: false,
            inline: false,
            inline_exp: false,
            rewrite_props: false,
            dead_code: false,
        }
    }

    /// Enable one family by its directive name (`"alias"`, `"inline"`,
    /// `"inlineexp"`, `"rewriteprops"`, `"deadcode"`; case-insensitive).
    pub fn enable(&mut self, name: &str) -> bool {
        match name.to_ascii_lowercase().as_str() {
            "alias" => self.alias = true,
            "inline" => self.inline = true,
            "inlineexp" | "inline_exp" => self.inline_exp = true,
            "rewriteprops" | "rewrite_props" => self.rewrite_props = true,
            "deadcode" | "dead_code" => self.dead_code = true,
            _ => return false,
        }
        true
    }
}

/// Severity of a diagnostic record. Nothing here ever aborts a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    /// A directive was recognized and acted upon.
    Found,
    /// A directive was recognized but skipped (precondition unmet).
    Warning,
}

/// One found/skip record with the source span it refers to.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub span: Span,
}

/// Ordered diagnostic sink for one file's expansion.
///
/// The engine appends records in processing order; presentation (color,
/// streams, locations) belongs to the caller.
#[derive(Debug, Default)]
pub struct Diagnostics {
    records: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn found(&mut self, message: impl Into<String>, span: Span) {
        self.records.push(Diagnostic {
            severity: Severity::Found,
            message: message.into(),
            span,
        });
    }

    pub fn warning(&mut self, message: impl Into<String>, span: Span) {
        self.records.push(Diagnostic {
            severity: Severity::Warning,
            message: message.into(),
            span,
        });
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.records.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Number of records with [`Severity::Found`].
    pub fn found_count(&self) -> usize {
        self.records
            .iter()
            .filter(|d| d.severity == Severity::Found)
            .count()
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

/// Whether `expr` must be parenthesized when substituted into an arbitrary
/// expression position.
///
/// Identifiers, calls, member accesses, string literals, and expressions
/// already wrapped in parentheses bind tightly enough on their own; anything
/// else (binary and assignment expressions in particular) gets wrapped so
/// `(a + b).length` comes out instead of `a + b.length`.
pub fn needs_parens(expr: &Expr) -> bool {
    !matches!(
        expr,
        Expr::Ident(_)
            | Expr::Call(_)
            | Expr::Member(_)
            | Expr::Paren(_)
            | Expr::Lit(Lit::Str(_))
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn macro_set_default_enables_all() {
        let m = MacroSet::default();
        assert!(m.alias && m.inline && m.inline_exp && m.rewrite_props && m.dead_code);
    }

    #[test]
    fn macro_set_enable_by_name() {
        let mut m = MacroSet::none();
        assert!(m.enable("InlineExp"));
        assert!(m.inline_exp);
        assert!(!m.alias);
        assert!(!m.enable("unknown"));
    }
}
