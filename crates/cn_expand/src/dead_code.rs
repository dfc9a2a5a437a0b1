//! DeadCode: delete a contiguous statement range bracketed by a leading
//! `.DeadCode` marker and a trailing `.End(DeadCode)` marker in the same
//! block. Markers must pair up; an unbalanced or inverted pair leaves the
//! block untouched with a warning.

use cn_ast::Directive;
use swc_common::{BytePos, Span, Spanned};
use swc_ecma_ast::Stmt;

use crate::expand::Cx;
use crate::{scanner, trivia};

struct Marker {
    stmt: usize,
    key: BytePos,
    slot: usize,
    comment_span: Span,
}

pub(crate) fn expand_block(cx: &mut Cx<'_>, stmts: &mut Vec<Stmt>) {
    let mut starts = Vec::new();
    let mut ends = Vec::new();
    for (i, stmt) in stmts.iter().enumerate() {
        let lo = stmt.span().lo;
        let leading = trivia::leading(cx.comments, lo);
        for slot in scanner::marker_slots(&leading, &Directive::DeadCodeStart) {
            starts.push(Marker {
                stmt: i,
                key: lo,
                slot,
                comment_span: leading[slot].span,
            });
        }
        if let Some((key, trailing)) = trivia::trailing(cx.comments, stmt.span()) {
            for slot in scanner::marker_slots(&trailing, &Directive::DeadCodeEnd) {
                ends.push(Marker {
                    stmt: i,
                    key,
                    slot,
                    comment_span: trailing[slot].span,
                });
            }
        }
    }
    if starts.is_empty() && ends.is_empty() {
        return;
    }
    if starts.len() != ends.len() {
        let at = starts
            .first()
            .or(ends.first())
            .map(|m| m.comment_span)
            .unwrap_or_default();
        cx.warn("mismatched DeadCode and End(DeadCode), skipping", at);
        return;
    }

    // Back to front, so earlier regions keep their statement indices.
    while let (Some(start), Some(end)) = (starts.pop(), ends.pop()) {
        let lo = start.comment_span.lo.min(end.comment_span.lo);
        let hi = start.comment_span.hi.max(end.comment_span.hi);
        cx.found("found DeadCode", Span::new(lo, hi));
        if end.stmt < start.stmt {
            cx.warn(
                "End(DeadCode) before DeadCode, skipping",
                end.comment_span,
            );
            return;
        }
        remove_region(cx, stmts, &start, &end);
    }
}

fn remove_region(cx: &mut Cx<'_>, stmts: &mut Vec<Stmt>, start: &Marker, end: &Marker) {
    // Trivia before the opening marker and after the closing marker is
    // outside the region and must survive the deletion.
    let mut survivors = trivia::leading(cx.comments, start.key);
    survivors.truncate(start.slot);
    let trail = trivia::take_trailing_list(cx.comments, end.key);
    survivors.extend(trail.into_iter().skip(end.slot + 1));

    for stmt in &stmts[start.stmt..=end.stmt] {
        trivia::discard_stmt_trivia(cx.comments, stmt.span());
    }

    if let Some(next) = stmts.get(end.stmt + 1) {
        trivia::prepend_leading(cx.comments, next.span().lo, survivors);
    } else if start.stmt > 0 {
        let prev_span = stmts[start.stmt - 1].span();
        let key = trivia::trailing_key(cx.comments, prev_span).unwrap_or(prev_span.hi);
        trivia::append_trailing(cx.comments, key, survivors);
    }

    stmts.drain(start.stmt..=end.stmt);
}
