//! Comment-slot bookkeeping over the position-keyed trivia store.
//!
//! SWC keys leading trivia by the owning node's start position and trailing
//! trivia by the previous token's end position. Two rules hold throughout:
//! consuming a directive removes exactly its slot (siblings keep their
//! order), and removing a statement relocates or discards every trivia list
//! it owned so a later scan never re-observes a consumed comment.

use swc_common::{
    comments::{Comment, Comments, SingleThreadedComments},
    BytePos, Span,
};

/// Key of a statement's trailing-trivia list.
///
/// Statement spans may or may not cover the terminating semicolon, so the
/// trailing comments can be keyed one byte past `span.hi`.
pub(crate) fn trailing_key(comments: &SingleThreadedComments, span: Span) -> Option<BytePos> {
    if comments.has_trailing(span.hi) {
        return Some(span.hi);
    }
    let bumped = BytePos(span.hi.0 + 1);
    comments.has_trailing(bumped).then_some(bumped)
}

/// Snapshot of the trailing trivia attached to the statement at `span`.
pub(crate) fn trailing(
    comments: &SingleThreadedComments,
    span: Span,
) -> Option<(BytePos, Vec<Comment>)> {
    let key = trailing_key(comments, span)?;
    comments.get_trailing(key).map(|list| (key, list))
}

/// Snapshot of the leading trivia keyed at `lo`.
pub(crate) fn leading(comments: &SingleThreadedComments, lo: BytePos) -> Vec<Comment> {
    comments.get_leading(lo).unwrap_or_default()
}

pub(crate) fn take_leading_list(comments: &SingleThreadedComments, lo: BytePos) -> Vec<Comment> {
    comments.take_leading(lo).unwrap_or_default()
}

pub(crate) fn take_trailing_list(comments: &SingleThreadedComments, key: BytePos) -> Vec<Comment> {
    comments.take_trailing(key).unwrap_or_default()
}

/// Remove exactly one leading slot, leaving sibling slots in order.
pub(crate) fn splice_leading_slot(comments: &SingleThreadedComments, lo: BytePos, slot: usize) {
    let mut list = take_leading_list(comments, lo);
    if slot < list.len() {
        list.remove(slot);
    }
    if !list.is_empty() {
        comments.add_leading_comments(lo, list);
    }
}

/// Put `extra` in front of whatever leading trivia `lo` already carries.
pub(crate) fn prepend_leading(
    comments: &SingleThreadedComments,
    lo: BytePos,
    mut extra: Vec<Comment>,
) {
    if extra.is_empty() {
        return;
    }
    if let Some(existing) = comments.take_leading(lo) {
        extra.extend(existing);
    }
    comments.add_leading_comments(lo, extra);
}

pub(crate) fn append_trailing(
    comments: &SingleThreadedComments,
    key: BytePos,
    extra: Vec<Comment>,
) {
    if !extra.is_empty() {
        comments.add_trailing_comments(key, extra);
    }
}

/// Drop every trivia list the statement at `span` owns.
pub(crate) fn discard_stmt_trivia(comments: &SingleThreadedComments, span: Span) {
    comments.take_leading(span.lo);
    comments.take_trailing(span.hi);
    comments.take_trailing(BytePos(span.hi.0 + 1));
}

/// Bookkeeping for removing the statement at `span` whose trailing slot
/// `slot` (keyed at `key`) held the consumed directive. The directive slot
/// is discarded; the statement's remaining trivia moves to the next
/// sibling's leading list, or is dropped when the statement was last in its
/// list.
pub(crate) fn remove_stmt_trivia(
    comments: &SingleThreadedComments,
    span: Span,
    key: BytePos,
    slot: usize,
    next_lo: Option<BytePos>,
) {
    let mut survivors = take_leading_list(comments, span.lo);
    let mut trail = take_trailing_list(comments, key);
    if slot < trail.len() {
        trail.remove(slot);
    }
    survivors.append(&mut trail);
    for other in [span.hi, BytePos(span.hi.0 + 1)] {
        if other != key {
            let mut extra = take_trailing_list(comments, other);
            survivors.append(&mut extra);
        }
    }
    if let Some(lo) = next_lo {
        prepend_leading(comments, lo, survivors);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swc_common::comments::CommentKind;
    use swc_common::DUMMY_SP;

    fn line(text: &str) -> Comment {
        Comment {
            kind: CommentKind::Line,
            span: DUMMY_SP,
            text: text.into(),
        }
    }

    fn texts(list: &[Comment]) -> Vec<&str> {
        list.iter().map(|c| c.text.as_ref()).collect()
    }

    #[test]
    fn splice_removes_exactly_one_slot() {
        let comments = SingleThreadedComments::default();
        let lo = BytePos(10);
        comments.add_leading_comments(lo, vec![line(" one"), line(" two"), line(" three")]);

        splice_leading_slot(&comments, lo, 1);

        let list = leading(&comments, lo);
        assert_eq!(texts(&list), vec![" one", " three"]);
    }

    #[test]
    fn trailing_key_allows_semicolon_slack() {
        let comments = SingleThreadedComments::default();
        let span = Span::new(BytePos(1), BytePos(20));
        comments.add_trailing(BytePos(21), line(" .Alias"));

        assert_eq!(trailing_key(&comments, span), Some(BytePos(21)));
        let (key, list) = trailing(&comments, span).unwrap();
        assert_eq!(key, BytePos(21));
        assert_eq!(texts(&list), vec![" .Alias"]);
    }

    #[test]
    fn remove_stmt_relocates_unconsumed_trivia() {
        let comments = SingleThreadedComments::default();
        let span = Span::new(BytePos(5), BytePos(30));
        comments.add_leading(span.lo, line(" kept above"));
        comments.add_trailing_comments(span.hi, vec![line(" .Inline"), line(" kept beside")]);
        let next_lo = BytePos(40);
        comments.add_leading(next_lo, line(" own comment"));

        remove_stmt_trivia(&comments, span, span.hi, 0, Some(next_lo));

        assert!(comments.get_leading(span.lo).is_none());
        assert!(comments.get_trailing(span.hi).is_none());
        let list = leading(&comments, next_lo);
        assert_eq!(texts(&list), vec![" kept above", " kept beside", " own comment"]);
    }

    #[test]
    fn remove_stmt_discards_trivia_at_end_of_list() {
        let comments = SingleThreadedComments::default();
        let span = Span::new(BytePos(5), BytePos(30));
        comments.add_trailing_comments(span.hi, vec![line(" .Alias")]);

        remove_stmt_trivia(&comments, span, span.hi, 0, None);

        assert!(comments.get_trailing(span.hi).is_none());
    }
}
