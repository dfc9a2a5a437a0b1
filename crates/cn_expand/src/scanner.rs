//! Directive recognition over comment trivia.
//!
//! Matching is strict: case-sensitive, exactly one space after the comment
//! marker, parameters fully parsed. Anything else is treated as an ordinary
//! comment, not an error.

use cn_ast::{Directive, Side};
use swc_common::{
    comments::{Comment, CommentKind, SingleThreadedComments},
    BytePos, Span,
};

use crate::trivia;

/// Parse the text of one line comment (everything after `//`).
pub(crate) fn parse_directive(text: &str) -> Option<Directive> {
    let body = text.strip_prefix(" .")?;
    if body == "Alias" {
        return Some(Directive::Alias);
    }
    if body == "DeadCode" {
        return Some(Directive::DeadCodeStart);
    }
    if body == "End(DeadCode)" {
        return Some(Directive::DeadCodeEnd);
    }
    if let Some(rest) = body.strip_prefix("InlineExp") {
        return match rest {
            "" => Some(Directive::InlineExp {
                side: Side::Left,
                explicit: false,
            }),
            "(Left)" => Some(Directive::InlineExp {
                side: Side::Left,
                explicit: true,
            }),
            "(Right)" => Some(Directive::InlineExp {
                side: Side::Right,
                explicit: true,
            }),
            _ => None,
        };
    }
    if let Some(rest) = body.strip_prefix("Inline") {
        if rest.is_empty() {
            return Some(Directive::Inline(1));
        }
        let digits = rest.strip_prefix('(')?.strip_suffix(')')?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let n: u32 = digits.parse().ok()?;
        return (n > 0).then_some(Directive::Inline(n));
    }
    if let Some(rest) = body.strip_prefix("RewriteProps(") {
        let inner = rest.strip_suffix(')')?;
        if inner.is_empty() {
            return Some(Directive::RewriteProps(Vec::new()));
        }
        let mut renames = Vec::new();
        for pair in inner.split(", ") {
            let (old, new) = pair.split_once('=')?;
            if old.is_empty() || new.is_empty() {
                return None;
            }
            renames.push((old.to_string(), new.to_string()));
        }
        return Some(Directive::RewriteProps(renames));
    }
    None
}

/// A directive matched in a trivia list, with what is needed to splice its
/// slot back out once consumed.
pub(crate) struct TriviaMatch {
    pub key: BytePos,
    pub slot: usize,
    pub directive: Directive,
    pub comment_span: Span,
}

/// First recognizable directive in the statement's trailing trivia.
pub(crate) fn trailing_directive(
    comments: &SingleThreadedComments,
    span: Span,
) -> Option<TriviaMatch> {
    let (key, list) = trivia::trailing(comments, span)?;
    list.iter().enumerate().find_map(|(slot, comment)| {
        if comment.kind != CommentKind::Line {
            return None;
        }
        parse_directive(comment.text.as_ref()).map(|directive| TriviaMatch {
            key,
            slot,
            directive,
            comment_span: comment.span,
        })
    })
}

/// Slots in a trivia list carrying exactly the marker `want`, in slot order.
pub(crate) fn marker_slots(list: &[Comment], want: &Directive) -> Vec<usize> {
    list.iter()
        .enumerate()
        .filter(|(_, comment)| {
            comment.kind == CommentKind::Line
                && parse_directive(comment.text.as_ref()).as_ref() == Some(want)
        })
        .map(|(slot, _)| slot)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_each_grammar() {
        assert_eq!(parse_directive(" .Alias"), Some(Directive::Alias));
        assert_eq!(parse_directive(" .Inline"), Some(Directive::Inline(1)));
        assert_eq!(parse_directive(" .Inline(7)"), Some(Directive::Inline(7)));
        assert_eq!(
            parse_directive(" .InlineExp"),
            Some(Directive::InlineExp {
                side: Side::Left,
                explicit: false
            })
        );
        assert_eq!(
            parse_directive(" .InlineExp(Left)"),
            Some(Directive::InlineExp {
                side: Side::Left,
                explicit: true
            })
        );
        assert_eq!(
            parse_directive(" .InlineExp(Right)"),
            Some(Directive::InlineExp {
                side: Side::Right,
                explicit: true
            })
        );
        assert_eq!(parse_directive(" .DeadCode"), Some(Directive::DeadCodeStart));
        assert_eq!(
            parse_directive(" .End(DeadCode)"),
            Some(Directive::DeadCodeEnd)
        );
        assert_eq!(
            parse_directive(" .RewriteProps(push=append, keys=values)"),
            Some(Directive::RewriteProps(vec![
                ("push".into(), "append".into()),
                ("keys".into(), "values".into()),
            ]))
        );
    }

    #[test]
    fn empty_rename_table_is_recognized_as_empty() {
        assert_eq!(
            parse_directive(" .RewriteProps()"),
            Some(Directive::RewriteProps(Vec::new()))
        );
    }

    #[test]
    fn matching_is_strict() {
        // No leading space, wrong case, trailing garbage, bad parameters.
        assert_eq!(parse_directive(".Alias"), None);
        assert_eq!(parse_directive("  .Alias"), None);
        assert_eq!(parse_directive(" .alias"), None);
        assert_eq!(parse_directive(" .Alias extra"), None);
        assert_eq!(parse_directive(" .Inline()"), None);
        assert_eq!(parse_directive(" .Inline(0)"), None);
        assert_eq!(parse_directive(" .Inline(two)"), None);
        assert_eq!(parse_directive(" .Inline(2"), None);
        assert_eq!(parse_directive(" .InlineExp(RHS)"), None);
        assert_eq!(parse_directive(" .RewriteProps(push)"), None);
        assert_eq!(parse_directive(" .RewriteProps(=append)"), None);
        assert_eq!(parse_directive(" .End(Alias)"), None);
        assert_eq!(parse_directive(" plain comment"), None);
    }
}
