//! Parsing front end for condense.
//!
//! Wraps the standard SWC parser with comment capture enabled, since the
//! macro engine reads directives out of line-comment trivia. Syntax is
//! chosen from the file extension (`.ts`/`.tsx`/`.jsx` opt into TypeScript
//! or JSX; everything else parses as plain ECMAScript modules).

pub mod parse;

pub use parse::{parse_source, ParseResult};
