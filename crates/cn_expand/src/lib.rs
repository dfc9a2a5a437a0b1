//! Macro expansion over a parsed module and its comment trivia.
//!
//! Directives, written as line comments:
//! - `// .Alias` / `// .Inline` / `// .Inline(N)` — collapse a `const`
//!   binding into its reference sites
//! - `// .InlineExp`, `(Left)`, `(Right)` — hoist an assignment into the
//!   next use of one of its operands
//! - `// .DeadCode` ... `// .End(DeadCode)` — delete a statement range
//! - `// .RewriteProps(old=new, ...)` — rename member properties in a block
//!
//! Inlining clones expressions verbatim; an initializer with side effects
//! runs once per reference site after expansion. The directive author owns
//! that trade.

mod alias;
mod dead_code;
mod equal;
mod expand;
mod inline_exp;
mod resolve;
mod rewrite_props;
mod scanner;
mod trivia;

pub use expand::expand_module;
