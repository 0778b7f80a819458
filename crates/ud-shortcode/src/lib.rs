//! Shortcode engine for rendered documentation content.
//!
//! Shortcodes are bracketed tags embedded in stored text and expanded at
//! render time:
//!
//! ```text
//! [code display="block" lang="rust"]fn main() {}[/code]
//! [codetab id="install"]
//! [logged_in]Welcome back.[/logged_in]
//! ```
//!
//! # Architecture
//!
//! - [`ShortcodeRegistry`]: tag name to [`ShortcodeHandler`] mapping, built once
//!   at startup and shared read-only (optionally through [`global`])
//! - [`ShortcodeParser`]: per-render dispatcher; finds tags, calls handlers,
//!   substitutes output. Handlers get the parser back for recursive expansion,
//!   bounded by a depth limit.
//! - [`RenderContext`]: request-scoped facts (current page, current user)
//!   passed explicitly instead of read from ambient state
//!
//! # Example
//!
//! ```
//! use ud_shortcode::{RenderContext, ShortcodeParser, ShortcodeRegistry};
//!
//! let mut registry = ShortcodeRegistry::new();
//! registry
//!     .register_fn("kbd", |_args, content, parser, _tag| {
//!         Ok(format!("<kbd>{}</kbd>", parser.parse(content.unwrap_or_default())?))
//!     })
//!     .unwrap();
//!
//! let ctx = RenderContext::default();
//! let html = ShortcodeParser::new(&registry, &ctx)
//!     .parse("Press [kbd]Ctrl+C[/kbd] to copy.")
//!     .unwrap();
//! assert_eq!(html, "Press <kbd>Ctrl+C</kbd> to copy.");
//! ```

mod args;
mod context;
mod error;
pub mod global;
mod handler;
mod parser;
mod registry;
mod syntax;

pub use args::ShortcodeArgs;
pub use context::{CurrentUser, PageId, RenderContext};
pub use error::{BoxError, ShortcodeError};
pub use handler::ShortcodeHandler;
pub use parser::{DEFAULT_MAX_DEPTH, ShortcodeParser};
pub use registry::{RESERVED_NAMES, ShortcodeRegistry};
