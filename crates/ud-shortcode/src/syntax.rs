//! Shortcode tag syntax.
//!
//! Recognises `[name attrs]`, `[name attrs /]` and `[/name]`.

use std::collections::HashMap;

/// A tag found at a `[` position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Tag<'a> {
    /// Opening tag: `[name attrs]` or `[name attrs /]`.
    Open {
        name: &'a str,
        attrs: &'a str,
        self_closing: bool,
        /// Byte offset just past the closing `]`.
        end: usize,
    },
    /// Closing tag: `[/name]`.
    Close {
        name: &'a str,
        /// Byte offset just past the closing `]`.
        end: usize,
    },
}

impl Tag<'_> {
    pub(crate) fn end(&self) -> usize {
        match self {
            Self::Open { end, .. } | Self::Close { end, .. } => *end,
        }
    }
}

/// Check if a name could be matched as a tag.
///
/// Valid names contain only ASCII alphanumerics, hyphens, and underscores.
pub(crate) fn is_valid_tag_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

fn name_len(s: &str) -> usize {
    s.bytes()
        .take_while(|b| b.is_ascii_alphanumeric() || *b == b'-' || *b == b'_')
        .count()
}

/// Parse a tag starting at `start`, which must index a `[`.
///
/// Returns `None` if the text there is not well-formed tag syntax.
pub(crate) fn parse_tag(text: &str, start: usize) -> Option<Tag<'_>> {
    let rest = text.get(start..)?.strip_prefix('[')?;
    let offset = start + 1;

    if let Some(after_slash) = rest.strip_prefix('/') {
        let len = name_len(after_slash);
        if len == 0 {
            return None;
        }
        let name = &after_slash[..len];
        let after_name = &after_slash[len..];
        let trimmed = after_name.trim_start();
        if !trimmed.starts_with(']') {
            return None;
        }
        let consumed = after_name.len() - trimmed.len();
        return Some(Tag::Close {
            name,
            end: offset + 1 + len + consumed + 1,
        });
    }

    let len = name_len(rest);
    if len == 0 {
        return None;
    }
    let name = &rest[..len];
    let after_name = &rest[len..];

    // Name must be followed by whitespace, `/` or `]`
    match after_name.chars().next() {
        Some(']' | '/') => {}
        Some(c) if c.is_whitespace() => {}
        _ => return None,
    }

    let attrs_len = attrs_len(after_name)?;
    let raw_attrs = &after_name[..attrs_len];
    let end = offset + len + attrs_len + 1;

    let trimmed = raw_attrs.trim_end();
    let (attrs, self_closing) = match trimmed.strip_suffix('/') {
        Some(attrs) => (attrs.trim(), true),
        None => (trimmed.trim_start(), false),
    };

    Some(Tag::Open {
        name,
        attrs,
        self_closing,
        end,
    })
}

/// Length of the attribute section up to (not including) the closing `]`.
///
/// Quotes may contain `]`. An unquoted `[` or a missing `]` makes the tag invalid.
fn attrs_len(s: &str) -> Option<usize> {
    let mut quote: Option<char> = None;

    for (i, c) in s.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, ']') => return Some(i),
            (None, '[') => return None,
            (None, _) => {}
        }
    }

    None
}

/// Find the `[/name]` that closes an opening tag ending at `from`.
///
/// Same-name opening tags in between are balanced against their own closers.
/// Returns `(close_start, close_end)`.
pub(crate) fn find_close(text: &str, name: &str, from: usize) -> Option<(usize, usize)> {
    let mut depth = 0usize;
    let mut pos = from;

    while let Some(rel) = text.get(pos..)?.find('[') {
        let start = pos + rel;
        match parse_tag(text, start) {
            Some(Tag::Open {
                name: open,
                self_closing: false,
                end,
                ..
            }) if open == name => {
                depth += 1;
                pos = end;
            }
            Some(Tag::Close { name: close, end }) if close == name => {
                if depth == 0 {
                    return Some((start, end));
                }
                depth -= 1;
                pos = end;
            }
            _ => pos = start + 1,
        }
    }

    None
}

/// Closers for every enclosing `name` opener in `text`, found in one pass.
///
/// Keyed by the opener's end offset; `None` means the opener has no closer.
/// Agrees with [`find_close`] for every opener the scan reaches. Openers it
/// never reaches (inside quoted attributes of another `name` opener) are absent.
pub(crate) fn match_closers(text: &str, name: &str) -> HashMap<usize, Option<(usize, usize)>> {
    let mut closers = HashMap::new();
    let mut open = Vec::new();
    let mut pos = 0;

    while let Some(rel) = text.get(pos..).and_then(|rest| rest.find('[')) {
        let start = pos + rel;
        match parse_tag(text, start) {
            Some(Tag::Open {
                name: found,
                self_closing: false,
                end,
                ..
            }) if found == name => {
                closers.insert(end, None);
                open.push(end);
                pos = end;
            }
            Some(Tag::Close { name: found, end }) if found == name => {
                if let Some(opener) = open.pop() {
                    closers.insert(opener, Some((start, end)));
                }
                pos = end;
            }
            _ => pos = start + 1,
        }
    }

    closers
}
