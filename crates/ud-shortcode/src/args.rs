//! Shortcode argument parsing.
//!
//! Parses the attribute section of an opening tag: `[name key="value" other='x' n=3]`.

use std::collections::HashMap;

/// Parsed arguments from an opening shortcode tag.
///
/// # Example
///
/// ```
/// use ud_shortcode::ShortcodeArgs;
///
/// let args = ShortcodeArgs::parse(r#"display="block" lang='rust' width=80"#);
/// assert_eq!(args.get("display"), Some("block"));
/// assert_eq!(args.get("lang"), Some("rust"));
/// assert_eq!(args.get("width"), Some("80"));
/// assert_eq!(args.get("missing"), None);
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ShortcodeArgs {
    attrs: HashMap<String, String>,
}

impl ShortcodeArgs {
    /// Parse an attribute string (the text between the tag name and `]`).
    ///
    /// Supports `key="value"`, `key='value'` and `key=value`. Bare words without
    /// a value are ignored. Later duplicates win.
    #[must_use]
    pub fn parse(attrs_str: &str) -> Self {
        let mut args = Self::default();
        let mut remaining = attrs_str.trim();

        while !remaining.is_empty() {
            remaining = remaining.trim_start();
            if remaining.is_empty() {
                break;
            }

            if let Some((key, value, rest)) = parse_key_value(remaining) {
                args.attrs.insert(key.to_owned(), value.to_owned());
                remaining = rest;
            } else {
                // Skip the unrecognized word
                let end = remaining
                    .find(char::is_whitespace)
                    .unwrap_or(remaining.len());
                remaining = &remaining[end..];
            }
        }

        args
    }

    /// Build arguments from key/value pairs.
    #[must_use]
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            attrs: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Get an argument value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    /// Whether the argument is present (even with an empty value).
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.attrs.contains_key(key)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    /// Reconstruct the attribute section, keys sorted, values double-quoted.
    ///
    /// ```
    /// use ud_shortcode::ShortcodeArgs;
    ///
    /// let args = ShortcodeArgs::parse("lang=rust display='block'");
    /// assert_eq!(args.to_syntax(), r#"display="block" lang="rust""#);
    /// ```
    #[must_use]
    pub fn to_syntax(&self) -> String {
        let mut keys: Vec<_> = self.attrs.keys().collect();
        keys.sort();

        keys.into_iter()
            .map(|key| {
                let escaped = self.attrs[key].replace('"', "&quot;");
                format!(r#"{key}="{escaped}""#)
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Parse a key-value pair from the front of `s`.
///
/// Returns `(key, value, rest)`.
fn parse_key_value(s: &str) -> Option<(&str, &str, &str)> {
    let key_end = s.find(|c: char| c == '=' || c.is_whitespace())?;
    let key = &s[..key_end];

    let after_key = s[key_end..].trim_start();
    let after_eq = after_key.strip_prefix('=')?.trim_start();

    if key.is_empty() {
        return None;
    }

    if let Some(stripped) = after_eq.strip_prefix('"') {
        let end_quote = stripped.find('"')?;
        Some((key, &stripped[..end_quote], &stripped[end_quote + 1..]))
    } else if let Some(stripped) = after_eq.strip_prefix('\'') {
        let end_quote = stripped.find('\'')?;
        Some((key, &stripped[..end_quote], &stripped[end_quote + 1..]))
    } else {
        let end = after_eq.find(char::is_whitespace).unwrap_or(after_eq.len());
        Some((key, &after_eq[..end], &after_eq[end..]))
    }
}
