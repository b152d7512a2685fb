//! Key-prefix redaction hook
//!
//! Which keys count as sensitive is the caller's decision; this module only
//! provides a ready-made [`ReplaceAttr`] that masks by key prefix.

use super::attribute::{Attr, Value, MAX_LAZY_RESOLUTIONS};
use super::handler::ReplaceAttr;
use std::sync::Arc;

/// Replacement text for masked values.
pub const REDACTED: &str = "[REDACTED]";

/// Build a hook that masks every attribute whose key starts with one of
/// `prefixes`. Group children are checked recursively; empty prefixes are
/// ignored.
///
/// Lazy values under a non-matching key are forced so the keys they produce
/// can be checked too. Nesting past [`MAX_LAZY_RESOLUTIONS`] levels is masked
/// whole.
pub fn prefix_redactor<I, S>(prefixes: I) -> ReplaceAttr
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let prefixes: Arc<[String]> = prefixes
        .into_iter()
        .map(Into::<String>::into)
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .into();

    Arc::new(move |_groups: &[String], attr: Attr| {
        let mut budget = MAX_LAZY_RESOLUTIONS;
        redact(&prefixes, attr, &mut budget)
    })
}

fn redact(prefixes: &[String], attr: Attr, budget: &mut usize) -> Attr {
    if attr.is_zero() {
        return attr;
    }
    if prefixes.iter().any(|p| attr.key.starts_with(p.as_str())) {
        return Attr::string(attr.key, REDACTED);
    }

    let Attr { key, value } = attr;
    if !matches!(value, Value::Lazy(_) | Value::Group(_)) {
        return Attr { key, value };
    }
    if *budget == 0 {
        return Attr::string(key, REDACTED);
    }
    *budget -= 1;

    match value.resolve() {
        Value::Group(children) => Attr::group(
            key,
            children
                .into_iter()
                .map(|c| redact(prefixes, c, budget))
                .collect(),
        ),
        value => Attr { key, value },
    }
}
