//! Variable-name normalization into JSON/filesystem-safe key segments.

/// Segment used when normalization leaves nothing behind.
pub const FALLBACK_SEGMENT: &str = "x";

/// Normalize one name segment.
///
/// Parenthesized annotations are removed, every run of non-alphanumeric
/// ASCII characters becomes a single `-`, leading and trailing separators
/// are dropped, and the result is lower-cased. A result starting with a
/// digit gets an `x` prefix. Never returns an empty string.
pub fn normalize_segment(raw: &str) -> String {
    let stripped = strip_annotations(raw);

    let mut out = String::with_capacity(stripped.len() + 1);
    let mut pending_sep = false;
    for ch in stripped.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_sep && !out.is_empty() {
                out.push('-');
            }
            pending_sep = false;
            out.push(ch.to_ascii_lowercase());
        } else {
            pending_sep = true;
        }
    }

    if out.is_empty() {
        return FALLBACK_SEGMENT.to_string();
    }
    if out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert_str(0, FALLBACK_SEGMENT);
    }
    out
}

/// Split a `/`-delimited variable name into normalized segments.
///
/// Empty parts are dropped. A name with no parts at all yields the single
/// fallback segment, so the result is never empty.
pub fn to_path(name: &str) -> Vec<String> {
    let path: Vec<String> = name
        .split('/')
        .filter(|part| !part.is_empty())
        .map(normalize_segment)
        .collect();
    if path.is_empty() {
        vec![FALLBACK_SEGMENT.to_string()]
    } else {
        path
    }
}

/// Remove every `(...)` group. An unclosed `(` is kept as-is.
fn strip_annotations(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(open) = rest.find('(') {
        match rest[open..].find(')') {
            Some(close) => {
                out.push_str(&rest[..open]);
                rest = &rest[open + close + 1..];
            }
            None => break,
        }
    }
    out.push_str(rest);
    out
}
