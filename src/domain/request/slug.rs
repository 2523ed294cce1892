//! Output filename slugs

/// Extension of memory chunk files
pub const CHUNK_EXTENSION: &str = "jsonl";

/// Fallback base used when both title and instruction are blank
pub const FALLBACK_BASE: &str = "memory_chunk";

/// Collapse every whitespace run into one underscore and lowercase.
pub fn slugify(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_whitespace = false;

    for ch in input.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                out.push('_');
                in_whitespace = true;
            }
        } else {
            out.push(ch);
            in_whitespace = false;
        }
    }

    out.to_lowercase()
}

/// Default memory chunk filename for a human-readable base
///
/// A blank base becomes [`FALLBACK_BASE`] so the dialog never offers a bare
/// `.jsonl`; every other base goes through [`slugify`] unchanged.
pub fn chunk_file_name(base: &str) -> String {
    let base = if base.trim().is_empty() {
        FALLBACK_BASE
    } else {
        base
    };
    format!("{}.{}", slugify(base), CHUNK_EXTENSION)
}
