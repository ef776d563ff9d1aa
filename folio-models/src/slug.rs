//! URL slug generation for blog posts.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Everything that is not a word character, whitespace, or hyphen.
    static ref STRIP_RE: Regex = Regex::new(r"[^\w\s-]").expect("valid regex");
    /// Runs of whitespace and/or hyphens.
    static ref COLLAPSE_RE: Regex = Regex::new(r"[-\s]+").expect("valid regex");
}

/// Create a URL-friendly slug from a title.
///
/// Lowercases, strips punctuation, collapses whitespace/hyphen runs into a
/// single hyphen, and trims leading/trailing hyphens. Deterministic and
/// idempotent on already-clean input.
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    let stripped = STRIP_RE.replace_all(&lowered, "");
    let collapsed = COLLAPSE_RE.replace_all(&stripped, "-");
    collapsed.trim_matches('-').to_string()
}

/// Append an epoch-seconds suffix to force uniqueness when a slug collides
/// with a different document. Best-effort: two collisions in the same
/// second produce the same suffix.
pub fn disambiguate(slug: &str, epoch_secs: i64) -> String {
    format!("{slug}-{epoch_secs}")
}
