//! URL slug generation for blog posts and news articles.

use unicode_normalization::UnicodeNormalization;

/// Maximum stored slug length.
pub const MAX_SLUG_LEN: usize = 550;

/// Room reserved at the end of a base slug for a `-N` collision suffix.
const SUFFIX_RESERVE: usize = 8;

/// Slug used when a title contains no ASCII letters or digits.
const FALLBACK_SLUG: &str = "untitled";

/// Convert a title into a URL slug.
///
/// Decomposes accented characters (NFKD) and keeps their ASCII base,
/// lowercases, drops everything that is not an ASCII letter, digit,
/// underscore, hyphen or whitespace, collapses whitespace/hyphen runs into a
/// single `-`, and trims leading/trailing `-` and `_`.
///
/// # Examples
///
/// ```
/// use pwatch_core::slug::slugify;
/// assert_eq!(slugify("Budget 2025: What's New?"), "budget-2025-whats-new");
/// assert_eq!(slugify("  MPs -- Doubt   Impact "), "mps-doubt-impact");
/// assert_eq!(slugify("Café Société"), "cafe-societe");
/// ```
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;

    let ascii = title.nfkd().filter(char::is_ascii);
    for c in ascii.map(|c| c.to_ascii_lowercase()) {
        if c.is_ascii_alphanumeric() || c == '_' {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else if c == '-' || c.is_whitespace() {
            pending_dash = true;
        }
    }

    let trimmed = slug.trim_matches(|c| c == '-' || c == '_');
    if trimmed.is_empty() {
        return FALLBACK_SLUG.to_string();
    }

    let limit = MAX_SLUG_LEN - SUFFIX_RESERVE;
    if trimmed.len() > limit {
        trimmed[..limit].trim_end_matches('-').to_string()
    } else {
        trimmed.to_string()
    }
}

/// The slug to try on the `attempt`-th insert (1-based).
///
/// The first attempt uses the base slug unchanged; later attempts append
/// `-2`, `-3`, and so on.
pub fn slug_candidate(base: &str, attempt: u32) -> String {
    if attempt <= 1 {
        base.to_string()
    } else {
        format!("{base}-{attempt}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_strips_punctuation() {
        assert_eq!(
            slugify("Forensic and Scientific Analytical Services Bill, 2025"),
            "forensic-and-scientific-analytical-services-bill-2025"
        );
    }

    #[test]
    fn slugify_keeps_underscores_inside() {
        assert_eq!(slugify("youth_powered leaders"), "youth_powered-leaders");
    }

    #[test]
    fn slugify_trims_edge_separators() {
        assert_eq!(slugify("--_hello world_--"), "hello-world");
    }

    #[test]
    fn slugify_transliterates_accents() {
        assert_eq!(slugify("Café Société"), "cafe-societe");
        assert_eq!(slugify("Naïve ﬁnance"), "naive-finance");
    }

    #[test]
    fn slugify_drops_scripts_without_ascii_base() {
        assert_eq!(slugify("Kampala 東京"), "kampala");
    }

    #[test]
    fn slugify_falls_back_for_symbol_only_titles() {
        assert_eq!(slugify("!!! ???"), FALLBACK_SLUG);
    }

    #[test]
    fn slugify_truncates_long_titles() {
        let title = "word ".repeat(200);
        let slug = slugify(&title);
        assert!(slug.len() <= MAX_SLUG_LEN - SUFFIX_RESERVE);
        assert!(!slug.ends_with('-'));
    }

    #[test]
    fn candidates_append_suffix_after_first_attempt() {
        assert_eq!(slug_candidate("budget", 1), "budget");
        assert_eq!(slug_candidate("budget", 2), "budget-2");
        assert_eq!(slug_candidate("budget", 7), "budget-7");
    }
}
