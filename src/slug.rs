//! URL slugs for blog posts

use std::sync::LazyLock;

use regex::Regex;

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_\-]+").unwrap());
static HYPHENS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-{2,}").unwrap());

/// Derives a slug from a post title
///
/// Lowercases, turns whitespace runs into hyphens, strips everything that is
/// not a word character or hyphen, then collapses and trims hyphens.
///
/// ```
/// assert_eq!(showcase::slug::slugify("Hello   World!!"), "hello-world");
/// ```
pub fn slugify(text: &str) -> String {
    let lowered = text.trim().to_lowercase();
    let hyphenated = WHITESPACE.replace_all(&lowered, "-");
    let stripped = NON_WORD.replace_all(&hyphenated, "");
    let collapsed = HYPHENS.replace_all(&stripped, "-");
    collapsed.trim_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_titles() {
        assert_eq!(slugify("Hello   World!!"), "hello-world");
        assert_eq!(slugify("  Behind the Scenes: Part 2 "), "behind-the-scenes-part-2");
        assert_eq!(slugify("snake_case stays"), "snake_case-stays");
    }

    #[test]
    fn hyphens_never_doubled_or_dangling() {
        for input in ["a - b", "--x--", "!Hi!", "- leading", "trailing -", "a -- -- b"] {
            let slug = slugify(input);
            assert!(!slug.contains("--"), "{input:?} -> {slug:?}");
            assert!(!slug.starts_with('-'), "{input:?} -> {slug:?}");
            assert!(!slug.ends_with('-'), "{input:?} -> {slug:?}");
        }
        assert_eq!(slugify("a -- -- b"), "a-b");
        assert_eq!(slugify("!Hi!"), "hi");
    }

    #[test]
    fn only_slug_characters_survive() {
        let slug = slugify("Café Ünïcode & Émojis 🎬 2026");
        assert!(slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_'));
        assert_eq!(slug, "caf-ncode-mojis-2026");
    }

    #[test]
    fn idempotent() {
        for input in ["Hello   World!!", "Already-a-slug", "  Mixed CASE -- text ", "", "???"] {
            let once = slugify(input);
            assert_eq!(slugify(&once), once);
        }
    }

    #[test]
    fn empty_when_nothing_usable() {
        assert_eq!(slugify("???"), "");
        assert_eq!(slugify("   "), "");
    }
}
