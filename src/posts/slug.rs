/// Characters that are unsafe in a filename and get replaced by hyphens.
const RESERVED_CHARS: [char; 9] = ['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Slug used when a title reduces to nothing.
pub const FALLBACK_SLUG: &str = "untitled";

/// Derives a URL-safe slug from a post title.
///
/// The algorithm must stay byte-for-byte compatible with the deployed file
/// corpus: reserved filename characters and spaces become hyphens, runs of
/// hyphens collapse, and leading/trailing hyphens are stripped. Everything
/// else passes through unchanged, non-ASCII scripts included.
#[must_use]
pub fn slugify(title: &str) -> String {
    let replaced: String = title
        .trim()
        .chars()
        .map(|c| {
            if c == ' ' || RESERVED_CHARS.contains(&c) {
                '-'
            } else {
                c
            }
        })
        .collect();

    let mut collapsed = String::with_capacity(replaced.len());
    for c in replaced.chars() {
        if c == '-' && collapsed.ends_with('-') {
            continue;
        }
        collapsed.push(c);
    }

    let slug = collapsed.trim_matches('-');
    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spaces_become_hyphens() {
        assert_eq!(slugify("Hello World"), "Hello-World");
    }

    #[test]
    fn test_reserved_characters_replaced() {
        assert_eq!(slugify("a/b\\c:d*e?f\"g<h>i|j"), "a-b-c-d-e-f-g-h-i-j");
    }

    #[test]
    fn test_consecutive_hyphens_collapse() {
        assert_eq!(slugify("a // b"), "a-b");
        assert_eq!(slugify("a - b"), "a-b");
    }

    #[test]
    fn test_leading_and_trailing_stripped() {
        assert_eq!(slugify("  /intro/  "), "intro");
        assert_eq!(slugify("-already-hyphenated-"), "already-hyphenated");
    }

    #[test]
    fn test_empty_title_falls_back() {
        assert_eq!(slugify(""), FALLBACK_SLUG);
        assert_eq!(slugify("   "), FALLBACK_SLUG);
        assert_eq!(slugify("???"), FALLBACK_SLUG);
    }

    #[test]
    fn test_non_ascii_preserved() {
        assert_eq!(slugify("深入理解 Rust 所有权"), "深入理解-Rust-所有权");
        assert_eq!(slugify("Привет мир"), "Привет-мир");
    }

    #[test]
    fn test_case_preserved() {
        assert_eq!(slugify("My First Post"), "My-First-Post");
    }

    #[test]
    fn test_no_reserved_characters_survive() {
        let slug = slugify("What? A *weird* <title> | with: everything/else\\\"");
        assert!(!slug.contains("--"));
        for c in RESERVED_CHARS {
            assert!(!slug.contains(c));
        }
    }
}
