/// Longest title stem kept in a download filename, in characters.
pub const MAX_TITLE_CHARS: usize = 50;
pub const FALLBACK_FILENAME: &str = "extracted-content.md";

/// Filename for a Markdown download: `{sanitized_title}.md`, or the fallback.
pub fn markdown_filename(title: Option<&str>) -> String {
    let stem = title.map(sanitize_title).unwrap_or_default();
    if stem.trim().is_empty() {
        FALLBACK_FILENAME.to_string()
    } else {
        format!("{stem}.md")
    }
}

/// Keeps ASCII letters, digits, `_`, `-`, `[`, `]` and whitespace, then truncates.
///
/// Idempotent: every kept character survives a second pass and the result is
/// already within the length limit.
pub fn sanitize_title(input: &str) -> String {
    input
        .chars()
        .filter(|&c| is_allowed(c))
        .take(MAX_TITLE_CHARS)
        .collect()
}

fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '[' | ']') || c.is_whitespace()
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;

    #[test]
    fn strips_punctuation_and_keeps_brackets() {
        assert_eq!(sanitize_title("My: Title?/Bad [v2]"), "My TitleBad [v2]");
        assert_eq!(sanitize_title("snake_case-name"), "snake_case-name");
    }

    #[test]
    fn non_ascii_letters_are_removed() {
        assert_eq!(sanitize_title("Résumé 中文 title"), "Rsum  title");
    }

    #[test]
    fn truncates_by_characters() {
        let long = "a".repeat(80);
        assert_eq!(sanitize_title(&long).chars().count(), MAX_TITLE_CHARS);
    }

    fn random_title(rng: &mut StdRng) -> String {
        const PICKS: &[char] = &[
            'a', 'Z', '7', '_', '-', '[', ']', ' ', '\t', '\n', '\u{3000}', '\u{a0}', ':', '/',
            '?', '.', 'é', '中', '😀', '\u{200b}',
        ];
        let len = rng.gen_range(0..160);
        (0..len)
            .map(|_| {
                if rng.gen_bool(0.5) {
                    PICKS[rng.gen_range(0..PICKS.len())]
                } else {
                    rng.gen::<char>()
                }
            })
            .collect()
    }

    #[test]
    fn sanitizing_generated_titles_is_idempotent_and_bounded() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..2_000 {
            let title = random_title(&mut rng);
            let once = sanitize_title(&title);
            assert_eq!(sanitize_title(&once), once, "title {title:?}");
            assert!(once.chars().count() <= MAX_TITLE_CHARS, "title {title:?}");
            assert!(once.chars().all(is_allowed), "title {title:?}");

            let filename = markdown_filename(Some(&title));
            assert!(filename.ends_with(".md"));
            assert_eq!(markdown_filename(Some(filename.trim_end_matches(".md"))), filename);
        }
    }

    #[test]
    fn sanitizing_twice_changes_nothing() {
        let samples = [
            "",
            "plain",
            "Hello, World! (2024) — edition",
            "标题：测试",
            "[tag] name_with-dash\tand tab",
            &"x?".repeat(70),
        ];
        for sample in samples {
            let once = sanitize_title(sample);
            assert_eq!(sanitize_title(&once), once, "sample {sample:?}");
            assert!(once.chars().count() <= MAX_TITLE_CHARS);
            assert!(once.chars().all(is_allowed));
        }
    }

    #[test]
    fn filename_falls_back_when_title_missing_or_stripped() {
        assert_eq!(markdown_filename(None), FALLBACK_FILENAME);
        assert_eq!(markdown_filename(Some("")), FALLBACK_FILENAME);
        assert_eq!(markdown_filename(Some("？！。")), FALLBACK_FILENAME);
        assert_eq!(markdown_filename(Some("  ")), FALLBACK_FILENAME);
        assert_eq!(markdown_filename(Some("Report: Q1")), "Report Q1.md");
    }
}
