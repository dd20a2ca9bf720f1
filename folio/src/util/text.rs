// src/util/text.rs
use crate::constants::SHORT_URL_TAIL_CHARS;
use reqwest::Url;

const ELLIPSIS: char = '…';

/// Whether a character occupies two terminal columns.
///
/// Approximation covering Hangul, CJK ideographs and fullwidth forms; other
/// characters count as one column.
pub fn is_wide(ch: char) -> bool {
    matches!(
        ch as u32,
        0x1100..=0x115F
            | 0x2E80..=0xA4CF
            | 0xAC00..=0xD7A3
            | 0xF900..=0xFAFF
            | 0xFE10..=0xFE6F
            | 0xFF00..=0xFF60
            | 0xFFE0..=0xFFE6
    )
}

fn char_width(ch: char) -> usize {
    if is_wide(ch) {
        2
    } else {
        1
    }
}

/// Display width of a string in columns.
pub fn display_width(s: &str) -> usize {
    s.chars().map(char_width).sum()
}

/// Cut a string so that it fits `limit` columns, marking the cut with `…`.
///
/// # Examples
///
/// ```
/// use folio::util::text::cut_to_width;
///
/// assert_eq!(cut_to_width("abcdef", 4), "abc…");
/// assert_eq!(cut_to_width("abc", 4), "abc");
/// ```
pub fn cut_to_width(s: &str, limit: usize) -> String {
    if display_width(s) <= limit {
        return s.to_string();
    }

    let budget = limit.saturating_sub(1).max(1);
    let mut width = 0;
    let mut out = String::new();
    for ch in s.chars() {
        let w = char_width(ch);
        if width + w > budget {
            break;
        }
        out.push(ch);
        width += w;
    }
    out.push(ELLIPSIS);
    out
}

/// Right-pad with spaces up to `target` columns.
pub fn pad_to_width(s: &str, target: usize) -> String {
    let width = display_width(s);
    if width >= target {
        return s.to_string();
    }
    format!("{s}{}", " ".repeat(target - width))
}

/// Truncate to at most `max_chars` characters, the last one being `…`.
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max_chars.saturating_sub(1)).collect();
    out.push(ELLIPSIS);
    out
}

/// Compact `host/last-segment` form of a url, used in attachment labels.
///
/// Unparsable input is returned unchanged.
///
/// # Examples
///
/// ```
/// use folio::util::text::short_url;
///
/// assert_eq!(short_url("https://example.com/files/report.pdf"), "example.com/report.pdf");
/// assert_eq!(short_url("not a url"), "not a url");
/// ```
pub fn short_url(raw: &str) -> String {
    let Ok(url) = Url::parse(raw) else {
        return raw.to_string();
    };

    let host = match (url.host_str(), url.port()) {
        (Some(host), Some(port)) => format!("{host}:{port}"),
        (Some(host), None) => host.to_string(),
        (None, _) => String::new(),
    };

    // Urls without a hierarchical path (e.g. `mailto:`) keep their whole path.
    let tail = match url.path_segments() {
        Some(segments) => segments.filter(|s| !s.is_empty()).last().unwrap_or(""),
        None => url.path(),
    };

    let mut short: String = tail.chars().take(SHORT_URL_TAIL_CHARS).collect();
    if tail.chars().count() > SHORT_URL_TAIL_CHARS {
        short.push(ELLIPSIS);
    }
    format!("{host}/{short}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("abc", 3)]
    #[case("한글", 4)]
    #[case("a한b", 4)]
    #[case("ｆｕｌｌ", 8)]
    #[case("", 0)]
    fn given_mixed_scripts_when_measuring_then_counts_wide_chars_twice(
        #[case] input: &str,
        #[case] expected: usize,
    ) {
        assert_eq!(display_width(input), expected);
    }

    #[test]
    fn given_wide_text_over_limit_when_cutting_then_respects_column_budget() {
        let cut = cut_to_width("가나다라마", 6);

        assert_eq!(cut, "가나…");
        assert!(display_width(&cut) <= 6);
    }

    #[test]
    fn given_tiny_limit_when_cutting_then_keeps_at_least_one_column() {
        assert_eq!(cut_to_width("abcdef", 1), "a…");
    }

    #[test]
    fn given_short_text_when_padding_then_fills_to_target_width() {
        assert_eq!(pad_to_width("한", 4), "한  ");
        assert_eq!(pad_to_width("abcd", 2), "abcd");
    }

    #[test]
    fn given_long_text_when_truncating_then_ends_with_ellipsis() {
        let out = truncate("abcdefghij", 5);

        assert_eq!(out, "abcd…");
        assert_eq!(out.chars().count(), 5);
    }

    #[test]
    fn given_text_within_limit_when_truncating_then_returns_unchanged() {
        assert_eq!(truncate("abc", 3), "abc");
    }

    #[rstest]
    #[case("https://example.com/a/b/report.pdf", "example.com/report.pdf")]
    #[case("https://example.com/", "example.com/")]
    #[case("http://localhost:8080/x", "localhost:8080/x")]
    #[case(
        "https://example.com/abcdefghijklmnopqrstuvwxyz",
        "example.com/abcdefghijklmnopqrstuvwx…"
    )]
    #[case("mailto:a@b", "/a@b")]
    #[case("relative/path", "relative/path")]
    fn given_url_when_shortening_then_keeps_host_and_tail(
        #[case] input: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(short_url(input), expected);
    }
}
