use super::error::ClockError;
use super::timestamp::Timestamp;
use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace regex is valid"));

static TIMESTAMP_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[0-9]{4}-[0-9]{2}-[0-9]{2} [0-9]{2}:[0-9]{2}:[0-9]{2}")
        .expect("timestamp regex is valid")
});

/// OCR 文本 → 时间戳
///
/// Burned-in clocks come back from OCR with unified-looking but distinct dash
/// code points and stray line breaks. The text is cleaned up first, then the
/// first `YYYY-MM-DD HH:MM:SS` substring is taken.
pub struct TimestampExtractor;

impl TimestampExtractor {
    /// Dash variants become `-`, whitespace runs become one space, ends are trimmed.
    pub fn normalize(raw: &str) -> String {
        let dashed: String = raw
            .chars()
            .map(|c| match c {
                '\u{2014}' | '\u{2013}' | '\u{FF0D}' => '-',
                other => other,
            })
            .collect();
        WHITESPACE_RUN.replace_all(&dashed, " ").trim().to_string()
    }

    /// Only the first shape match is considered. If its calendar values are
    /// invalid the result is `NotFound`, later matches are not tried.
    pub fn extract(raw: &str) -> Result<Timestamp, ClockError> {
        let normalized = Self::normalize(raw);
        let candidate = TIMESTAMP_SHAPE
            .find(&normalized)
            .ok_or(ClockError::NotFound)?;
        Timestamp::parse_shaped(candidate.as_str()).ok_or(ClockError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(text: &str) -> Timestamp {
        Timestamp::parse(text).unwrap()
    }

    #[test]
    fn test_normalize_dashes_and_whitespace() {
        assert_eq!(
            TimestampExtractor::normalize("  2024—12–05\n\n09:30:00\t cam  "),
            "2024-12-05 09:30:00 cam"
        );
        assert_eq!(TimestampExtractor::normalize("2024－12－05"), "2024-12-05");
        assert_eq!(TimestampExtractor::normalize(""), "");
        assert_eq!(TimestampExtractor::normalize(" \n\t "), "");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let samples = [
            "",
            "   ",
            "Raw: 2024-12-05 09:30:00 camera1",
            "2024—12—05  09:30:00",
            "\u{3000}full\u{3000}width\u{3000}space\r\n",
            "a\u{0}b\u{7}\n\nc",
            "－－ ——  ––",
            "line1\nline2\r\nline3\u{85}end",
        ];
        for s in samples {
            let once = TimestampExtractor::normalize(s);
            assert_eq!(TimestampExtractor::normalize(&once), once, "input {:?}", s);
        }
    }

    #[test]
    fn test_extract_from_noisy_text() {
        assert_eq!(
            TimestampExtractor::extract("Raw: 2024-12-05 09:30:00 camera1"),
            Ok(ts("2024-12-05 09:30:00"))
        );
    }

    #[test]
    fn test_extract_after_normalization() {
        assert_eq!(
            TimestampExtractor::extract("2024—12—05  09:30:00"),
            Ok(ts("2024-12-05 09:30:00"))
        );
        assert_eq!(
            TimestampExtractor::extract("2024-12-05\n09:30:00\n"),
            Ok(ts("2024-12-05 09:30:00"))
        );
    }

    #[test]
    fn test_extract_not_found() {
        assert_eq!(
            TimestampExtractor::extract("no timestamp here"),
            Err(ClockError::NotFound)
        );
        assert_eq!(TimestampExtractor::extract(""), Err(ClockError::NotFound));
        assert_eq!(
            TimestampExtractor::extract("\u{0}\u{1b}[0m\u{7f}"),
            Err(ClockError::NotFound)
        );
        assert_eq!(
            TimestampExtractor::extract("2024-12-05 9:30:00"),
            Err(ClockError::NotFound)
        );
    }

    #[test]
    fn test_extract_invalid_calendar_values() {
        assert_eq!(
            TimestampExtractor::extract("2024-13-40 25:61:61"),
            Err(ClockError::NotFound)
        );
    }

    #[test]
    fn test_extract_uses_first_match_only() {
        assert_eq!(
            TimestampExtractor::extract("2024-12-05 09:30:00 / 2025-01-01 00:00:00"),
            Ok(ts("2024-12-05 09:30:00"))
        );
        // 第一个匹配非法时不回退到后续匹配
        assert_eq!(
            TimestampExtractor::extract("2024-13-05 09:30:00 2024-12-05 09:30:00"),
            Err(ClockError::NotFound)
        );
    }

    #[test]
    fn test_extract_ignores_non_ascii_digits() {
        assert_eq!(
            TimestampExtractor::extract("２０２４-12-05 09:30:00"),
            Err(ClockError::NotFound)
        );
    }
}
