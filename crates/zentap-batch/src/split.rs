//! Heuristic field splitting of raw generation text.

use crate::types::StructuredOutput;

const MAX_CLOSING_LEN: usize = 80;
const CLOSING_TAIL_WORDS: usize = 8;

/// Split raw generation text into the four structured fields.
///
/// The first three non-empty lines become status, trend and warning; the
/// last non-empty line becomes the closing. When the closing is missing,
/// overly long, or just repeats the status, the last eight words of the
/// whole text stand in for it.
pub fn split_into_fields(raw: &str) -> StructuredOutput {
    let lines: Vec<&str> = raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let line_at = |index: usize| lines.get(index).copied().unwrap_or_default().to_string();
    let status = line_at(0);
    let trend = line_at(1);
    let warning = line_at(2);

    let mut closing = lines.last().copied().unwrap_or_default().to_string();
    if closing.is_empty() || closing.chars().count() > MAX_CLOSING_LEN || closing == status {
        closing = tail_words(raw, CLOSING_TAIL_WORDS);
    }

    StructuredOutput {
        status,
        trend,
        warning,
        closing,
    }
}

fn tail_words(text: &str, count: usize) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    let start = words.len().saturating_sub(count);
    words[start..].join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_distinct_lines_map_in_order() {
        let out = split_into_fields("steady\nrising\nmind the gap\nall ends well");
        assert_eq!(out.status, "steady");
        assert_eq!(out.trend, "rising");
        assert_eq!(out.warning, "mind the gap");
        assert_eq!(out.closing, "all ends well");
    }

    #[test]
    fn blank_lines_are_ignored() {
        let out = split_into_fields("steady\n\n  rising  \n\nwatch out\n\nfarewell\n");
        assert_eq!(out.status, "steady");
        assert_eq!(out.trend, "rising");
        assert_eq!(out.warning, "watch out");
        assert_eq!(out.closing, "farewell");
    }

    #[test]
    fn missing_lines_leave_empty_fields() {
        let out = split_into_fields("only line");
        assert_eq!(out.status, "only line");
        assert_eq!(out.trend, "");
        assert_eq!(out.warning, "");
    }

    #[test]
    fn single_line_closing_falls_back_to_tail_words() {
        // The only line is also the status, so the closing falls back.
        let out = split_into_fields("one two three four five six seven eight nine ten");
        assert_eq!(out.closing, "three four five six seven eight nine ten");
    }

    #[test]
    fn long_closing_falls_back_to_tail_words() {
        let long_line = "x".repeat(120);
        let raw = format!("status\ntrend\nwarning\n{long_line} ends here");
        let out = split_into_fields(&raw);
        assert!(out.closing.split_whitespace().count() <= 8);
        assert!(out.closing.ends_with("ends here"));
    }

    #[test]
    fn empty_input_yields_empty_fields() {
        let out = split_into_fields("");
        assert_eq!(out, StructuredOutput::default());
    }
}
