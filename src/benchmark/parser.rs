//! Scraping of solution output
//!
//! Solutions print free-form text. Every field is optional: a missing field is
//! reported as `None`, never as an error.

use std::sync::LazyLock;

use regex::Regex;

static PART_ONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Part 1: (\d+)").expect("part 1 pattern is valid"));

static SINGLE_RESULT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Result: (\d+)").expect("result pattern is valid"));

static PART_TWO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Part 2: (\d+)").expect("part 2 pattern is valid"));

static COMPLETED_IN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Completed in (.+)").expect("completed pattern is valid"));

/// Fields scraped from one run's output
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedOutput {
    pub primary_answer: Option<String>,
    pub secondary_answer: Option<String>,
    pub elapsed: Option<String>,
}

/// Extract answers and the self-reported duration from captured output.
///
/// The primary answer falls back to a single `Result:` line for days with
/// only one part.
pub fn parse(raw: &str) -> ParsedOutput {
    ParsedOutput {
        primary_answer: first_capture(&PART_ONE, raw).or_else(|| first_capture(&SINGLE_RESULT, raw)),
        secondary_answer: first_capture(&PART_TWO, raw),
        elapsed: first_capture(&COMPLETED_IN, raw)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()),
    }
}

fn first_capture(pattern: &Regex, text: &str) -> Option<String> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_two_parts() {
        let out = "INFO Part 1: 42\nINFO Part 2: 1337\nINFO Completed in 8 ms\n";
        let parsed = parse(out);
        assert_eq!(parsed.primary_answer.as_deref(), Some("42"));
        assert_eq!(parsed.secondary_answer.as_deref(), Some("1337"));
        assert_eq!(parsed.elapsed.as_deref(), Some("8 ms"));
    }

    #[test]
    fn test_parse_any_order() {
        let out = "Completed in 1.234 s\r\nPart 2: 7\nPart 1: 3\n";
        let parsed = parse(out);
        assert_eq!(parsed.primary_answer.as_deref(), Some("3"));
        assert_eq!(parsed.secondary_answer.as_deref(), Some("7"));
        assert_eq!(parsed.elapsed.as_deref(), Some("1.234 s"));
    }

    #[test]
    fn test_parse_single_result() {
        let parsed = parse("Result: 99\nCompleted in 150 µs");
        assert_eq!(parsed.primary_answer.as_deref(), Some("99"));
        assert_eq!(parsed.secondary_answer, None);
        assert_eq!(parsed.elapsed.as_deref(), Some("150 µs"));
    }

    #[test]
    fn test_part_one_wins_over_result() {
        let parsed = parse("Result: 1\nPart 1: 2\n");
        assert_eq!(parsed.primary_answer.as_deref(), Some("2"));
    }

    #[test]
    fn test_parse_first_match() {
        let parsed = parse("Part 1: 10\nPart 1: 20\n");
        assert_eq!(parsed.primary_answer.as_deref(), Some("10"));
    }

    #[test]
    fn test_parse_missing_fields() {
        let parsed = parse("Error reading input: no such file\n");
        assert_eq!(parsed, ParsedOutput::default());
    }
}
