//! Text normalization shared by every format

/// Normalize extracted text
///
/// - CRLF / CR become LF
/// - runs of spaces and tabs collapse to a single space, lines are trimmed
/// - more than one consecutive blank line collapses to one
/// - NUL and U+FFFD are dropped
pub fn clean_text(text: &str) -> String {
    let normalized = text
        .replace("\r\n", "\n")
        .replace('\r', "\n")
        .replace(['\0', '\u{fffd}'], "");

    let mut out = String::with_capacity(normalized.len());
    let mut blank_run = 0usize;

    for line in normalized.lines() {
        let collapsed = line.split_whitespace().collect::<Vec<_>>().join(" ");
        if collapsed.is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
        } else {
            blank_run = 0;
        }
        out.push_str(&collapsed);
        out.push('\n');
    }

    out.trim().to_string()
}

/// Check that extracted text is usable for analysis
///
/// Fails when the trimmed text is shorter than `min_length` characters or
/// when less than half of it is alphanumeric or whitespace (garbage from a
/// scanned PDF, binary misdeclared as text).
pub fn validate_text(text: &str, min_length: usize) -> bool {
    let trimmed = text.trim();
    let total = trimmed.chars().count();
    if total == 0 || total < min_length {
        return false;
    }

    let readable = trimmed
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .count();
    readable * 2 >= total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_collapses_whitespace() {
        assert_eq!(clean_text("a   b\t\tc"), "a b c");
    }

    #[test]
    fn test_clean_normalizes_line_breaks() {
        assert_eq!(clean_text("one\r\ntwo\rthree"), "one\ntwo\nthree");
    }

    #[test]
    fn test_clean_collapses_blank_lines() {
        assert_eq!(clean_text("para one\n\n\n\n\npara two"), "para one\n\npara two");
    }

    #[test]
    fn test_clean_strips_problem_characters() {
        assert_eq!(clean_text("ren\0t \u{fffd}due"), "rent due");
    }

    #[test]
    fn test_validate_length() {
        assert!(!validate_text("short", 100));
        assert!(validate_text(&"word ".repeat(30), 100));
        assert!(!validate_text("   ", 0));
    }

    #[test]
    fn test_validate_rejects_garbage() {
        let garbage = "#$%^&*()!@".repeat(20);
        assert!(!validate_text(&garbage, 10));
    }
}
