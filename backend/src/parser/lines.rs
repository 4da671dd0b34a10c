//! Logical line segmentation.
//!
//! A line break only ends a line when it sits outside a quoted span, so a
//! quoted notes cell that spans several physical lines stays in one row.

/// Segmenter state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineState {
    Normal,
    InQuote,
}

impl LineState {
    fn toggle(self) -> Self {
        match self {
            LineState::Normal => LineState::InQuote,
            LineState::InQuote => LineState::Normal,
        }
    }
}

/// Split a payload into logical lines.
///
/// Every `"` toggles the quote state, escaped or not: `""` toggles twice and
/// leaves the state unchanged. Escapes are resolved later by the field
/// cleaner. An unterminated quote swallows the rest of the payload into the
/// last line. Empty lines are not emitted from the trailing accumulator, so a
/// final `\n` does not produce an extra empty line.
///
/// # Example
/// ```
/// use tripboard::parser::split_logical_lines;
///
/// let lines = split_logical_lines("a,b\n\"x\ny\",z\n");
/// assert_eq!(lines, vec!["a,b", "\"x\ny\",z"]);
/// ```
pub fn split_logical_lines(payload: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut state = LineState::Normal;

    for c in payload.chars() {
        match (c, state) {
            ('\n', LineState::Normal) => {
                lines.push(std::mem::take(&mut current));
            }
            ('"', _) => {
                state = state.toggle();
                current.push(c);
            }
            _ => current.push(c),
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_payload() {
        assert!(split_logical_lines("").is_empty());
    }

    #[test]
    fn test_plain_lines() {
        let lines = split_logical_lines("h1,h2\na,b\nc,d");
        assert_eq!(lines, vec!["h1,h2", "a,b", "c,d"]);
    }

    #[test]
    fn test_trailing_newline_not_emitted() {
        let lines = split_logical_lines("h\na\n");
        assert_eq!(lines, vec!["h", "a"]);
    }

    #[test]
    fn test_blank_lines_in_middle_kept() {
        let lines = split_logical_lines("h\n\na");
        assert_eq!(lines, vec!["h", "", "a"]);
    }

    #[test]
    fn test_newline_inside_quotes_is_content() {
        let lines = split_logical_lines("h\nTrain,Day1,,\"line one\nline two\",x\nnext,Day2");
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "Train,Day1,,\"line one\nline two\",x");
        assert_eq!(lines[2], "next,Day2");
    }

    #[test]
    fn test_doubled_quotes_keep_state() {
        // `""` toggles twice, so the break after it is still inside the quote
        let lines = split_logical_lines("\"say \"\"hi\"\"\nthere\"\nnext");
        assert_eq!(lines, vec!["\"say \"\"hi\"\"\nthere\"", "next"]);
    }

    #[test]
    fn test_unterminated_quote_absorbs_rest() {
        let lines = split_logical_lines("h\n\"open\nstill open\nend");
        assert_eq!(lines, vec!["h", "\"open\nstill open\nend"]);
    }

    #[test]
    fn test_crlf_kept_as_content() {
        let lines = split_logical_lines("h\r\na,b\r\n");
        assert_eq!(lines, vec!["h\r", "a,b\r"]);
    }
}
