//! Field tokenization and cleaning for a single logical line.

/// Tokenizer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldState {
    Normal,
    InQuote,
}

/// Split one logical line into raw, trimmed fields.
///
/// Commas inside a quoted span are content. Quote characters are kept in the
/// raw field so [`clean_field`] can tell quoted cells apart. The last field is
/// emitted even without a trailing comma, so the result is never empty.
pub fn tokenize_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut state = FieldState::Normal;

    for c in line.chars() {
        match (c, state) {
            ('"', FieldState::Normal) => {
                state = FieldState::InQuote;
                field.push(c);
            }
            ('"', FieldState::InQuote) => {
                state = FieldState::Normal;
                field.push(c);
            }
            (',', FieldState::Normal) => {
                fields.push(field.trim().to_string());
                field.clear();
            }
            _ => field.push(c),
        }
    }
    fields.push(field.trim().to_string());

    fields
}

/// Strip surrounding quotes and unescape doubled quotes.
///
/// Only fields that both start and end with `"` are touched; anything else
/// passes through unchanged.
///
/// # Example
/// ```
/// use tripboard::parser::clean_field;
///
/// assert_eq!(clean_field(r#""Sake ""Tasting"" Room""#), r#"Sake "Tasting" Room"#);
/// assert_eq!(clean_field("plain"), "plain");
/// ```
pub fn clean_field(raw: &str) -> String {
    if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') {
        raw[1..raw.len() - 1].replace("\"\"", "\"")
    } else {
        raw.to_string()
    }
}

/// Tokenize a line and clean every field.
pub fn split_fields(line: &str) -> Vec<String> {
    tokenize_fields(line)
        .iter()
        .map(|raw| clean_field(raw))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_split() {
        assert_eq!(tokenize_fields("a,b,c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_empty_fields_preserved() {
        assert_eq!(tokenize_fields("a,,c,"), vec!["a", "", "c", ""]);
        assert_eq!(tokenize_fields(""), vec![""]);
    }

    #[test]
    fn test_fields_trimmed() {
        assert_eq!(tokenize_fields("  a , b  "), vec!["a", "b"]);
    }

    #[test]
    fn test_comma_inside_quotes() {
        let fields = tokenize_fields(r#"Ramen,Day1,"https://a.com, https://b.com",x"#);
        assert_eq!(fields.len(), 4);
        assert_eq!(fields[2], r#""https://a.com, https://b.com""#);
    }

    #[test]
    fn test_embedded_newline_kept() {
        let fields = tokenize_fields("a,\"one\ntwo\",b");
        assert_eq!(fields, vec!["a", "\"one\ntwo\"", "b"]);
    }

    #[test]
    fn test_clean_unescapes_doubled_quotes() {
        assert_eq!(clean_field(r#""Sake ""Tasting"" Room""#), r#"Sake "Tasting" Room"#);
    }

    #[test]
    fn test_clean_keeps_inner_whitespace() {
        assert_eq!(clean_field("\"  padded \""), "  padded ");
    }

    #[test]
    fn test_clean_unquoted_passthrough() {
        // Not wrapped on both sides: left alone, doubled quotes included
        assert_eq!(clean_field(r#"say ""hi"""#), r#"say ""hi"""#);
        assert_eq!(clean_field("\""), "\"");
        assert_eq!(clean_field("\"\""), "");
    }

    #[test]
    fn test_split_fields_with_escapes() {
        let fields = split_fields(r#""Sake ""Tasting"" Room",Day3,,"a, b""#);
        assert_eq!(fields, vec![r#"Sake "Tasting" Room"#, "Day3", "", "a, b"]);
    }
}
