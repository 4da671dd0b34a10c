//! Serialize records back to itinerary CSV or JSON.
//!
//! Quoting mirrors the parser's cleaning step: a field is quoted only when
//! the parser would otherwise change it (delimiter, quote, line break, or
//! surrounding whitespace that trimming would drop). Parsing the output
//! yields the same record content.

use crate::models::{ActivityRecord, COLUMNS};

fn needs_quotes(field: &str) -> bool {
    field.contains(&[',', '"', '\n', '\r'][..]) || field.trim() != field
}

/// Quote a single field if needed, doubling inner quotes.
pub fn quote_field(field: &str) -> String {
    if needs_quotes(field) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// One CSV line for a record (no terminator).
pub fn to_csv_line(record: &ActivityRecord) -> String {
    record
        .columns()
        .iter()
        .map(|f| quote_field(f))
        .collect::<Vec<_>>()
        .join(",")
}

/// Header plus one `\n`-terminated line per record.
pub fn to_csv(records: &[ActivityRecord]) -> String {
    let mut out = COLUMNS.join(",");
    out.push('\n');
    for record in records {
        out.push_str(&to_csv_line(record));
        out.push('\n');
    }
    out
}

/// Pretty-printed JSON array.
pub fn to_json(records: &[ActivityRecord]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_records;
    use proptest::prelude::*;

    fn record(name: &str, notes: &str) -> ActivityRecord {
        ActivityRecord {
            id: "event-1".into(),
            name: name.into(),
            day: "Day1".into(),
            link: "https://a.com, https://maps.app.goo.gl/x".into(),
            notes: notes.into(),
            price: "¥900".into(),
            time_frame: "12:00-13:00".into(),
            activity_type: "Food".into(),
        }
    }

    fn content(r: &ActivityRecord) -> [String; 7] {
        r.columns().map(String::from)
    }

    #[test]
    fn test_quote_field() {
        assert_eq!(quote_field("plain"), "plain");
        assert_eq!(quote_field(""), "");
        assert_eq!(quote_field("a, b"), "\"a, b\"");
        assert_eq!(quote_field(r#"Sake "Tasting" Room"#), r#""Sake ""Tasting"" Room""#);
        assert_eq!(quote_field("one\ntwo"), "\"one\ntwo\"");
        assert_eq!(quote_field(" padded"), "\" padded\"");
    }

    #[test]
    fn test_csv_layout() {
        let csv = to_csv(&[record("Ichiran Ramen", "Great ramen!")]);
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("Name,Day,Link,Notes,Price,Time Frame,Type"));
        assert_eq!(
            lines.next(),
            Some(r#"Ichiran Ramen,Day1,"https://a.com, https://maps.app.goo.gl/x",Great ramen!,¥900,12:00-13:00,Food"#)
        );
    }

    #[test]
    fn test_roundtrip_tricky_content() {
        let records = vec![
            record(r#"Sake "Tasting" Room"#, "line one\nline two, with comma"),
            record("Yatai", "  spaced  "),
            record("\"quoted\"", "ends with quote\""),
        ];
        let reparsed = parse_records(&to_csv(&records));

        assert_eq!(reparsed.len(), records.len());
        for (a, b) in records.iter().zip(&reparsed) {
            assert_eq!(content(a), content(b));
        }
    }

    #[test]
    fn test_json_keys() {
        let json = to_json(&[record("x", "")]).unwrap();
        assert!(json.contains("\"timeFrame\""));
        assert!(json.contains("\"type\": \"Food\""));
    }

    fn cell() -> impl Strategy<Value = String> {
        prop::string::string_regex("[a-zA-Z0-9 ,\"\n¥:/.-]{0,12}").unwrap()
    }

    proptest! {
        #[test]
        fn prop_parse_export_parse_is_stable(
            rows in prop::collection::vec(prop::collection::vec(cell(), 7), 0..8)
        ) {
            let payload = {
                let mut s = COLUMNS.join(",");
                for (i, row) in rows.iter().enumerate() {
                    s.push('\n');
                    s.push_str(&format!("{},Day{}", quote_field(&row[0]), i + 1));
                    for f in &row[2..] {
                        s.push(',');
                        s.push_str(&quote_field(f));
                    }
                }
                s
            };

            let first = parse_records(&payload);
            let second = parse_records(&to_csv(&first));

            prop_assert_eq!(first.len(), second.len());
            for (a, b) in first.iter().zip(&second) {
                prop_assert_eq!(content(a), content(b));
            }
        }
    }
}
