//! Payload sources with encoding auto-detection.
//!
//! Turns a file, an uploaded byte buffer or a published sheet URL into the
//! text the parser consumes. Nothing here knows about itinerary columns.

use std::path::Path;

use crate::api::logs::log_warning;
use crate::error::{SourceError, SourceResult};

const UTF8_BOM: &str = "\u{feff}";

/// Decoded payload with metadata
#[derive(Debug, Clone)]
pub struct Payload {
    /// Decoded text
    pub text: String,
    /// Detected encoding
    pub encoding: String,
    /// Raw size in bytes
    pub bytes: usize,
}

/// Detect the encoding of raw bytes using chardet
pub fn detect_encoding(bytes: &[u8]) -> String {
    let result = chardet::detect(bytes);
    let charset = result.0;

    // Normalize charset names
    match charset.to_lowercase().as_str() {
        "" | "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to string using the specified encoding.
///
/// Invalid UTF-8 is decoded lossily rather than rejected. Labels encoding_rs
/// cannot decode fall back to lossy UTF-8 with a warning. A leading byte
/// order mark is removed.
pub fn decode_content(bytes: &[u8], encoding: &str) -> String {
    let text = match encoding.to_lowercase().as_str() {
        "utf-8" | "utf8" | "ascii" => match std::str::from_utf8(bytes) {
            Ok(s) => s.to_string(),
            Err(_) => String::from_utf8_lossy(bytes).into_owned(),
        },
        "iso-8859-1" | "latin-1" | "latin1" => {
            encoding_rs::ISO_8859_15.decode(bytes).0.into_owned()
        }
        "windows-1252" | "cp1252" => encoding_rs::WINDOWS_1252.decode(bytes).0.into_owned(),
        other => match encoding_rs::Encoding::for_label(other.as_bytes()) {
            // REPLACEMENT would turn the whole payload into a single U+FFFD
            Some(enc) if enc != encoding_rs::REPLACEMENT => enc.decode(bytes).0.into_owned(),
            _ => {
                log_warning(format!("Unsupported encoding '{}', decoding as UTF-8", encoding));
                String::from_utf8_lossy(bytes).into_owned()
            }
        },
    };

    match text.strip_prefix(UTF8_BOM) {
        Some(rest) => rest.to_string(),
        None => text,
    }
}

/// Decode an in-memory payload, enforcing the size limit.
pub fn load_bytes(bytes: &[u8], max_bytes: usize) -> SourceResult<Payload> {
    if bytes.is_empty() {
        return Err(SourceError::EmptyPayload);
    }
    if bytes.len() > max_bytes {
        return Err(SourceError::TooLarge { size: bytes.len(), max: max_bytes });
    }

    // Valid UTF-8 wins over statistical detection
    let encoding = match std::str::from_utf8(bytes) {
        Ok(_) => "utf-8".to_string(),
        Err(_) => detect_encoding(bytes),
    };
    let text = decode_content(bytes, &encoding);

    Ok(Payload { text, encoding, bytes: bytes.len() })
}

/// Read and decode a payload file.
pub fn load_file<P: AsRef<Path>>(path: P, max_bytes: usize) -> SourceResult<Payload> {
    let bytes = std::fs::read(path.as_ref())?;
    load_bytes(&bytes, max_bytes)
}

/// Download a payload, e.g. a spreadsheet published as CSV.
pub async fn fetch_url(url: &str, max_bytes: usize) -> SourceResult<Payload> {
    let response = reqwest::get(url).await?;

    let status = response.status();
    if !status.is_success() {
        return Err(SourceError::Http(format!("{} returned {}", url, status)));
    }

    let bytes = response.bytes().await?;
    load_bytes(&bytes, max_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_utf8_roundtrip() {
        let payload = load_bytes("Name,Day\nRamen,Day1".as_bytes(), 1024).unwrap();
        assert_eq!(payload.encoding, "utf-8");
        assert_eq!(payload.text, "Name,Day\nRamen,Day1");
        assert_eq!(payload.bytes, 19);
    }

    #[test]
    fn test_utf8_preferred_over_detection() {
        let payload = load_bytes("博多ラーメン,Day1".as_bytes(), 1024).unwrap();
        assert_eq!(payload.encoding, "utf-8");
        assert_eq!(payload.text, "博多ラーメン,Day1");
    }

    #[test]
    fn test_bom_removed() {
        let bytes = "\u{feff}Name,Day".as_bytes();
        let text = decode_content(bytes, "utf-8");
        assert_eq!(text, "Name,Day");
    }

    #[test]
    fn test_latin1_decoding() {
        // "Café" in ISO-8859-1
        let bytes: &[u8] = &[0x43, 0x61, 0x66, 0xE9];
        let decoded = decode_content(bytes, "iso-8859-1");
        assert_eq!(decoded, "Café");
    }

    #[test]
    fn test_unknown_label_falls_back_to_utf8() {
        // chardet name with no encoding_rs label
        let decoded = decode_content(b"Name,Day\n\xff", "MacCyrillic");
        assert_eq!(decoded, "Name,Day\n\u{fffd}");
    }

    #[test]
    fn test_replacement_label_falls_back_to_utf8() {
        // encoding_rs maps these labels to the REPLACEMENT encoding
        for label in ["HZ-GB-2312", "ISO-2022-KR"] {
            let decoded = decode_content(b"Name,Day\nRamen,Day1", label);
            assert_eq!(decoded, "Name,Day\nRamen,Day1");
        }
    }

    #[test]
    fn test_undecodable_label_keeps_records() {
        let text = decode_content(b"Name,Day\nRamen,Day1,\xff", "IBM855");
        let report = crate::parser::parse_itinerary(&text);
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.records[0].name, "Ramen");
    }

    #[test]
    fn test_empty_rejected() {
        assert!(matches!(load_bytes(b"", 10), Err(SourceError::EmptyPayload)));
    }

    #[test]
    fn test_size_limit() {
        let result = load_bytes(b"0123456789", 4);
        assert!(matches!(result, Err(SourceError::TooLarge { size: 10, max: 4 })));
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "Name,Day\nOhori Park,Day2\n").unwrap();

        let payload = load_file(file.path(), 1024).unwrap();
        assert!(payload.text.contains("Ohori Park"));
    }

    #[test]
    fn test_missing_file() {
        let result = load_file("/definitely/not/here.csv", 1024);
        assert!(matches!(result, Err(SourceError::Io(_))));
    }
}
