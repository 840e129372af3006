mod csv;
mod xlsx;

pub use self::csv::CsvTableParser;
pub use xlsx::parse_workbook;

use encoding_rs::WINDOWS_1252;

/// Decode upload bytes: UTF-8 when valid, Windows-1252 otherwise.
pub fn decode_bytes(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => {
            let (text, _, _) = WINDOWS_1252.decode(bytes);
            text.into_owned()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_utf8_passthrough() {
        assert_eq!(decode_bytes("héllo".as_bytes()), "héllo");
    }

    #[test]
    fn test_decode_windows_1252_fallback() {
        assert_eq!(decode_bytes(b"Jos\xe9"), "Jos\u{e9}");
    }
}
