//! Reading source files as text
//!
//! Files are tried as BOM-tagged text first, then strict UTF-8. Anything else
//! goes through `chardetng` to guess a legacy encoding, which `encoding_rs`
//! then decodes.

use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};
use std::fs;
use std::path::Path;

use crate::error::{DatasetError, Result};

/// Text content of a file plus how it was obtained
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedText {
    pub text: String,
    pub encoding: &'static str,
    /// True when the encoding came from detection rather than BOM/UTF-8
    pub fallback: bool,
    /// Detector confidence; always true for BOM and UTF-8 reads
    pub confident: bool,
}

/// Read a file from disk and decode it
pub fn read_source_file(path: &Path) -> Result<DecodedText> {
    let bytes = fs::read(path).map_err(|e| DatasetError::io(path, e))?;
    decode_bytes(path, &bytes)
}

/// Decode raw bytes; `path` is only used for error messages
pub fn decode_bytes(path: &Path, bytes: &[u8]) -> Result<DecodedText> {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        return decode_strict(path, encoding, &bytes[bom_len..], false, true);
    }

    if let Ok(text) = std::str::from_utf8(bytes) {
        return Ok(DecodedText {
            text: text.to_string(),
            encoding: UTF_8.name(),
            fallback: false,
            confident: true,
        });
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let (encoding, confident) = detector.guess_assess(None, true);

    decode_strict(path, encoding, bytes, true, confident)
}

fn decode_strict(
    path: &Path,
    encoding: &'static Encoding,
    bytes: &[u8],
    fallback: bool,
    confident: bool,
) -> Result<DecodedText> {
    let (decoded, had_errors) = encoding.decode_without_bom_handling(bytes);
    if had_errors {
        return Err(DatasetError::Decode {
            path: path.to_path_buf(),
            encoding: encoding.name(),
        });
    }

    Ok(DecodedText {
        text: decoded.into_owned(),
        encoding: encoding.name(),
        fallback,
        confident,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf8_passthrough() {
        let decoded = decode_bytes(Path::new("a.py"), "print('héllo')\n".as_bytes()).unwrap();
        assert_eq!(decoded.text, "print('héllo')\n");
        assert_eq!(decoded.encoding, "UTF-8");
        assert!(!decoded.fallback);
    }

    #[test]
    fn test_utf8_bom_is_stripped() {
        let decoded = decode_bytes(Path::new("a.py"), b"\xEF\xBB\xBFx = 1").unwrap();
        assert_eq!(decoded.text, "x = 1");
        assert!(!decoded.fallback);
    }

    #[test]
    fn test_utf16le_bom() {
        let mut bytes = vec![0xFF, 0xFE];
        for unit in "hi".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        let decoded = decode_bytes(Path::new("a.py"), &bytes).unwrap();
        assert_eq!(decoded.text, "hi");
        assert_eq!(decoded.encoding, "UTF-16LE");
    }

    #[test]
    fn test_legacy_encoding_falls_back_to_detection() {
        let (bytes, _, _) = encoding_rs::WINDOWS_1252.encode(
            "# Café crème, déjà vu à la française\nnom = 'élève'\nprint(nom)\n",
        );
        let decoded = decode_bytes(Path::new("a.py"), &bytes).unwrap();
        assert!(decoded.fallback);
        assert_ne!(decoded.encoding, "UTF-8");
        assert!(decoded.text.contains("print(nom)"));
    }

    #[test]
    fn test_read_missing_file() {
        let result = read_source_file(Path::new("/nonexistent/file.py"));
        assert!(matches!(result, Err(DatasetError::Io { .. })));
    }
}
