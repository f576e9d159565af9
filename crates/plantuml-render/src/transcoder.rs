//! URL payload encoding for remote PlantUML servers.
//!
//! The remote server receives the diagram source compressed and encoded as
//! a URL path segment. The documented "text encoding" is raw DEFLATE
//! followed by the PlantUML base64-like alphabet. A second, Huffman-based
//! encoding exists in the wild (payloads prefixed with `~1`); it is only
//! decodable with the compression table shipped inside PlantUML itself,
//! which is not reproduced here. Selecting [`Transcoder::Huffman`] fails
//! with a descriptive error instead of emitting payloads no server can
//! decode, and `decode` rejects `~1` payloads for the same reason.

use std::io::{Read, Write};

use flate2::Compression;
use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;
use serde::Deserialize;

/// PlantUML's URL-safe alphabet (not the RFC 4648 one).
const ALPHABET: &[u8; 64] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz-_";

/// Prefix marking a Huffman-compressed payload.
const HUFFMAN_PREFIX: &str = "~1";

/// Payload encoding failure.
#[derive(Debug, thiserror::Error)]
pub enum TranscodeError {
    #[error("compression failed: {0}")]
    Compress(#[from] std::io::Error),
    #[error("invalid character {0:?} in encoded payload")]
    InvalidChar(char),
    #[error("truncated encoded payload")]
    Truncated,
    #[error("decoded payload is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
    #[error(
        "huffman payloads require the compression table shipped with PlantUML; \
         use the deflate text encoding"
    )]
    HuffmanUnsupported,
}

/// Compression/encoding strategy for remote payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transcoder {
    /// Raw DEFLATE + PlantUML alphabet (default).
    #[default]
    Deflate,
    /// Static Huffman + PlantUML alphabet, `~1` prefix. Recognized but
    /// rejected at encode time; see the module docs.
    Huffman,
}

impl Transcoder {
    /// Encode diagram source into a URL path segment.
    pub fn encode(self, text: &str) -> Result<String, TranscodeError> {
        match self {
            Self::Deflate => Ok(encode64(&deflate(text)?)),
            Self::Huffman => Err(TranscodeError::HuffmanUnsupported),
        }
    }

    /// Decode a DEFLATE payload.
    ///
    /// Payloads with the `~1` prefix are Huffman-compressed and rejected.
    pub fn decode(payload: &str) -> Result<String, TranscodeError> {
        if payload.starts_with(HUFFMAN_PREFIX) {
            return Err(TranscodeError::HuffmanUnsupported);
        }
        let bytes = decode64(payload)?;
        Ok(String::from_utf8(inflate(&bytes)?)?)
    }
}

/// Compress with raw DEFLATE at best compression (no zlib header).
fn deflate(text: &str) -> std::io::Result<Vec<u8>> {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(text.as_bytes())?;
    encoder.finish()
}

/// Decompress raw DEFLATE, ignoring trailing padding bytes.
fn inflate(data: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut decoder = DeflateDecoder::new(data);
    let mut out = Vec::new();
    decoder.read_to_end(&mut out)?;
    Ok(out)
}

/// Encode bytes with the PlantUML alphabet, 3 bytes to 4 characters.
///
/// Partial trailing groups are zero-padded rather than `=`-padded; the
/// decompressor stops at end of stream so the padding is harmless.
fn encode64(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len().div_ceil(3) * 4);
    for chunk in data.chunks(3) {
        let b1 = chunk[0];
        let b2 = chunk.get(1).copied().unwrap_or(0);
        let b3 = chunk.get(2).copied().unwrap_or(0);
        out.push(ALPHABET[usize::from(b1 >> 2)] as char);
        out.push(ALPHABET[usize::from(((b1 & 0x3) << 4) | (b2 >> 4))] as char);
        out.push(ALPHABET[usize::from(((b2 & 0xF) << 2) | (b3 >> 6))] as char);
        out.push(ALPHABET[usize::from(b3 & 0x3F)] as char);
    }
    out
}

/// Inverse of [`encode64`].
fn decode64(text: &str) -> Result<Vec<u8>, TranscodeError> {
    if text.len() % 4 != 0 {
        return Err(TranscodeError::Truncated);
    }
    let mut values = Vec::with_capacity(text.len());
    for ch in text.chars() {
        values.push(decode_char(ch)?);
    }
    let mut out = Vec::with_capacity(values.len() / 4 * 3);
    for group in values.chunks_exact(4) {
        out.push((group[0] << 2) | (group[1] >> 4));
        out.push((group[1] << 4) | (group[2] >> 2));
        out.push((group[2] << 6) | group[3]);
    }
    Ok(out)
}

/// Six-bit value for one alphabet character.
fn decode_char(ch: char) -> Result<u8, TranscodeError> {
    match ch {
        '0'..='9' => Ok(ch as u8 - b'0'),
        'A'..='Z' => Ok(ch as u8 - b'A' + 10),
        'a'..='z' => Ok(ch as u8 - b'a' + 36),
        '-' => Ok(62),
        '_' => Ok(63),
        _ => Err(TranscodeError::InvalidChar(ch)),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const SAMPLE: &str = "@startuml\nBob -> Alice : hello\n@enduml";

    #[test]
    fn test_deflate_round_trip() {
        let encoded = Transcoder::Deflate.encode(SAMPLE).unwrap();
        assert_eq!(Transcoder::decode(&encoded).unwrap(), SAMPLE);
    }

    #[test]
    fn test_payload_is_url_safe() {
        let encoded = Transcoder::Deflate.encode(SAMPLE).unwrap();
        assert!(
            encoded.bytes().all(|b| ALPHABET.contains(&b)),
            "non-alphabet byte in payload: {encoded}"
        );
    }

    #[test]
    fn test_encoding_is_deterministic() {
        assert_eq!(
            Transcoder::Deflate.encode(SAMPLE).unwrap(),
            Transcoder::Deflate.encode(SAMPLE).unwrap()
        );
    }

    #[test]
    fn test_empty_input() {
        let encoded = Transcoder::Deflate.encode("").unwrap();
        assert_eq!(Transcoder::decode(&encoded).unwrap(), "");
    }

    #[test]
    fn test_multibyte_input_round_trips() {
        let source = "@startuml\nAlice -> Bob : héllo ✓\n@enduml";
        let encoded = Transcoder::Deflate.encode(source).unwrap();
        assert_eq!(Transcoder::decode(&encoded).unwrap(), source);
    }

    #[test]
    fn test_huffman_encoding_is_rejected() {
        let result = Transcoder::Huffman.encode(SAMPLE);
        assert!(matches!(result, Err(TranscodeError::HuffmanUnsupported)));
    }

    #[test]
    fn test_huffman_payload_is_rejected_on_decode() {
        let result = Transcoder::decode("~1abcd");
        assert!(matches!(result, Err(TranscodeError::HuffmanUnsupported)));
    }

    #[test]
    fn test_decode_rejects_invalid_characters() {
        let result = Transcoder::decode("ab!d");
        assert!(matches!(result, Err(TranscodeError::InvalidChar('!'))));
    }

    #[test]
    fn test_decode_rejects_truncated_payload() {
        let result = Transcoder::decode("abc");
        assert!(matches!(result, Err(TranscodeError::Truncated)));
    }

    #[test]
    fn test_encode64_known_alphabet_positions() {
        // 0x00 0x10 0x83 spans the 6-bit values 0, 1, 2, 3.
        assert_eq!(encode64(&[0x00, 0x10, 0x83]), "0123");
    }
}
