//! Transport decompression of fetched bodies
//!
//! Reverses the `Content-Encoding` a server applied to a response body.
//! Only the schemes a browser-like request advertises (`gzip`, `deflate`)
//! are handled; anything else is passed through untouched.

use flate2::read::{DeflateDecoder, GzDecoder, ZlibDecoder};
use std::io::Read;
use thiserror::Error;

/// Compression scheme declared by the transport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentEncoding {
    Identity,
    Gzip,
    Deflate,
}

impl ContentEncoding {
    /// Parse a `Content-Encoding` header value (case-insensitive).
    ///
    /// Absent or unknown schemes map to [`ContentEncoding::Identity`].
    #[must_use]
    pub fn from_header(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("gzip" | "x-gzip") => Self::Gzip,
            Some("deflate") => Self::Deflate,
            _ => Self::Identity,
        }
    }
}

/// Malformed compressed payload
#[derive(Debug, Error)]
#[error("failed to decode {scheme} body: {source}")]
pub struct DecodeError {
    pub scheme: &'static str,
    #[source]
    pub source: std::io::Error,
}

/// Decode `body` according to `encoding`.
///
/// Identity bodies are returned byte-for-byte. A corrupt gzip/deflate stream
/// fails as a whole; no partial output is returned.
pub fn decode_body(body: &[u8], encoding: ContentEncoding) -> Result<Vec<u8>, DecodeError> {
    match encoding {
        ContentEncoding::Identity => Ok(body.to_vec()),
        ContentEncoding::Gzip => read_all(GzDecoder::new(body), "gzip"),
        ContentEncoding::Deflate => {
            // "deflate" in the wild is either zlib-wrapped (RFC 1950) or raw (RFC 1951)
            if has_zlib_header(body) {
                read_all(ZlibDecoder::new(body), "deflate")
            } else {
                read_all(DeflateDecoder::new(body), "deflate")
            }
        }
    }
}

fn read_all(mut reader: impl Read, scheme: &'static str) -> Result<Vec<u8>, DecodeError> {
    let mut out = Vec::new();
    reader
        .read_to_end(&mut out)
        .map_err(|source| DecodeError { scheme, source })?;
    Ok(out)
}

/// CMF/FLG check from RFC 1950 section 2.2
fn has_zlib_header(body: &[u8]) -> bool {
    match body {
        [cmf, flg, ..] => cmf & 0x0f == 8 && (u16::from(*cmf) << 8 | u16::from(*flg)) % 31 == 0,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::Compression;
    use flate2::write::{DeflateEncoder, GzEncoder, ZlibEncoder};
    use std::io::Write;

    const HTML: &[u8] = b"<html><title>Hi</title></html>";

    #[test]
    fn header_matching_is_case_insensitive() {
        assert_eq!(ContentEncoding::from_header(Some("GZIP")), ContentEncoding::Gzip);
        assert_eq!(ContentEncoding::from_header(Some(" Deflate ")), ContentEncoding::Deflate);
        assert_eq!(ContentEncoding::from_header(Some("br")), ContentEncoding::Identity);
        assert_eq!(ContentEncoding::from_header(None), ContentEncoding::Identity);
    }

    #[test]
    fn identity_passes_bytes_through() {
        let raw = [0u8, 159, 146, 150, b'x'];
        assert_eq!(decode_body(&raw, ContentEncoding::Identity).unwrap(), raw);
    }

    #[test]
    fn gzip_round_trip() {
        let mut enc = GzEncoder::new(Vec::new(), Compression::default());
        enc.write_all(HTML).unwrap();
        let gz = enc.finish().unwrap();
        assert_eq!(decode_body(&gz, ContentEncoding::Gzip).unwrap(), HTML);
    }

    #[test]
    fn deflate_accepts_raw_and_zlib_streams() {
        let mut raw = DeflateEncoder::new(Vec::new(), Compression::default());
        raw.write_all(HTML).unwrap();
        let raw = raw.finish().unwrap();
        assert_eq!(decode_body(&raw, ContentEncoding::Deflate).unwrap(), HTML);

        let mut zlib = ZlibEncoder::new(Vec::new(), Compression::default());
        zlib.write_all(HTML).unwrap();
        let zlib = zlib.finish().unwrap();
        assert_eq!(decode_body(&zlib, ContentEncoding::Deflate).unwrap(), HTML);
    }

    #[test]
    fn corrupt_gzip_is_an_error() {
        let err = decode_body(b"definitely not gzip", ContentEncoding::Gzip).unwrap_err();
        assert_eq!(err.scheme, "gzip");
    }
}
