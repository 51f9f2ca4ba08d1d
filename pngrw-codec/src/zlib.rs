//! zlib compression seam for the compressed text sub-formats

use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use pngrw_format::{PngrwError, Result};
use std::io::{Read, Write};

/// Inflate a zlib stream. Fails on a corrupt or truncated stream.
pub fn inflate(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    ZlibDecoder::new(bytes)
        .read_to_end(&mut out)
        .map_err(|e| PngrwError::Inflate(e.to_string()))?;
    Ok(out)
}

/// Deflate bytes into a zlib stream.
///
/// The sink is an in-memory Vec, so the only failure path is the encoder
/// itself misbehaving; callers propagate it like any other chunk error.
pub fn deflate(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(bytes)?;
    Ok(encoder.finish()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let input = "{\"name\":\"\u{4f3a}\"}".as_bytes();
        let compressed = deflate(input).unwrap();
        assert_eq!(inflate(&compressed).unwrap(), input);
    }

    #[test]
    fn test_inflate_rejects_garbage() {
        match inflate(b"definitely not zlib") {
            Err(PngrwError::Inflate(_)) => {}
            other => panic!("expected Inflate error, got {other:?}"),
        }
    }

    #[test]
    fn test_inflate_rejects_truncated_stream() {
        let compressed = deflate(b"some reasonably long input text to compress").unwrap();
        assert!(inflate(&compressed[..compressed.len() / 2]).is_err());
    }

    #[test]
    fn test_deflate_empty() {
        let compressed = deflate(b"").unwrap();
        assert_eq!(inflate(&compressed).unwrap(), b"");
    }
}
