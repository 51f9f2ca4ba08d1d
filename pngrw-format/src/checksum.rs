//! CRC-32 checksum utilities
//!
//! PNG mandates CRC-32/ISO-HDLC over the chunk tag and data, stored
//! big-endian after the data field.

/// Compute the chunk CRC over `tag ++ data`.
pub fn chunk_crc32(tag: &[u8; 4], data: &[u8]) -> u32 {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(tag);
    hasher.update(data);
    hasher.finalize()
}

/// Verify a stored chunk CRC against the tag and data it covers.
pub fn verify_chunk_crc32(
    tag: &[u8; 4],
    data: &[u8],
    expected: u32,
) -> Result<(), crate::error::PngrwError> {
    let actual = chunk_crc32(tag, data);
    if actual == expected {
        Ok(())
    } else {
        Err(crate::error::PngrwError::ChecksumMismatch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_crc_value() {
        // CRC-32/ISO-HDLC of "IEND" with no data, the fixed trailer of every PNG.
        assert_eq!(chunk_crc32(b"IEND", &[]), 0xAE42_6082);
    }

    #[test]
    fn test_verify_accepts_matching_crc() {
        let crc = chunk_crc32(b"tEXt", b"keyword\0value");
        assert!(verify_chunk_crc32(b"tEXt", b"keyword\0value", crc).is_ok());
    }

    #[test]
    fn test_verify_rejects_mismatch() {
        let crc = chunk_crc32(b"tEXt", b"keyword\0value");
        match verify_chunk_crc32(b"tEXt", b"keyword\0other", crc) {
            Err(crate::error::PngrwError::ChecksumMismatch) => {}
            other => panic!("expected ChecksumMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_crc_covers_tag() {
        let data = b"same data";
        assert_ne!(chunk_crc32(b"tEXt", data), chunk_crc32(b"zTXt", data));
    }
}
