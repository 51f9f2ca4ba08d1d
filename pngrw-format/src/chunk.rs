//! Chunk framing for the PNG container
//!
//! A chunk record is a big-endian u32 data length, a 4-byte ASCII tag, the
//! data itself, and a big-endian CRC-32 over tag and data. The chunk stream
//! starts immediately after the 8-byte signature.

use crate::checksum::chunk_crc32;
use crate::constants::{CHUNK_OVERHEAD, SIGNATURE};
use crate::error::{PngrwError, Result};

/// One parsed chunk record, borrowing from the input buffer.
#[derive(Debug, Clone, Copy)]
pub struct RawChunk<'a> {
    /// Four-byte ASCII chunk tag.
    pub tag: [u8; 4],
    /// Chunk data, exactly as long as the declared length.
    pub data: &'a [u8],
    /// Stored CRC field. Not verified during parsing.
    pub crc: u32,
    /// The complete on-disk record: length, tag, data, and CRC fields.
    ///
    /// Pass-through must copy this slice so an unmodified chunk stays
    /// byte-identical even when its stored CRC was already wrong.
    pub raw: &'a [u8],
}

impl<'a> RawChunk<'a> {
    /// Check the stored CRC against the tag and data it covers.
    pub fn crc_is_valid(&self) -> bool {
        chunk_crc32(&self.tag, self.data) == self.crc
    }

    /// The tag as printable ASCII, for log lines.
    pub fn tag_str(&self) -> String {
        String::from_utf8_lossy(&self.tag).into_owned()
    }
}

/// Validate the signature and return the chunk-stream bytes after it.
pub fn strip_signature(bytes: &[u8]) -> Result<&[u8]> {
    if bytes.len() < SIGNATURE.len() || bytes[..SIGNATURE.len()] != SIGNATURE {
        return Err(PngrwError::InvalidSignature);
    }
    Ok(&bytes[SIGNATURE.len()..])
}

/// Serialize a chunk record with a freshly computed CRC.
pub fn encode_chunk(tag: [u8; 4], data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(CHUNK_OVERHEAD + data.len());
    out.extend_from_slice(&(data.len() as u32).to_be_bytes());
    out.extend_from_slice(&tag);
    out.extend_from_slice(data);
    out.extend_from_slice(&chunk_crc32(&tag, data).to_be_bytes());
    out
}

/// Iterator over the chunk records of a PNG chunk stream.
///
/// Scanning stops at the first malformed boundary: a partial length/tag
/// header, or a declared length that runs past the end of the buffer. Chunks
/// parsed before that point are still yielded; [`ChunkStream::truncated_at`]
/// reports where the scan gave up.
#[derive(Debug)]
pub struct ChunkStream<'a> {
    buf: &'a [u8],
    pos: usize,
    truncated_at: Option<usize>,
}

impl<'a> ChunkStream<'a> {
    /// Create a stream over the bytes following the signature.
    pub fn new(buf: &'a [u8]) -> Self {
        Self {
            buf,
            pos: 0,
            truncated_at: None,
        }
    }

    /// Byte offset, relative to the start of the chunk stream, of the first
    /// malformed boundary. `None` when the buffer parsed cleanly to its end.
    pub fn truncated_at(&self) -> Option<usize> {
        self.truncated_at
    }
}

impl<'a> Iterator for ChunkStream<'a> {
    type Item = RawChunk<'a>;

    fn next(&mut self) -> Option<RawChunk<'a>> {
        if self.truncated_at.is_some() || self.pos == self.buf.len() {
            return None;
        }
        if self.buf.len() - self.pos < 8 {
            self.truncated_at = Some(self.pos);
            return None;
        }

        let length = u32::from_be_bytes([
            self.buf[self.pos],
            self.buf[self.pos + 1],
            self.buf[self.pos + 2],
            self.buf[self.pos + 3],
        ]) as usize;
        let end = match length
            .checked_add(CHUNK_OVERHEAD)
            .and_then(|n| n.checked_add(self.pos))
        {
            Some(end) if end <= self.buf.len() => end,
            _ => {
                self.truncated_at = Some(self.pos);
                return None;
            }
        };

        let tag = [
            self.buf[self.pos + 4],
            self.buf[self.pos + 5],
            self.buf[self.pos + 6],
            self.buf[self.pos + 7],
        ];
        let data = &self.buf[self.pos + 8..self.pos + 8 + length];
        let crc = u32::from_be_bytes([
            self.buf[end - 4],
            self.buf[end - 3],
            self.buf[end - 2],
            self.buf[end - 1],
        ]);
        let raw = &self.buf[self.pos..end];
        self.pos = end;

        Some(RawChunk {
            tag,
            data,
            crc,
            raw,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::TAG_TEXT;

    fn stream_of(parts: &[Vec<u8>]) -> Vec<u8> {
        parts.iter().flatten().copied().collect()
    }

    #[test]
    fn test_strip_signature_valid() {
        let mut bytes = SIGNATURE.to_vec();
        bytes.extend_from_slice(&encode_chunk(*b"IEND", &[]));
        let stream = strip_signature(&bytes).unwrap();
        assert_eq!(stream.len(), CHUNK_OVERHEAD);
    }

    #[test]
    fn test_strip_signature_rejects_bad_magic() {
        let bytes = vec![0u8; 32];
        match strip_signature(&bytes) {
            Err(PngrwError::InvalidSignature) => {}
            other => panic!("expected InvalidSignature, got {other:?}"),
        }
    }

    #[test]
    fn test_strip_signature_rejects_short_input() {
        assert!(strip_signature(&SIGNATURE[..5]).is_err());
    }

    #[test]
    fn test_parse_single_chunk() {
        let encoded = encode_chunk(TAG_TEXT, b"key\0value");
        let mut stream = ChunkStream::new(&encoded);
        let chunk = stream.next().unwrap();
        assert_eq!(chunk.tag, TAG_TEXT);
        assert_eq!(chunk.data, b"key\0value");
        assert!(chunk.crc_is_valid());
        assert_eq!(chunk.raw, &encoded[..]);
        assert!(stream.next().is_none());
        assert_eq!(stream.truncated_at(), None);
    }

    #[test]
    fn test_parse_preserves_order() {
        let bytes = stream_of(&[
            encode_chunk(*b"IHDR", &[0u8; 13]),
            encode_chunk(TAG_TEXT, b"k\0v"),
            encode_chunk(*b"IEND", &[]),
        ]);
        let tags: Vec<[u8; 4]> = ChunkStream::new(&bytes).map(|c| c.tag).collect();
        assert_eq!(tags, vec![*b"IHDR", TAG_TEXT, *b"IEND"]);
    }

    #[test]
    fn test_declared_length_past_end_stops_scan() {
        let mut bytes = stream_of(&[encode_chunk(*b"IHDR", &[0u8; 13])]);
        let first_len = bytes.len();
        // Second chunk claims 1000 data bytes but provides none.
        bytes.extend_from_slice(&1000u32.to_be_bytes());
        bytes.extend_from_slice(b"IDAT");
        let mut stream = ChunkStream::new(&bytes);
        assert_eq!(stream.next().unwrap().tag, *b"IHDR");
        assert!(stream.next().is_none());
        assert_eq!(stream.truncated_at(), Some(first_len));
    }

    #[test]
    fn test_partial_header_stops_scan() {
        let mut bytes = stream_of(&[encode_chunk(*b"IEND", &[])]);
        let first_len = bytes.len();
        bytes.extend_from_slice(&[0, 0, 0]); // three stray trailing bytes
        let mut stream = ChunkStream::new(&bytes);
        assert!(stream.next().is_some());
        assert!(stream.next().is_none());
        assert_eq!(stream.truncated_at(), Some(first_len));
    }

    #[test]
    fn test_overflowing_length_stops_scan() {
        let mut bytes = u32::MAX.to_be_bytes().to_vec();
        bytes.extend_from_slice(b"IDAT");
        let mut stream = ChunkStream::new(&bytes);
        assert!(stream.next().is_none());
        assert_eq!(stream.truncated_at(), Some(0));
    }

    #[test]
    fn test_stored_crc_kept_even_when_wrong() {
        let mut encoded = encode_chunk(TAG_TEXT, b"k\0v");
        let end = encoded.len();
        encoded[end - 1] ^= 0xFF;
        let chunk = ChunkStream::new(&encoded).next().unwrap();
        assert!(!chunk.crc_is_valid());
        assert_eq!(chunk.raw, &encoded[..]);
    }

    #[test]
    fn test_encode_chunk_layout() {
        let encoded = encode_chunk(TAG_TEXT, b"abc");
        assert_eq!(&encoded[..4], &3u32.to_be_bytes());
        assert_eq!(&encoded[4..8], b"tEXt");
        assert_eq!(&encoded[8..11], b"abc");
        let crc = u32::from_be_bytes([encoded[11], encoded[12], encoded[13], encoded[14]]);
        assert_eq!(crc, chunk_crc32(&TAG_TEXT, b"abc"));
    }

    #[test]
    fn test_empty_stream() {
        let mut stream = ChunkStream::new(&[]);
        assert!(stream.next().is_none());
        assert_eq!(stream.truncated_at(), None);
    }
}
