//! Constants and magic bytes for the PNG container

/// PNG file signature: the fixed 8 bytes every PNG starts with.
pub const SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// Tag of an uncompressed text chunk.
pub const TAG_TEXT: [u8; 4] = *b"tEXt";
/// Tag of a zlib-compressed text chunk.
pub const TAG_ZTXT: [u8; 4] = *b"zTXt";
/// Tag of an international text chunk.
pub const TAG_ITXT: [u8; 4] = *b"iTXt";

/// The only compression method PNG defines (zlib deflate).
pub const COMPRESSION_DEFLATE: u8 = 0;

/// Framing overhead of a chunk record: length, tag, and CRC fields.
pub const CHUNK_OVERHEAD: usize = 12;
