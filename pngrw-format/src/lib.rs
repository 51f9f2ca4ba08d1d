//! pngrw format - PNG container primitives
//!
//! This crate provides the chunk-level building blocks for rewriting PNG
//! files, with no compression or JSON dependencies. It includes:
//!
//! - The PNG signature and text-chunk tag constants
//! - Chunk framing (parse and serialize)
//! - CRC-32 checksums over chunk records
//! - Error types

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod checksum;
pub mod chunk;
pub mod constants;
pub mod error;

// Re-export commonly used types
pub use chunk::{encode_chunk, strip_signature, ChunkStream, RawChunk};
pub use error::{PngrwError, Result};
