//! pngrw codec - the text-chunk rewrite engine
//!
//! This crate turns the container primitives from `pngrw-format` into the
//! actual conversion pass:
//!
//! - Decoding and encoding the three text chunk sub-formats (tEXt/zTXt/iTXt)
//! - zlib inflate/deflate for the compressed sub-formats
//! - Classifying chunk text as Base64-wrapped JSON, raw JSON, or opaque
//! - Recursively applying a string transform to JSON string leaves
//! - The chunk-by-chunk rewrite with verbatim fallback

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod payload;
pub mod rewrite;
pub mod text;
pub mod value;
pub mod zlib;

// Re-export commonly used types
pub use payload::{detect, PayloadClass};
pub use rewrite::{rewrite_json, rewrite_png, ChunkNote, RewriteReport};
pub use text::{TextChunk, TextKind};
pub use value::transform_value;
