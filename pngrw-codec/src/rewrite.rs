//! The chunk-stream rewrite pass
//!
//! Walks a PNG chunk by chunk, rewrites the JSON payload of every text
//! chunk it can decode and classify, and reassembles the file. Everything
//! else - non-text chunks, opaque text, and any text chunk whose pipeline
//! fails - is emitted byte-verbatim, so a malformed payload can never
//! corrupt the output.

use crate::payload;
use crate::text::{self, TextKind};
use crate::value::transform_value;
use pngrw_format::constants::SIGNATURE;
use pngrw_format::{encode_chunk, strip_signature, ChunkStream, RawChunk, Result};

/// Why a text chunk fell back to verbatim pass-through.
#[derive(Debug, Clone)]
pub struct ChunkNote {
    /// Position of the chunk in the stream, 0-based.
    pub index: usize,
    /// Chunk tag as printable ASCII.
    pub tag: String,
    /// Human-readable reason.
    pub reason: String,
}

/// Summary of one container rewrite.
#[derive(Debug, Clone, Default)]
pub struct RewriteReport {
    /// Total chunks emitted.
    pub chunks: usize,
    /// Text chunks whose payload was rewritten.
    pub rewritten: usize,
    /// Text chunks that fell back to verbatim pass-through, with reasons.
    pub fallbacks: Vec<ChunkNote>,
    /// Byte offset within the file of the first malformed chunk boundary.
    /// Everything from this offset on was dropped from the output.
    pub truncated_at: Option<usize>,
}

impl RewriteReport {
    /// True when the whole file survived without fallbacks or truncation.
    pub fn is_clean(&self) -> bool {
        self.fallbacks.is_empty() && self.truncated_at.is_none()
    }
}

/// Rewrite every JSON-bearing text chunk of a PNG with `transform`.
///
/// Returns the rewritten file and a report. Chunk order is preserved
/// exactly; no chunks are added, removed, or reordered, except that a
/// malformed chunk boundary ends the scan and drops the unparseable tail
/// (reported via [`RewriteReport::truncated_at`]). A signature mismatch is
/// the only error: nothing is rewritten and no output is produced.
pub fn rewrite_png<F>(bytes: &[u8], transform: &F) -> Result<(Vec<u8>, RewriteReport)>
where
    F: Fn(&str) -> String,
{
    let stream_bytes = strip_signature(bytes)?;

    let mut out = Vec::with_capacity(bytes.len());
    out.extend_from_slice(&SIGNATURE);

    let mut report = RewriteReport::default();
    let mut chunks = ChunkStream::new(stream_bytes);
    while let Some(chunk) = chunks.next() {
        match rewrite_chunk(&chunk, transform) {
            Ok(Some(data)) => {
                out.extend_from_slice(&encode_chunk(chunk.tag, &data));
                report.rewritten += 1;
            }
            Ok(None) => out.extend_from_slice(chunk.raw),
            Err(err) => {
                // Chunk-local fallback: the original record, stored CRC
                // bits included.
                out.extend_from_slice(chunk.raw);
                report.fallbacks.push(ChunkNote {
                    index: report.chunks,
                    tag: chunk.tag_str(),
                    reason: err.to_string(),
                });
            }
        }
        report.chunks += 1;
    }
    report.truncated_at = chunks.truncated_at().map(|pos| pos + SIGNATURE.len());

    Ok((out, report))
}

/// Rewrite a single chunk. `Ok(Some)` carries replacement data to be
/// re-framed with a fresh length and CRC. `Ok(None)` means pass through:
/// either the chunk is not a text chunk, or its text is opaque (the
/// transform is not invoked for opaque text). `Err` means the text pipeline
/// failed and the caller falls back to the original bytes.
fn rewrite_chunk<F>(chunk: &RawChunk<'_>, transform: &F) -> Result<Option<Vec<u8>>>
where
    F: Fn(&str) -> String,
{
    let Some(kind) = TextKind::from_tag(chunk.tag) else {
        return Ok(None);
    };
    let decoded = text::decode(kind, chunk.data)?;
    let Some((value, _)) = payload::detect(&decoded.text) else {
        return Ok(None);
    };
    let converted = transform_value(value, transform);
    let new_text = serde_json::to_string(&converted)?;
    decoded.encode(&new_text).map(Some)
}

/// Rewrite a bare JSON document (no container) with `transform`.
///
/// Output is pretty-printed with two-space indentation.
pub fn rewrite_json<F>(document: &str, transform: &F) -> Result<String>
where
    F: Fn(&str) -> String,
{
    let value: serde_json::Value = serde_json::from_str(document)?;
    Ok(serde_json::to_string_pretty(&transform_value(
        value, transform,
    ))?)
}
