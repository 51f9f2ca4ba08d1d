//! Text chunk sub-format codec
//!
//! PNG defines three text-bearing chunk layouts, all starting with a
//! NUL-terminated keyword:
//!
//! - tEXt: `keyword 0 text`
//! - zTXt: `keyword 0 method text(zlib)`
//! - iTXt: `keyword 0 flag method language-tag 0 translated-keyword 0 text`

use crate::zlib;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use pngrw_format::constants::{COMPRESSION_DEFLATE, TAG_ITXT, TAG_TEXT, TAG_ZTXT};
use pngrw_format::{PngrwError, Result};

/// The three PNG text chunk sub-formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextKind {
    /// tEXt: keyword plus uncompressed text.
    Plain,
    /// zTXt: keyword, compression method, zlib-compressed text.
    Compressed,
    /// iTXt: keyword, compression flag and method, language metadata, text.
    International,
}

impl TextKind {
    /// Map a chunk tag to its text sub-format, if it is one.
    pub fn from_tag(tag: [u8; 4]) -> Option<Self> {
        match tag {
            TAG_TEXT => Some(TextKind::Plain),
            TAG_ZTXT => Some(TextKind::Compressed),
            TAG_ITXT => Some(TextKind::International),
            _ => None,
        }
    }

    /// The chunk tag for this sub-format.
    pub fn tag(self) -> [u8; 4] {
        match self {
            TextKind::Plain => TAG_TEXT,
            TextKind::Compressed => TAG_ZTXT,
            TextKind::International => TAG_ITXT,
        }
    }
}

/// A decoded text chunk: the keyword and the text it carried.
#[derive(Debug, Clone)]
pub struct TextChunk {
    /// Sub-format this chunk was decoded from.
    pub kind: TextKind,
    /// Keyword bytes, kept verbatim for re-encoding.
    pub keyword: Vec<u8>,
    /// Decoded text, inflated first if the sub-format compressed it.
    pub text: String,
}

/// Find the next NUL at or after `from`.
fn find_nul(data: &[u8], from: usize) -> Result<usize> {
    data.get(from..)
        .ok_or(PngrwError::TruncatedTextChunk)?
        .iter()
        .position(|&b| b == 0)
        .map(|i| from + i)
        .ok_or(PngrwError::MissingNullSeparator)
}

fn byte_at(data: &[u8], pos: usize) -> Result<u8> {
    data.get(pos).copied().ok_or(PngrwError::TruncatedTextChunk)
}

/// Text is decoded leniently: the embedded-card ecosystem writes UTF-8 even
/// into tEXt, and invalid sequences must degrade to replacement characters
/// instead of failing the whole chunk.
fn lossy_utf8(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Decode a text chunk's data into its keyword and text.
pub fn decode(kind: TextKind, data: &[u8]) -> Result<TextChunk> {
    let keyword_end = find_nul(data, 0)?;
    let keyword = data[..keyword_end].to_vec();

    let text = match kind {
        TextKind::Plain => lossy_utf8(&data[keyword_end + 1..]),
        TextKind::Compressed => {
            let method = byte_at(data, keyword_end + 1)?;
            if method != COMPRESSION_DEFLATE {
                return Err(PngrwError::UnsupportedCompressionMethod(method));
            }
            lossy_utf8(&zlib::inflate(&data[keyword_end + 2..])?)
        }
        TextKind::International => {
            let flag = byte_at(data, keyword_end + 1)?;
            let method = byte_at(data, keyword_end + 2)?;
            let lang_end = find_nul(data, keyword_end + 3)?;
            let translated_end = find_nul(data, lang_end + 1)?;
            let rest = &data[translated_end + 1..];
            if flag == 1 {
                if method != COMPRESSION_DEFLATE {
                    return Err(PngrwError::UnsupportedCompressionMethod(method));
                }
                lossy_utf8(&zlib::inflate(rest)?)
            } else {
                lossy_utf8(rest)
            }
        }
    };

    Ok(TextChunk {
        kind,
        keyword,
        text,
    })
}

impl TextChunk {
    /// Re-encode this chunk's layout around replacement text.
    ///
    /// Output is normalized rather than faithful to the source framing:
    /// Plain text is always Base64-wrapped (even when the source held raw
    /// JSON), and International output drops the language tag and translated
    /// keyword and is never compressed. Downstream card importers accept
    /// both framings and some expect the normalized one, so this asymmetry
    /// is kept deliberately.
    pub fn encode(&self, new_text: &str) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(self.keyword.len() + new_text.len() + 8);
        out.extend_from_slice(&self.keyword);
        out.push(0);
        match self.kind {
            TextKind::Plain => out.extend_from_slice(BASE64.encode(new_text).as_bytes()),
            TextKind::Compressed => {
                out.push(COMPRESSION_DEFLATE);
                out.extend_from_slice(&zlib::deflate(new_text.as_bytes())?);
            }
            TextKind::International => {
                out.push(0); // compression flag: uncompressed
                out.push(COMPRESSION_DEFLATE);
                out.push(0); // empty language tag
                out.push(0); // empty translated keyword
                out.extend_from_slice(new_text.as_bytes());
            }
        }
        Ok(out)
    }
}
