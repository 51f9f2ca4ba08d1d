//! Payload classification: Base64-wrapped JSON, raw JSON, or opaque text
//!
//! Character-card and preset files usually embed a Base64-wrapped JSON
//! document inside a text chunk for compactness; raw JSON also occurs in the
//! wild. Attribution comments and other free text must never be mistaken for
//! either, so anything that fails both readings is classified opaque and
//! passes through the rewrite untouched.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde_json::Value;

/// How [`detect`] classified a piece of chunk text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadClass {
    /// Base64-encoded JSON document.
    Base64Json,
    /// Raw JSON document.
    Json,
    /// Not a detectable structured payload.
    Opaque,
}

impl PayloadClass {
    /// Short label for log lines.
    pub fn label(self) -> &'static str {
        match self {
            PayloadClass::Base64Json => "base64-json",
            PayloadClass::Json => "json",
            PayloadClass::Opaque => "opaque",
        }
    }
}

/// Classify chunk text and extract its JSON value, if it carries one.
///
/// The Base64 reading is tried first: a standard-alphabet decode whose bytes
/// are strict UTF-8 and parse as JSON wins. Otherwise the text is parsed as
/// JSON directly. Any successful parse counts, scalars included: a chunk
/// holding the bare string `"伺"` is still a transformable payload.
pub fn detect(text: &str) -> Option<(Value, PayloadClass)> {
    if let Ok(bytes) = BASE64.decode(text) {
        if let Ok(decoded) = String::from_utf8(bytes) {
            if let Ok(value) = serde_json::from_str(&decoded) {
                return Some((value, PayloadClass::Base64Json));
            }
        }
    }
    serde_json::from_str(text)
        .ok()
        .map(|value| (value, PayloadClass::Json))
}
