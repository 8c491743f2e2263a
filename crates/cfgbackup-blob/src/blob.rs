//! Blob parser — transit decoding and positional split into salt / IV / ciphertext.
//!
//! # Layout
//!
//! ```text
//! base64( salt (salt_len B) | iv (iv_len B) | ciphertext (rest) )
//! ```
//!
//! Lengths come from the scheme's fixed [`BlobLayout`](crate::scheme::BlobLayout);
//! no scheme uses variable-length headers. The parser never inspects plaintext.

use data_encoding::{Encoding, BASE64};

use crate::error::BlobError;
use crate::scheme::SchemeId;

/// Structural decomposition of a decoded blob for one scheme.
///
/// `salt` and `iv` are empty for schemes whose layout has no header.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedCiphertext {
    /// Key-derivation salt. Not secret.
    pub salt: Vec<u8>,
    /// Cipher IV. Not secret.
    pub iv: Vec<u8>,
    /// Everything after the header.
    pub ciphertext: Vec<u8>,
}

/// Standard base64 that ignores non-zero trailing bits, as browser `atob`
/// and most other decoders do.
fn transit_decoding() -> Result<Encoding, BlobError> {
    let mut spec = BASE64.specification();
    spec.check_trailing_bits = false;
    spec.encoding()
        .map_err(|e| BlobError::InvalidEncoding(format!("base64 alphabet: {e}")))
}

/// Decode the base64 transit text into raw blob bytes.
///
/// ASCII whitespace anywhere in the input (trailing newline, wrapped lines)
/// is ignored. Padding is required; non-canonical trailing bits are not.
///
/// # Errors
///
/// Returns [`BlobError::InvalidEncoding`] if the text is not valid base64.
pub fn decode_transit(text: &[u8]) -> Result<Vec<u8>, BlobError> {
    let compact: Vec<u8> = text
        .iter()
        .copied()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    transit_decoding()?
        .decode(&compact)
        .map_err(|e| BlobError::InvalidEncoding(format!("invalid base64: {e}")))
}

/// Encode raw blob bytes as base64 transit text.
#[must_use]
pub fn encode_transit(bytes: &[u8]) -> String {
    BASE64.encode(bytes)
}

/// Split already-decoded blob bytes according to `scheme`'s layout.
///
/// # Errors
///
/// Returns [`BlobError::MalformedBlob`] if `decoded` is shorter than the
/// scheme's salt + IV header.
pub fn parse_decoded(decoded: &[u8], scheme: SchemeId) -> Result<ParsedCiphertext, BlobError> {
    let layout = scheme.scheme().layout();
    let header_len = layout.header_len();
    if decoded.len() < header_len {
        return Err(BlobError::MalformedBlob(format!(
            "{scheme} blob too short: {} bytes (header needs {header_len})",
            decoded.len()
        )));
    }

    let (salt, rest) = decoded.split_at(layout.salt_len);
    let (iv, ciphertext) = rest.split_at(layout.iv_len);
    Ok(ParsedCiphertext {
        salt: salt.to_vec(),
        iv: iv.to_vec(),
        ciphertext: ciphertext.to_vec(),
    })
}

/// Decode the transit text and split it according to `scheme`.
///
/// # Errors
///
/// Returns [`BlobError::InvalidEncoding`] for bad base64 and
/// [`BlobError::MalformedBlob`] for a blob shorter than the scheme header.
pub fn parse(blob: &[u8], scheme: SchemeId) -> Result<ParsedCiphertext, BlobError> {
    let decoded = decode_transit(blob)?;
    parse_decoded(&decoded, scheme)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
