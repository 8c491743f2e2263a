//! Payload compression carried by the `X-Compression-Type` header.
//!
//! The device gzips the configuration *before* encrypting it, so the decode
//! engine inflates *after* the cipher step. Compression is orthogonal to the
//! encryption scheme.
//!
//! Separately, the firmware may store the base64 text itself gzipped; that
//! transit layer is detected by its magic bytes and removed by
//! [`inflate_transit`] before the blob is parsed.

use std::borrow::Cow;
use std::fmt;
use std::io::{Read, Write};
use std::str::FromStr;

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;

use crate::error::BlobError;

/// Leading bytes of every gzip member.
pub const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Upper bound on inflated output. A configuration file is a few KiB; this
/// stops a hostile blob from expanding without limit.
pub const MAX_INFLATED_LEN: usize = 16 * 1024 * 1024;

/// Compression applied to the plaintext before encryption.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Compression {
    /// Stored as-is.
    #[default]
    None,
    /// gzip (RFC 1952).
    Gzip,
}

impl Compression {
    /// Every supported compression type.
    pub const ALL: [Self; 2] = [Self::None, Self::Gzip];

    /// Wire tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Gzip => "gzip",
        }
    }

    /// Resolve the optional `X-Compression-Type` header value.
    ///
    /// An absent or blank header means `none`.
    ///
    /// # Errors
    ///
    /// Returns [`BlobError::UnknownCompression`] for unrecognized values.
    pub fn from_header(value: Option<&str>) -> Result<Self, BlobError> {
        match value.map(str::trim) {
            None | Some("") => Ok(Self::None),
            Some(tag) => tag.parse(),
        }
    }
}

impl FromStr for Compression {
    type Err = BlobError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| BlobError::UnknownCompression(s.to_owned()))
    }
}

impl fmt::Display for Compression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Payload
// ---------------------------------------------------------------------------

fn gunzip(bytes: &[u8]) -> Result<Vec<u8>, BlobError> {
    let limit = u64::try_from(MAX_INFLATED_LEN)
        .unwrap_or(u64::MAX)
        .saturating_add(1);
    let mut out = Vec::new();
    GzDecoder::new(bytes)
        .take(limit)
        .read_to_end(&mut out)
        .map_err(|e| BlobError::Decompression(format!("gzip: {e}")))?;
    if out.len() > MAX_INFLATED_LEN {
        return Err(BlobError::Decompression(format!(
            "inflated payload exceeds {MAX_INFLATED_LEN} bytes"
        )));
    }
    Ok(out)
}

/// Undo `compression` on a recovered payload.
///
/// # Errors
///
/// Returns [`BlobError::Decompression`] if the data is not a valid stream of
/// the declared type or inflates past [`MAX_INFLATED_LEN`].
pub fn decompress(bytes: &[u8], compression: Compression) -> Result<Vec<u8>, BlobError> {
    match compression {
        Compression::None => Ok(bytes.to_vec()),
        Compression::Gzip => gunzip(bytes),
    }
}

/// Apply `compression` to a payload before encryption.
///
/// # Errors
///
/// Returns [`BlobError::Seal`] if the encoder fails.
pub fn compress(bytes: &[u8], compression: Compression) -> Result<Vec<u8>, BlobError> {
    match compression {
        Compression::None => Ok(bytes.to_vec()),
        Compression::Gzip => {
            let mut encoder = GzEncoder::new(Vec::new(), flate2::Compression::best());
            encoder
                .write_all(bytes)
                .map_err(|e| BlobError::Seal(format!("gzip: {e}")))?;
            encoder
                .finish()
                .map_err(|e| BlobError::Seal(format!("gzip: {e}")))
        }
    }
}

// ---------------------------------------------------------------------------
// Transit layer
// ---------------------------------------------------------------------------

/// `true` if `bytes` start with the gzip magic.
#[must_use]
pub fn is_gzip(bytes: &[u8]) -> bool {
    bytes.starts_with(&GZIP_MAGIC)
}

/// Remove a gzip layer wrapped around the transit text, if present.
///
/// Base64 text never starts with `1f 8b`, so anything else is returned
/// borrowed and unchanged.
///
/// # Errors
///
/// Returns [`BlobError::Decompression`] if the magic is present but the
/// stream is corrupt.
pub fn inflate_transit(bytes: &[u8]) -> Result<Cow<'_, [u8]>, BlobError> {
    if is_gzip(bytes) {
        gunzip(bytes).map(Cow::Owned)
    } else {
        Ok(Cow::Borrowed(bytes))
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
