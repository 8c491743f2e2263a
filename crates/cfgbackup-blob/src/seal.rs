//! Encode side — produce a blob the way the firmware build step does.
//!
//! ```text
//! [# filename: <name>\n] ‖ file ─► [gzip] ─► scheme transform ─► base64
//! ```
//!
//! The output is what the device serves verbatim. [`to_c_array`] renders
//! any byte string as the `PROGMEM` array the firmware compiles in.

use std::fmt;

use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroizing;

use crate::blob;
use crate::compression::{self, Compression};
use crate::error::BlobError;
use crate::extract;
use crate::scheme::SchemeId;

/// Parameters for [`seal`]. `Debug` masks the passphrase.
#[derive(Clone, Copy)]
pub struct SealOptions<'a> {
    /// Encryption scheme.
    pub scheme: SchemeId,
    /// Passphrase bytes; required by `xor` and `aes256`.
    pub passphrase: &'a [u8],
    /// Compression applied before encryption.
    pub compression: Compression,
    /// Name written into the metadata line, if any.
    pub filename: Option<&'a str>,
}

impl fmt::Debug for SealOptions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SealOptions")
            .field("scheme", &self.scheme)
            .field("passphrase", &"***")
            .field("compression", &self.compression)
            .field("filename", &self.filename)
            .finish()
    }
}

impl<'a> SealOptions<'a> {
    /// Options matching the firmware defaults: gzip, no metadata line.
    #[must_use]
    pub const fn new(scheme: SchemeId, passphrase: &'a [u8]) -> Self {
        Self {
            scheme,
            passphrase,
            compression: Compression::Gzip,
            filename: None,
        }
    }

    /// Set the compression.
    #[must_use]
    pub const fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Embed `filename` as the first line.
    #[must_use]
    pub const fn with_filename(mut self, filename: &'a str) -> Self {
        self.filename = Some(filename);
        self
    }
}

/// Seal `content` into base64 transit text with a fresh random header.
///
/// For `aes256` the salt and IV come from the operating system RNG.
///
/// # Errors
///
/// Returns [`BlobError::Seal`] if the scheme needs a passphrase and none was
/// given, or if compression or encryption fails.
pub fn seal(content: &[u8], options: &SealOptions<'_>) -> Result<String, BlobError> {
    let layout = options.scheme.scheme().layout();
    let mut header = vec![0u8; layout.header_len()];
    OsRng.fill_bytes(&mut header);
    seal_with_header(content, options, &header)
}

/// Deterministic [`seal`]: the caller supplies the salt ‖ IV header.
///
/// # Errors
///
/// Same as [`seal`], plus [`BlobError::Seal`] when `header` does not match
/// the scheme's layout.
pub fn seal_with_header(
    content: &[u8],
    options: &SealOptions<'_>,
    header: &[u8],
) -> Result<String, BlobError> {
    let scheme = options.scheme.scheme();
    if scheme.requires_passphrase() && options.passphrase.is_empty() {
        return Err(BlobError::Seal(format!(
            "{} encryption requires a passphrase",
            options.scheme
        )));
    }

    let plaintext = Zeroizing::new(match options.filename {
        Some(name) => extract::embed_filename(content, name),
        None => content.to_vec(),
    });
    let packed = Zeroizing::new(compression::compress(&plaintext, options.compression)?);
    let sealed = scheme.encrypt(&packed, options.passphrase, header)?;
    tracing::debug!(
        scheme = %options.scheme,
        compression = %options.compression,
        plaintext_len = plaintext.len(),
        sealed_len = sealed.len(),
        "Blob sealed"
    );
    Ok(blob::encode_transit(&sealed))
}

/// Render `data` as a firmware byte array plus its size constant:
///
/// ```text
/// const uint8_t NAME[n] PROGMEM = {1, 2, 3};
/// const size_t NAME_SIZE = n;
/// ```
#[must_use]
pub fn to_c_array(data: &[u8], name: &str) -> String {
    let body = data
        .iter()
        .map(u8::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    let len = data.len();
    format!("const uint8_t {name}[{len}] PROGMEM = {{{body}}};\nconst size_t {name}_SIZE = {len};")
}

/// Render base64 transit text as a header holding a raw string literal.
#[must_use]
pub fn to_raw_literal_header(transit: &str, name: &str) -> String {
    format!("#pragma once\n\nconst char {name}[] PROGMEM = R\"rawliteral(\n{transit}\n)rawliteral\";\n")
}
