//! Decode engine — the end-to-end path from a served blob to a file.
//!
//! ```text
//! headers ─► scheme + compression lookup
//! body    ─► base64 ─► parse ─► [derive key] ─► decrypt ─► inflate ─► extract
//! ```
//!
//! Every step is a pure function; the engine holds no state between calls
//! and never caches derived keys. Intermediate plaintext buffers are
//! zeroized when dropped. Log events carry sizes and tags only.

use std::fmt;

use zeroize::Zeroizing;

use crate::blob;
use crate::compression::{self, Compression};
use crate::error::BlobError;
use crate::extract::{self, ExtractedFile};
use crate::scheme::SchemeId;

/// HTTP header naming the encryption scheme.
pub const ENCRYPTION_HEADER: &str = "X-Encryption-Type";

/// HTTP header naming the payload compression.
pub const COMPRESSION_HEADER: &str = "X-Compression-Type";

/// Resource path the device serves the blob under.
pub const DEFAULT_RESOURCE_PATH: &str = "/config.b64";

/// Everything the engine needs for one decode.
///
/// `Debug` masks the passphrase.
#[derive(Clone, Copy)]
pub struct DecodeRequest<'a> {
    /// Transit text (base64, whitespace tolerated).
    pub blob: &'a [u8],
    /// Encryption scheme.
    pub scheme: SchemeId,
    /// Payload compression applied before encryption.
    pub compression: Compression,
    /// Passphrase bytes; ignored by `none`.
    pub passphrase: &'a [u8],
    /// Filename used when the plaintext carries none.
    pub default_filename: Option<&'a str>,
}

impl fmt::Debug for DecodeRequest<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecodeRequest")
            .field("blob_len", &self.blob.len())
            .field("scheme", &self.scheme)
            .field("compression", &self.compression)
            .field("passphrase", &"***")
            .field("default_filename", &self.default_filename)
            .finish()
    }
}

impl<'a> DecodeRequest<'a> {
    /// Request for `blob` under explicit scheme and no compression.
    #[must_use]
    pub const fn new(blob: &'a [u8], scheme: SchemeId) -> Self {
        Self {
            blob,
            scheme,
            compression: Compression::None,
            passphrase: &[],
            default_filename: None,
        }
    }

    /// Request built from raw header values, as served by the device.
    ///
    /// Header lookup happens here, so an unknown scheme is reported before
    /// the body is looked at.
    ///
    /// # Errors
    ///
    /// Returns [`BlobError::UnknownScheme`] or
    /// [`BlobError::UnknownCompression`] for unrecognized header values.
    pub fn from_headers(
        blob: &'a [u8],
        encryption: Option<&str>,
        compression: Option<&str>,
    ) -> Result<Self, BlobError> {
        let scheme = SchemeId::from_header(encryption)?;
        let compression = Compression::from_header(compression)?;
        Ok(Self::new(blob, scheme).with_compression(compression))
    }

    /// Set the payload compression.
    #[must_use]
    pub const fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Set the passphrase.
    #[must_use]
    pub const fn with_passphrase(mut self, passphrase: &'a [u8]) -> Self {
        self.passphrase = passphrase;
        self
    }

    /// Set the fallback filename.
    #[must_use]
    pub const fn with_default_filename(mut self, filename: &'a str) -> Self {
        self.default_filename = Some(filename);
        self
    }
}

/// Recover the original file from a served blob.
///
/// # Errors
///
/// - [`BlobError::InvalidEncoding`] if the body is not base64
/// - [`BlobError::MalformedBlob`] if it is shorter than the scheme header or
///   the ciphertext is not block aligned
/// - [`BlobError::Padding`] if the padding check fails (wrong passphrase)
/// - [`BlobError::Decrypt`] on any other cipher failure (e.g. empty xor key)
/// - [`BlobError::Decompression`] if the payload does not inflate
pub fn decode(request: &DecodeRequest<'_>) -> Result<ExtractedFile, BlobError> {
    let parsed = blob::parse(request.blob, request.scheme)?;
    tracing::debug!(
        scheme = %request.scheme,
        ciphertext_len = parsed.ciphertext.len(),
        "Blob parsed"
    );

    let payload = Zeroizing::new(request.scheme.scheme().decrypt(&parsed, request.passphrase)?);
    let plaintext = Zeroizing::new(compression::decompress(&payload, request.compression)?);
    tracing::debug!(
        compression = %request.compression,
        payload_len = payload.len(),
        plaintext_len = plaintext.len(),
        "Payload recovered"
    );

    let file = extract::extract(&plaintext, request.default_filename);
    tracing::debug!(
        embedded_filename = file.embedded,
        content_len = file.content.len(),
        "Content extracted"
    );
    Ok(file)
}

/// Decode a raw HTTP response: optional transit gzip, then [`decode`].
///
/// Headers are resolved first so an unknown scheme never touches the body.
///
/// # Errors
///
/// Same as [`DecodeRequest::from_headers`] and [`decode`], plus
/// [`BlobError::Decompression`] for a corrupt transit gzip layer.
pub fn decode_response(
    body: &[u8],
    encryption: Option<&str>,
    compression: Option<&str>,
    passphrase: &[u8],
    default_filename: Option<&str>,
) -> Result<ExtractedFile, BlobError> {
    let headers = DecodeRequest::from_headers(body, encryption, compression)?;
    let text = compression::inflate_transit(body)?;

    let request = DecodeRequest {
        blob: &text,
        passphrase,
        default_filename,
        ..headers
    };
    decode(&request)
}
