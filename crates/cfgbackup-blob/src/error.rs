//! Error types for `cfgbackup-blob`.

use cfgbackup_crypto_core::CryptoError;
use thiserror::Error;

/// Errors produced while decoding or sealing a config backup blob.
///
/// Callers should branch on [`BlobError::is_wrong_passphrase`] versus
/// [`BlobError::is_structural`]: the first means "try another key", the
/// second means the device served something this client cannot read.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BlobError {
    /// The transit encoding (base64) could not be decoded.
    #[error("invalid transit encoding: {0}")]
    InvalidEncoding(String),

    /// The encryption header names a scheme the registry does not know.
    #[error("unknown encryption scheme: {0:?}")]
    UnknownScheme(String),

    /// The compression header names an unsupported compression type.
    #[error("unknown compression type: {0:?}")]
    UnknownCompression(String),

    /// Decoded bytes are too short for the scheme's fixed header, or the
    /// ciphertext is not block aligned.
    #[error("malformed blob: {0}")]
    MalformedBlob(String),

    /// Block cipher padding check failed, most likely a wrong passphrase.
    #[error("decryption failed: invalid padding (wrong passphrase?)")]
    Padding,

    /// Scheme-internal failure not covered by the variants above.
    #[error("decryption error: {0}")]
    Decrypt(String),

    /// Payload decompression failed after decryption.
    ///
    /// For the `xor` scheme this is the usual symptom of a wrong passphrase.
    #[error("decompression failed: {0}")]
    Decompression(String),

    /// Producing a blob failed (encode side only).
    #[error("sealing failed: {0}")]
    Seal(String),
}

impl BlobError {
    /// `true` when retrying with a different passphrase may succeed.
    #[must_use]
    pub const fn is_wrong_passphrase(&self) -> bool {
        matches!(self, Self::Padding | Self::Decompression(_))
    }

    /// `true` when the blob or its headers are unreadable regardless of key.
    #[must_use]
    pub const fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::InvalidEncoding(_)
                | Self::UnknownScheme(_)
                | Self::UnknownCompression(_)
                | Self::MalformedBlob(_)
        )
    }
}

impl From<CryptoError> for BlobError {
    fn from(err: CryptoError) -> Self {
        match err {
            CryptoError::Padding => Self::Padding,
            CryptoError::MalformedCiphertext(msg) => Self::MalformedBlob(msg),
            other => Self::Decrypt(other.to_string()),
        }
    }
}
