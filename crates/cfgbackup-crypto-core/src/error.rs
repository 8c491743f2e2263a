//! Cryptographic error types for `cfgbackup-crypto-core`.

use thiserror::Error;

/// Errors produced by cryptographic operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CryptoError {
    /// Key derivation failed (zero iterations, zero output length).
    #[error("key derivation failed: {0}")]
    KeyDerivation(String),

    /// Invalid key material (wrong length, empty XOR key).
    #[error("invalid key material: {0}")]
    InvalidKeyMaterial(String),

    /// Ciphertext is not a whole number of cipher blocks.
    #[error("malformed ciphertext: {0}")]
    MalformedCiphertext(String),

    /// PKCS#7 padding was structurally invalid after decryption.
    ///
    /// With CBC this is the usual symptom of a wrong passphrase.
    #[error("decryption failed: invalid padding")]
    Padding,

    /// Encryption failure (invalid IV length, cipher setup).
    #[error("encryption error: {0}")]
    Encryption(String),
}
