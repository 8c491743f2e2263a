//! AES-256-CBC with PKCS#7 padding.
//!
//! This module provides:
//! - [`encrypt`] — encrypt plaintext under a key and IV
//! - [`decrypt`] — decrypt and strip padding, returning [`SecretBuffer`]
//!
//! CBC offers no authentication. The padding check in [`decrypt`] is the
//! only signal that the key was right, and it is a practical heuristic, not
//! a cryptographic guarantee: roughly 1 in 256 wrong keys still yields a
//! structurally valid final byte.

use crate::error::CryptoError;
use crate::memory::SecretBuffer;
use aes::cipher::block_padding::Pkcs7;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};

/// AES block length in bytes.
pub const BLOCK_LEN: usize = 16;

/// IV length in bytes (one AES block).
pub const IV_LEN: usize = BLOCK_LEN;

/// AES-256 key length in bytes.
pub const KEY_LEN: usize = 32;

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

fn check_key_iv(key: &[u8], iv: &[u8]) -> Result<(), CryptoError> {
    if key.len() != KEY_LEN {
        return Err(CryptoError::InvalidKeyMaterial(format!(
            "invalid key length: {} bytes (expected {KEY_LEN})",
            key.len()
        )));
    }
    if iv.len() != IV_LEN {
        return Err(CryptoError::InvalidKeyMaterial(format!(
            "invalid IV length: {} bytes (expected {IV_LEN})",
            iv.len()
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Core encryption
// ---------------------------------------------------------------------------

/// Encrypt `plaintext` with AES-256-CBC and PKCS#7 padding.
///
/// The output is always a non-empty multiple of [`BLOCK_LEN`]; an empty
/// plaintext produces one full padding block.
///
/// # Errors
///
/// Returns `CryptoError::InvalidKeyMaterial` if the key is not 32 bytes or
/// the IV is not 16 bytes.
pub fn encrypt(plaintext: &[u8], key: &[u8], iv: &[u8]) -> Result<Vec<u8>, CryptoError> {
    check_key_iv(key, iv)?;
    let cipher = Aes256CbcEnc::new_from_slices(key, iv)
        .map_err(|e| CryptoError::Encryption(format!("failed to create AES-256-CBC: {e}")))?;
    Ok(cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext))
}

/// Decrypt AES-256-CBC ciphertext and remove PKCS#7 padding.
///
/// # Errors
///
/// Returns `CryptoError::InvalidKeyMaterial` if the key or IV length is wrong.
/// Returns `CryptoError::MalformedCiphertext` if the ciphertext length is not
/// a multiple of [`BLOCK_LEN`].
/// Returns `CryptoError::Padding` if the padding is invalid (wrong key, or an
/// empty ciphertext).
pub fn decrypt(ciphertext: &[u8], key: &[u8], iv: &[u8]) -> Result<SecretBuffer, CryptoError> {
    check_key_iv(key, iv)?;
    if ciphertext.len() % BLOCK_LEN != 0 {
        return Err(CryptoError::MalformedCiphertext(format!(
            "ciphertext length {} is not a multiple of {BLOCK_LEN}",
            ciphertext.len()
        )));
    }

    let cipher = Aes256CbcDec::new_from_slices(key, iv)
        .map_err(|e| CryptoError::Encryption(format!("failed to create AES-256-CBC: {e}")))?;
    let plaintext = cipher
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| CryptoError::Padding)?;
    Ok(SecretBuffer::from_vec(plaintext))
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
