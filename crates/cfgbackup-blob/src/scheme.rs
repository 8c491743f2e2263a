//! Scheme registry — maps an `X-Encryption-Type` tag to a decryption strategy.
//!
//! The set of schemes is closed and static. Each scheme is a self-contained
//! unit implementing [`Scheme`]: it declares its fixed [`BlobLayout`] and
//! knows how to reverse (and produce) its own transform. The parser, the
//! cipher primitives and the extractor never branch on the scheme.
//!
//! | Tag      | Layout                          | Transform                       |
//! |----------|---------------------------------|---------------------------------|
//! | `none`   | ciphertext                      | identity                        |
//! | `xor`    | ciphertext                      | repeating-key XOR (obfuscation) |
//! | `aes256` | salt (16) ‖ iv (16) ‖ ciphertext | PBKDF2-SHA256 → AES-256-CBC     |

use std::fmt;
use std::str::FromStr;

use cfgbackup_crypto_core::{kdf, obfuscation, symmetric};

use crate::blob::ParsedCiphertext;
use crate::error::BlobError;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Identifier of an encoding scheme, as carried by the `X-Encryption-Type` header.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SchemeId {
    /// `none`: base64 only.
    Plain,
    /// `xor`: repeating-key XOR with the raw passphrase. Obfuscation only.
    Xor,
    /// `aes256`: PBKDF2-HMAC-SHA256 key, AES-256-CBC, PKCS#7 padding.
    Aes256,
}

/// Fixed positional header of a decoded blob.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlobLayout {
    /// Salt bytes at the front of the blob.
    pub salt_len: usize,
    /// IV bytes immediately after the salt.
    pub iv_len: usize,
}

impl BlobLayout {
    /// Layout with no header: the whole blob is ciphertext.
    pub const HEADERLESS: Self = Self {
        salt_len: 0,
        iv_len: 0,
    };

    /// Total header length (salt + IV).
    #[must_use]
    pub const fn header_len(&self) -> usize {
        self.salt_len.saturating_add(self.iv_len)
    }
}

/// A self-contained blob scheme.
///
/// Implementations are stateless unit structs; the registry hands out
/// `&'static dyn Scheme` references.
pub trait Scheme: Sync {
    /// Registry identifier.
    fn id(&self) -> SchemeId;

    /// Fixed header layout of blobs produced by this scheme.
    fn layout(&self) -> BlobLayout;

    /// Whether a passphrase must be supplied to reverse the transform.
    fn requires_passphrase(&self) -> bool;

    /// Reverse the transform, returning the recovered payload.
    ///
    /// # Errors
    ///
    /// Scheme-specific; see each implementation.
    fn decrypt(&self, parsed: &ParsedCiphertext, passphrase: &[u8]) -> Result<Vec<u8>, BlobError>;

    /// Apply the transform. `header` holds exactly [`BlobLayout::header_len`]
    /// bytes (salt then IV) chosen by the caller; the result is
    /// `header ‖ ciphertext`.
    ///
    /// # Errors
    ///
    /// Scheme-specific; see each implementation.
    fn encrypt(
        &self,
        plaintext: &[u8],
        passphrase: &[u8],
        header: &[u8],
    ) -> Result<Vec<u8>, BlobError>;
}

// ---------------------------------------------------------------------------
// SchemeId
// ---------------------------------------------------------------------------

impl SchemeId {
    /// Every registered scheme, in tag order.
    pub const ALL: [Self; 3] = [Self::Plain, Self::Xor, Self::Aes256];

    /// Wire tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Plain => "none",
            Self::Xor => "xor",
            Self::Aes256 => "aes256",
        }
    }

    /// Resolve the optional `X-Encryption-Type` header value.
    ///
    /// An absent or blank header means `none`. Any other value must match a
    /// tag exactly (after trimming surrounding whitespace).
    ///
    /// # Errors
    ///
    /// Returns [`BlobError::UnknownScheme`] for unrecognized tags.
    pub fn from_header(value: Option<&str>) -> Result<Self, BlobError> {
        match value.map(str::trim) {
            None | Some("") => Ok(Self::Plain),
            Some(tag) => tag.parse(),
        }
    }

    /// The strategy implementing this scheme.
    #[must_use]
    pub fn scheme(self) -> &'static dyn Scheme {
        match self {
            Self::Plain => &PlainScheme,
            Self::Xor => &XorScheme,
            Self::Aes256 => &Aes256Scheme,
        }
    }
}

impl FromStr for SchemeId {
    type Err = BlobError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| BlobError::UnknownScheme(s.to_owned()))
    }
}

impl fmt::Display for SchemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Look up a scheme strategy by wire tag.
///
/// # Errors
///
/// Returns [`BlobError::UnknownScheme`] for unrecognized tags.
pub fn lookup(tag: &str) -> Result<&'static dyn Scheme, BlobError> {
    tag.parse::<SchemeId>().map(SchemeId::scheme)
}

fn check_header(layout: BlobLayout, header: &[u8]) -> Result<(), BlobError> {
    if header.len() != layout.header_len() {
        return Err(BlobError::Seal(format!(
            "header must be {} bytes, got {}",
            layout.header_len(),
            header.len()
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// none
// ---------------------------------------------------------------------------

/// `none`: the payload is only base64-encoded.
pub struct PlainScheme;

impl Scheme for PlainScheme {
    fn id(&self) -> SchemeId {
        SchemeId::Plain
    }

    fn layout(&self) -> BlobLayout {
        BlobLayout::HEADERLESS
    }

    fn requires_passphrase(&self) -> bool {
        false
    }

    fn decrypt(&self, parsed: &ParsedCiphertext, _passphrase: &[u8]) -> Result<Vec<u8>, BlobError> {
        Ok(parsed.ciphertext.to_vec())
    }

    fn encrypt(
        &self,
        plaintext: &[u8],
        _passphrase: &[u8],
        header: &[u8],
    ) -> Result<Vec<u8>, BlobError> {
        check_header(self.layout(), header)?;
        Ok(plaintext.to_vec())
    }
}

// ---------------------------------------------------------------------------
// xor
// ---------------------------------------------------------------------------

/// `xor`: repeating-key XOR with the UTF-8 passphrase bytes.
///
/// Obfuscation, not a security boundary. A wrong passphrase is never
/// detected here; it yields different bytes, which the compression step or
/// the filename extractor may or may not notice.
pub struct XorScheme;

impl Scheme for XorScheme {
    fn id(&self) -> SchemeId {
        SchemeId::Xor
    }

    fn layout(&self) -> BlobLayout {
        BlobLayout::HEADERLESS
    }

    fn requires_passphrase(&self) -> bool {
        true
    }

    /// # Errors
    ///
    /// Returns [`BlobError::Decrypt`] when the passphrase is empty.
    fn decrypt(&self, parsed: &ParsedCiphertext, passphrase: &[u8]) -> Result<Vec<u8>, BlobError> {
        Ok(obfuscation::xor_transform(&parsed.ciphertext, passphrase)?)
    }

    fn encrypt(
        &self,
        plaintext: &[u8],
        passphrase: &[u8],
        header: &[u8],
    ) -> Result<Vec<u8>, BlobError> {
        check_header(self.layout(), header)?;
        obfuscation::xor_transform(plaintext, passphrase)
            .map_err(|e| BlobError::Seal(e.to_string()))
    }
}

// ---------------------------------------------------------------------------
// aes256
// ---------------------------------------------------------------------------

/// `aes256`: `salt ‖ iv ‖ AES-256-CBC(PBKDF2-SHA256(passphrase, salt, 100000))`.
pub struct Aes256Scheme;

impl Scheme for Aes256Scheme {
    fn id(&self) -> SchemeId {
        SchemeId::Aes256
    }

    fn layout(&self) -> BlobLayout {
        BlobLayout {
            salt_len: kdf::SALT_LEN,
            iv_len: symmetric::IV_LEN,
        }
    }

    fn requires_passphrase(&self) -> bool {
        true
    }

    /// # Errors
    ///
    /// Returns [`BlobError::Padding`] on a failed padding check and
    /// [`BlobError::MalformedBlob`] when the ciphertext is not block aligned.
    fn decrypt(&self, parsed: &ParsedCiphertext, passphrase: &[u8]) -> Result<Vec<u8>, BlobError> {
        let key = kdf::derive_aes256_key(passphrase, &parsed.salt)?;
        let plaintext = symmetric::decrypt(&parsed.ciphertext, key.expose(), &parsed.iv)?;
        Ok(plaintext.to_vec())
    }

    fn encrypt(
        &self,
        plaintext: &[u8],
        passphrase: &[u8],
        header: &[u8],
    ) -> Result<Vec<u8>, BlobError> {
        let layout = self.layout();
        check_header(layout, header)?;
        let (salt, iv) = header.split_at(layout.salt_len);

        let key = kdf::derive_aes256_key(passphrase, salt)
            .map_err(|e| BlobError::Seal(e.to_string()))?;
        let ciphertext = symmetric::encrypt(plaintext, key.expose(), iv)
            .map_err(|e| BlobError::Seal(e.to_string()))?;

        let mut out = Vec::with_capacity(header.len().saturating_add(ciphertext.len()));
        out.extend_from_slice(header);
        out.extend_from_slice(&ciphertext);
        Ok(out)
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
