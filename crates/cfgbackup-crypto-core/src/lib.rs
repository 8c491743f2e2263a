//! `cfgbackup-crypto-core` — cryptographic primitives for config backup blobs.
//!
//! Zero network, zero filesystem, zero async. Everything here is a pure
//! function over its inputs; derived keys and recovered plaintext are held
//! in [`SecretBuffer`] and zeroized on drop.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

pub mod error;
pub mod memory;

pub mod kdf;
pub mod obfuscation;
pub mod symmetric;

pub use error::CryptoError;
pub use kdf::{derive, derive_aes256_key, PBKDF2_ITERATIONS, SALT_LEN};
pub use memory::SecretBuffer;
pub use obfuscation::xor_transform;
pub use symmetric::{decrypt, encrypt, BLOCK_LEN, IV_LEN, KEY_LEN};
