//! NIST SP 800-38A F.2.5 — CBC-AES256 known-answer vectors.
//!
//! The NIST vectors are unpadded. PKCS#7 appends one extra block to a
//! block-aligned plaintext, so the first 64 ciphertext bytes must match
//! NIST exactly and the trailing block is the encrypted padding.

use cfgbackup_crypto_core::symmetric::{decrypt, encrypt, BLOCK_LEN};
use data_encoding::HEXLOWER;

const KEY: &str = "603deb1015ca71be2b73aef0857d77811f352c073b6108d72d9810a30914dff4";
const IV: &str = "000102030405060708090a0b0c0d0e0f";
const PLAINTEXT: &str = "6bc1bee22e409f96e93d7e117393172a\
                         ae2d8a571e03ac9c9eb76fac45af8e51\
                         30c81c46a35ce411e5fbc1191a0a52ef\
                         f69f2445df4f9b17ad2b417be66c3710";
const CIPHERTEXT: &str = "f58c4c04d6e5f1ba779eabfb5f7bfbd6\
                          9cfc4e967edb808d679f777bc6702c7d\
                          39f23369a9d9bacfa530e26304231461\
                          b2eb05e2c39be9fcda6c19078c6a9d1b";

fn hex(s: &str) -> Vec<u8> {
    HEXLOWER.decode(s.as_bytes()).expect("valid hex")
}

#[test]
fn nist_f25_encrypt_prefix_matches() {
    let ct = encrypt(&hex(PLAINTEXT), &hex(KEY), &hex(IV)).expect("encrypt should succeed");
    assert_eq!(ct.len(), 64 + BLOCK_LEN);
    assert_eq!(&ct[..64], hex(CIPHERTEXT).as_slice());
}

#[test]
fn nist_f25_first_block_is_independent_of_later_blocks() {
    let first = &hex(PLAINTEXT)[..16];
    let ct = encrypt(first, &hex(KEY), &hex(IV)).expect("encrypt should succeed");
    assert_eq!(&ct[..16], &hex(CIPHERTEXT)[..16]);
}

#[test]
fn nist_f25_decrypt_roundtrip() {
    let ct = encrypt(&hex(PLAINTEXT), &hex(KEY), &hex(IV)).expect("encrypt should succeed");
    let pt = decrypt(&ct, &hex(KEY), &hex(IV)).expect("decrypt should succeed");
    assert_eq!(pt.expose(), hex(PLAINTEXT).as_slice());
}

#[test]
fn nist_f25_raw_ciphertext_without_padding_block_is_rejected() {
    // The final NIST plaintext byte is 0x10, claiming a full pad block that
    // the rest of the block does not match.
    let result = decrypt(&hex(CIPHERTEXT), &hex(KEY), &hex(IV));
    assert!(result.is_err());
}
