//! PBKDF2-HMAC-SHA256 known-answer vectors.
//!
//! Sources: RFC 7914 §11 and the widely published HMAC-SHA256 companion
//! vectors to RFC 6070.

use cfgbackup_crypto_core::kdf::derive;
use data_encoding::HEXLOWER;

fn derive_hex(password: &[u8], salt: &[u8], iterations: u32, len: usize) -> String {
    let key = derive(password, salt, iterations, len).expect("derive should succeed");
    HEXLOWER.encode(key.expose())
}

#[test]
fn password_salt_one_iteration() {
    assert_eq!(
        derive_hex(b"password", b"salt", 1, 32),
        "120fb6cffcf8b32c43e7225256c4f837a86548c92ccc35480805987cb70be17b"
    );
}

#[test]
fn password_salt_two_iterations() {
    assert_eq!(
        derive_hex(b"password", b"salt", 2, 32),
        "ae4d0c95af6b46d32d0adff928f06dd02a303f8ef3c251dfd6e2d85a95474c43"
    );
}

#[test]
fn password_salt_4096_iterations() {
    assert_eq!(
        derive_hex(b"password", b"salt", 4096, 32),
        "c5e478d59288c841aa530db6845c4c8d962893a001ce4e11a4963873aa98134a"
    );
}

#[test]
fn long_password_and_salt_40_byte_output() {
    assert_eq!(
        derive_hex(
            b"passwordPASSWORDpassword",
            b"saltSALTsaltSALTsaltSALTsaltSALTsalt",
            4096,
            40
        ),
        "348c89dbcbd32b2f32d814b8116e84cf2b17347ebc1800181c4e2a1fb8dd53e1c635518c7dac47e9"
    );
}

/// RFC 7914 §11, first PBKDF2-HMAC-SHA256 vector.
#[test]
fn rfc7914_passwd_salt_64_byte_output() {
    assert_eq!(
        derive_hex(b"passwd", b"salt", 1, 64),
        "55ac046e56e3089fec1691c22544b605f94185216dde0465e68b9d57c20dacbc\
         49ca9cccf179b645991664b39d77ef317c71b845b1e30bd509112041d3a19783"
    );
}
