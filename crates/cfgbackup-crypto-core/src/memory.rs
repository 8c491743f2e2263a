//! Secret memory wrappers for derived keys and recovered plaintext.
//!
//! [`SecretBuffer`] wraps [`SecretSlice<u8>`] from the `secrecy` crate:
//! - zeroized on drop
//! - masked `Debug`/`Display` output (`SecretBuffer(***)`)

use secrecy::{ExposeSecret, SecretSlice};
use std::fmt;

/// Variable-length buffer for sensitive data.
pub struct SecretBuffer {
    inner: SecretSlice<u8>,
}

impl SecretBuffer {
    /// Copy `data` into a new secret allocation.
    ///
    /// The caller should zeroize the source after calling this.
    #[must_use]
    pub fn new(data: &[u8]) -> Self {
        Self {
            inner: data.to_vec().into(),
        }
    }

    /// Take ownership of `data` without copying.
    #[must_use]
    pub fn from_vec(data: Vec<u8>) -> Self {
        Self { inner: data.into() }
    }

    /// Expose the underlying bytes. Keep the borrow short.
    #[must_use]
    pub fn expose(&self) -> &[u8] {
        self.inner.expose_secret()
    }

    /// Copy the bytes out into a plain `Vec`.
    ///
    /// Used when ownership of recovered plaintext passes to the caller.
    #[must_use]
    pub fn to_vec(&self) -> Vec<u8> {
        self.expose().to_vec()
    }

    /// Returns the number of bytes in the buffer.
    #[must_use]
    pub fn len(&self) -> usize {
        self.expose().len()
    }

    /// Returns `true` if the buffer is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Vec<u8>> for SecretBuffer {
    fn from(data: Vec<u8>) -> Self {
        Self::from_vec(data)
    }
}

impl fmt::Debug for SecretBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretBuffer(***)")
    }
}

impl fmt::Display for SecretBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretBuffer(***)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secret_buffer_new_stores_correct_content() {
        let data = b"derived key material";
        let buf = SecretBuffer::new(data);
        assert_eq!(buf.expose(), data);
        assert_eq!(buf.len(), data.len());
        assert!(!buf.is_empty());
    }

    #[test]
    fn secret_buffer_empty() {
        let buf = SecretBuffer::new(b"");
        assert!(buf.is_empty());
    }

    #[test]
    fn secret_buffer_from_vec_takes_ownership() {
        let buf: SecretBuffer = vec![1u8, 2, 3].into();
        assert_eq!(buf.to_vec(), vec![1, 2, 3]);
    }

    #[test]
    fn secret_buffer_debug_and_display_are_masked() {
        let buf = SecretBuffer::new(b"hunter2");
        assert_eq!(format!("{buf:?}"), "SecretBuffer(***)");
        assert_eq!(format!("{buf}"), "SecretBuffer(***)");
        assert!(!format!("{buf:?}").contains("hunter2"));
    }
}
