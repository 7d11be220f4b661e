//! AEAD: AES-256-GCM, 12-byte nonce, 16-byte tag appended, no associated data.

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};

use crate::error::EnvelopeError;
use crate::kdf::DerivedKey;
use crate::types::{AesIv, AEAD_TAG_BYTES};

/// Encrypt. Output is `plaintext.len() + 16` bytes.
pub fn seal(plaintext: &[u8], iv: &AesIv, key: &DerivedKey) -> Result<Vec<u8>, EnvelopeError> {
    let cipher = Aes256Gcm::new_from_slice(key.expose())
        .map_err(|_| EnvelopeError::Primitive("aes-gcm key"))?;
    cipher
        .encrypt(Nonce::from_slice(iv.as_bytes()), plaintext)
        .map_err(|_| EnvelopeError::Primitive("aes-gcm seal"))
}

/// Decrypt and verify the tag. Returns no bytes on any mismatch.
pub fn open(ciphertext: &[u8], iv: &AesIv, key: &DerivedKey) -> Result<Vec<u8>, EnvelopeError> {
    if ciphertext.len() < AEAD_TAG_BYTES {
        return Err(EnvelopeError::AuthenticationFailure);
    }
    let cipher = Aes256Gcm::new_from_slice(key.expose())
        .map_err(|_| EnvelopeError::AuthenticationFailure)?;
    cipher
        .decrypt(Nonce::from_slice(iv.as_bytes()), ciphertext)
        .map_err(|_| EnvelopeError::AuthenticationFailure)
}
