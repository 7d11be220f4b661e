//! Key derivation: HKDF-SHA-512.
//!
//! key = HKDF-SHA-512(ikm = passphrase, salt = salt, info = "", len = 32)
//!
//! No info string: both inputs are single-use random values, so there is
//! nothing to separate.

use core::fmt;

use hkdf::Hkdf;
use sha2::Sha512;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::EnvelopeError;
use crate::types::AES_KEY_BYTES;

/// AES-256 key material usable only for sealing and opening.
///
/// There is no public constructor and no accessor for the raw bytes; only the
/// `aead` module can read them. Cleared on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey([u8; AES_KEY_BYTES]);

impl DerivedKey {
    pub(crate) fn expose(&self) -> &[u8; AES_KEY_BYTES] {
        &self.0
    }
}

impl fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DerivedKey(<opaque>)")
    }
}

pub fn derive_key(secret: &[u8], salt: &[u8]) -> Result<DerivedKey, EnvelopeError> {
    let hk = Hkdf::<Sha512>::new(Some(salt), secret);
    let mut key = DerivedKey([0u8; AES_KEY_BYTES]);
    hk.expand(&[], &mut key.0)
        .map_err(|_| EnvelopeError::Primitive("hkdf expand"))?;
    Ok(key)
}
