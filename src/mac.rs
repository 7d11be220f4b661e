//! Keyed MAC: HMAC-SHA-256.
//!
//! `id = HMAC(key = passphrase, message = plaintext)`

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::EnvelopeError;
use crate::types::ID_BYTES;

type HmacSha256 = Hmac<Sha256>;

/// Tag `message` under `key`.
pub fn sign(key: &[u8], message: &[u8]) -> Result<[u8; ID_BYTES], EnvelopeError> {
    let mut mac =
        HmacSha256::new_from_slice(key).map_err(|_| EnvelopeError::Primitive("hmac key"))?;
    mac.update(message);
    let mut out = [0u8; ID_BYTES];
    out.copy_from_slice(&mac.finalize().into_bytes());
    Ok(out)
}

/// Check `tag` against `message` under `key`.
///
/// Comparison is constant-time. A wrong-length tag is simply a mismatch.
pub fn verify(tag: &[u8], message: &[u8], key: &[u8]) -> bool {
    let Ok(mut mac) = HmacSha256::new_from_slice(key) else {
        return false;
    };
    mac.update(message);
    mac.verify_slice(tag).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    // RFC 4231 test case 2
    #[test]
    fn rfc4231_case_2() {
        let tag = sign(b"Jefe", b"what do ya want for nothing?").unwrap();
        assert_eq!(
            hex::encode(tag),
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn verify_accepts_own_tag() {
        let key = [0x0bu8; 64];
        let tag = sign(&key, b"message").unwrap();
        assert!(verify(&tag, b"message", &key));
    }

    #[test]
    fn verify_rejects_mismatches() {
        let key = [0x0bu8; 64];
        let mut tag = sign(&key, b"message").unwrap();
        assert!(!verify(&tag, b"messagf", &key));
        assert!(!verify(&tag, b"message", &[0x0cu8; 64]));
        assert!(!verify(&tag[..31], b"message", &key));
        tag[31] ^= 0x80;
        assert!(!verify(&tag, b"message", &key));
    }
}
