//! Digest: SHA-256, used only to fingerprint the passphrase.

use sha2::{Digest, Sha256};

use crate::types::DIGEST_BYTES;

pub fn digest(data: &[u8]) -> [u8; DIGEST_BYTES] {
    let h = Sha256::digest(data);
    let mut out = [0u8; DIGEST_BYTES];
    out.copy_from_slice(&h);
    out
}
