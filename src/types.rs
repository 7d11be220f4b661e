//! Envelope artifacts and their sizes.
//!
//!   passphrase[64]   secret, conveyed out-of-band only
//!   salt[64]         public, HKDF salt
//!   iv[12]           public, AES-GCM nonce
//!   digest[32]       public, SHA-256(passphrase), lookup key
//!   id[32]           public, HMAC-SHA-256(passphrase, plaintext), record key
//!   ciphertext       public, plaintext || tag[16]

use core::fmt;

use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::CodecError;

pub const PASSPHRASE_BYTES: usize = 64;
pub const SALT_BYTES: usize = 64;
pub const IV_BYTES: usize = 12;
pub const DIGEST_BYTES: usize = 32;
pub const ID_BYTES: usize = 32;
pub const AEAD_TAG_BYTES: usize = 16;
pub const AES_KEY_BYTES: usize = 32;

fn fixed<const N: usize>(bytes: &[u8]) -> Result<[u8; N], CodecError> {
    bytes.try_into().map_err(|_| CodecError::InvalidLength {
        expected: N,
        actual: bytes.len(),
    })
}

// ---------------------------------------------------------------------------
// Secret
// ---------------------------------------------------------------------------

/// Single-use secret from which the key, identifier, and digest are derived.
///
/// Never serialized by this crate and redacted from `Debug` output.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Passphrase([u8; PASSPHRASE_BYTES]);

impl Passphrase {
    pub fn from_bytes(bytes: [u8; PASSPHRASE_BYTES]) -> Self {
        Self(bytes)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, CodecError> {
        fixed(bytes).map(Self)
    }

    pub fn as_bytes(&self) -> &[u8; PASSPHRASE_BYTES] {
        &self.0
    }
}

impl fmt::Debug for Passphrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Passphrase(<redacted>)")
    }
}

impl PartialEq for Passphrase {
    fn eq(&self, other: &Self) -> bool {
        self.0[..].ct_eq(&other.0[..]).into()
    }
}

impl Eq for Passphrase {}

// ---------------------------------------------------------------------------
// Public artifacts
// ---------------------------------------------------------------------------

macro_rules! public_bytes {
    ($(#[$meta:meta])* $name:ident, $len:expr) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug)]
        pub struct $name([u8; $len]);

        impl $name {
            pub fn from_bytes(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }

            pub fn from_slice(bytes: &[u8]) -> Result<Self, CodecError> {
                fixed(bytes).map(Self)
            }

            pub fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }
    };
}

public_bytes!(
    /// HKDF salt, fresh per envelope.
    PassphraseSalt,
    SALT_BYTES
);

public_bytes!(
    /// AES-GCM nonce, fresh per envelope.
    AesIv,
    IV_BYTES
);

public_bytes!(
    /// SHA-256 of the passphrase. Lets storage index an envelope without
    /// learning the passphrase.
    PassphraseDigest,
    DIGEST_BYTES
);

public_bytes!(
    /// HMAC of the plaintext keyed by the passphrase; the record's primary key.
    Identifier,
    ID_BYTES
);

// Lookup keys are compared in constant time.
impl PartialEq for PassphraseDigest {
    fn eq(&self, other: &Self) -> bool {
        self.0[..].ct_eq(&other.0[..]).into()
    }
}

impl Eq for PassphraseDigest {}

impl PartialEq for Identifier {
    fn eq(&self, other: &Self) -> bool {
        self.0[..].ct_eq(&other.0[..]).into()
    }
}

impl Eq for Identifier {}

impl PartialEq for PassphraseSalt {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for PassphraseSalt {}

impl PartialEq for AesIv {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for AesIv {}

impl PassphraseDigest {
    /// Fingerprint a passphrase for lookup.
    pub fn of(passphrase: &Passphrase) -> Self {
        Self(crate::digest::digest(passphrase.as_bytes()))
    }
}
