//! # linkseal
//!
//! Zero-knowledge passphrase envelopes for a link-sharing service.
//!
//! Content is encrypted on the client. Storage receives only the salt, IV,
//! ciphertext, a passphrase digest (lookup key), and a content-bound
//! identifier (record key). The passphrase travels out-of-band in the share
//! link fragment.
//!
//! ## Quick Start
//!
//! ```rust
//! use linkseal::{Envelope, LinkPolicy, StoredRecord};
//!
//! let envelope = Envelope::new().create(b"secret").unwrap();
//! let (passphrase, parts) = envelope.into_parts();
//!
//! // Only the public parts are persisted.
//! let record = StoredRecord::from_parts(&parts, LinkPolicy::default());
//!
//! let plaintext = record.open(&passphrase).unwrap();
//! assert_eq!(plaintext, b"secret");
//! ```
//!
//! ## Construction
//!
//! - **Passphrase / salt / IV**: 64 / 64 / 12 fresh random bytes per envelope
//! - **Key**: HKDF-SHA-512(passphrase, salt), 256 bits, never exported
//! - **Cipher**: AES-256-GCM, 16-byte tag
//! - **Identifier**: HMAC-SHA-256(passphrase, plaintext), verified after decrypt
//! - **Digest**: SHA-256(passphrase)
//!
//! ## What's NOT Provided
//!
//! - Server-side storage or access control
//! - View-count or expiry enforcement
//! - Transport of the share link

#![deny(unsafe_code)]

mod aead;
mod digest;
mod kdf;
mod mac;

pub mod codec;
pub mod envelope;
pub mod error;
pub mod link;
pub mod random;
pub mod record;
pub mod types;

#[cfg(feature = "async")]
pub mod concurrent;

pub use codec::Codec;
pub use envelope::{open, Envelope, EnvelopeParts, SealedEnvelope};
pub use error::{CodecError, EnvelopeError, Operation};
pub use link::ShareLink;
pub use random::{OsRandom, RandomSource};
pub use record::{LinkPolicy, PolicyValue, StoredRecord};
pub use types::{
    AesIv, Identifier, Passphrase, PassphraseDigest, PassphraseSalt, AEAD_TAG_BYTES,
    DIGEST_BYTES, ID_BYTES, IV_BYTES, PASSPHRASE_BYTES, SALT_BYTES,
};

#[cfg(feature = "async")]
pub use concurrent::open_async;

/// SHA-256 fingerprint of arbitrary bytes.
pub fn digest(data: &[u8]) -> [u8; DIGEST_BYTES] {
    digest::digest(data)
}
