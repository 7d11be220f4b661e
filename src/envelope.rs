//! Envelope protocol: create (seal) and verified open.
//!
//! create:
//!   passphrase, salt, iv <- random
//!   id     = HMAC(passphrase, plaintext)
//!   digest = SHA-256(passphrase)
//!   key    = HKDF(passphrase, salt)
//!   ct     = AES-GCM(key, iv, plaintext)
//!
//! open:
//!   key = HKDF(passphrase, salt)
//!   pt  = AES-GCM-open(key, iv, ct)        -> AuthenticationFailure
//!   HMAC-verify(id, pt, passphrase)        -> IntegrityMismatch
//!
//! The AEAD tag binds the ciphertext to (key, iv); the MAC binds the plaintext
//! to (passphrase, id). Storage never holds the passphrase, so it can forge
//! neither.

use crate::error::EnvelopeError;
use crate::kdf::{self, DerivedKey};
use crate::random::{OsRandom, RandomSource};
use crate::types::{
    AesIv, Identifier, Passphrase, PassphraseDigest, PassphraseSalt, IV_BYTES, PASSPHRASE_BYTES,
    SALT_BYTES,
};
use crate::{aead, mac};

// ---------------------------------------------------------------------------
// Sealed envelope
// ---------------------------------------------------------------------------

/// Everything produced by one `create` call.
#[derive(Debug)]
pub struct SealedEnvelope {
    pub id: Identifier,
    pub passphrase: Passphrase,
    pub salt: PassphraseSalt,
    pub digest: PassphraseDigest,
    pub iv: AesIv,
    pub ciphertext: Vec<u8>,
}

/// The public half of an envelope: safe to hand to storage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnvelopeParts {
    pub id: Identifier,
    pub salt: PassphraseSalt,
    pub digest: PassphraseDigest,
    pub iv: AesIv,
    pub ciphertext: Vec<u8>,
}

impl SealedEnvelope {
    /// Split off the passphrase, which must travel out-of-band.
    pub fn into_parts(self) -> (Passphrase, EnvelopeParts) {
        let Self {
            id,
            passphrase,
            salt,
            digest,
            iv,
            ciphertext,
        } = self;
        (
            passphrase,
            EnvelopeParts {
                id,
                salt,
                digest,
                iv,
                ciphertext,
            },
        )
    }
}

impl EnvelopeParts {
    /// Open these parts with the out-of-band passphrase.
    pub fn open(&self, passphrase: &Passphrase) -> Result<Vec<u8>, EnvelopeError> {
        open(&self.id, passphrase, &self.salt, &self.iv, &self.ciphertext)
    }
}

// ---------------------------------------------------------------------------
// Freshly minted secrets
// ---------------------------------------------------------------------------

pub(crate) struct Minted {
    pub passphrase: Passphrase,
    pub salt: PassphraseSalt,
    pub iv: AesIv,
}

pub(crate) fn mint<R: RandomSource>(rng: &R) -> Result<Minted, EnvelopeError> {
    let passphrase = Passphrase::from_bytes(rng.random_array::<PASSPHRASE_BYTES>()?);
    let salt = PassphraseSalt::from_bytes(rng.random_array::<SALT_BYTES>()?);
    let iv = AesIv::from_bytes(rng.random_array::<IV_BYTES>()?);
    Ok(Minted {
        passphrase,
        salt,
        iv,
    })
}

// ---------------------------------------------------------------------------
// Protocol steps shared by the sync and async paths
// ---------------------------------------------------------------------------

pub(crate) fn sign_id(passphrase: &Passphrase, plaintext: &[u8]) -> Result<Identifier, EnvelopeError> {
    mac::sign(passphrase.as_bytes(), plaintext).map(Identifier::from_bytes)
}

pub(crate) fn derive(passphrase: &Passphrase, salt: &PassphraseSalt) -> Result<DerivedKey, EnvelopeError> {
    kdf::derive_key(passphrase.as_bytes(), salt.as_bytes())
}

pub(crate) fn verify_id(
    id: &Identifier,
    plaintext: Vec<u8>,
    passphrase: &Passphrase,
) -> Result<Vec<u8>, EnvelopeError> {
    if mac::verify(id.as_bytes(), &plaintext, passphrase.as_bytes()) {
        tracing::debug!(plaintext_len = plaintext.len(), "envelope opened");
        Ok(plaintext)
    } else {
        tracing::error!(
            target: "linkseal::security",
            "identifier does not match decrypted content; record may be tampered"
        );
        Err(EnvelopeError::IntegrityMismatch)
    }
}

pub(crate) fn log_rejection(err: &EnvelopeError) {
    if *err == EnvelopeError::AuthenticationFailure {
        tracing::debug!("envelope rejected: authentication failure");
    }
}

// ---------------------------------------------------------------------------
// Envelope engine
// ---------------------------------------------------------------------------

/// Creates envelopes from a random source.
///
/// Stateless apart from the source; share it freely across threads.
#[derive(Clone, Debug, Default)]
pub struct Envelope<R = OsRandom> {
    rng: R,
}

impl Envelope<OsRandom> {
    pub fn new() -> Self {
        Self { rng: OsRandom }
    }
}

impl<R: RandomSource> Envelope<R> {
    /// Use a caller-supplied random source.
    pub fn with_random_source(rng: R) -> Self {
        Self { rng }
    }

    pub(crate) fn rng(&self) -> &R {
        &self.rng
    }

    /// Seal `plaintext` into a fresh envelope.
    ///
    /// Any failure aborts the whole call; no partial envelope is returned.
    pub fn create(&self, plaintext: &[u8]) -> Result<SealedEnvelope, EnvelopeError> {
        let Minted {
            passphrase,
            salt,
            iv,
        } = mint(&self.rng)?;

        let id = sign_id(&passphrase, plaintext)?;
        let digest = PassphraseDigest::of(&passphrase);
        let key = derive(&passphrase, &salt)?;

        let ciphertext = aead::seal(plaintext, &iv, &key)?;
        tracing::debug!(
            plaintext_len = plaintext.len(),
            ciphertext_len = ciphertext.len(),
            "envelope sealed"
        );

        Ok(SealedEnvelope {
            id,
            passphrase,
            salt,
            digest,
            iv,
            ciphertext,
        })
    }

    /// See [`open`].
    pub fn open(
        &self,
        id: &Identifier,
        passphrase: &Passphrase,
        salt: &PassphraseSalt,
        iv: &AesIv,
        ciphertext: &[u8],
    ) -> Result<Vec<u8>, EnvelopeError> {
        open(id, passphrase, salt, iv, ciphertext)
    }
}

/// Decrypt and verify an envelope.
///
/// Fails with `AuthenticationFailure` when the tag does not verify (the usual
/// wrong-passphrase case) and with `IntegrityMismatch` when decryption
/// succeeds but `id` is not the MAC of the plaintext.
pub fn open(
    id: &Identifier,
    passphrase: &Passphrase,
    salt: &PassphraseSalt,
    iv: &AesIv,
    ciphertext: &[u8],
) -> Result<Vec<u8>, EnvelopeError> {
    let key = derive(passphrase, salt)?;
    let plaintext = aead::open(ciphertext, iv, &key).map_err(|e| {
        log_rejection(&e);
        e
    })?;
    drop(key);
    verify_id(id, plaintext, passphrase)
}
