//! Async create/open on a tokio runtime.
//!
//! Each primitive runs on the blocking pool, so the caller's task only
//! suspends. The three independent derivations of `create` (id, digest, key)
//! fan out and join with `try_join!`: the first error wins and the other
//! results are dropped.
//!
//! Secrets are shared with the blocking tasks through `Arc`. If the caller's
//! future is dropped, the last reference goes away when the tasks finish and
//! the passphrase and derived key are zeroized then.

use std::sync::Arc;

use zeroize::Zeroizing;

use crate::aead;
use crate::envelope::{self, Envelope, Minted, SealedEnvelope};
use crate::error::EnvelopeError;
use crate::kdf::DerivedKey;
use crate::random::RandomSource;
use crate::types::{AesIv, Identifier, Passphrase, PassphraseDigest, PassphraseSalt};

async fn blocking<T, F>(f: F) -> Result<T, EnvelopeError>
where
    F: FnOnce() -> Result<T, EnvelopeError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await.map_err(|e| {
        tracing::warn!(error = %e, "envelope task did not complete");
        EnvelopeError::Interrupted
    })?
}

/// The blocking steps `create_async` fans out.
#[derive(Clone, Copy)]
struct Steps {
    sign: fn(&Passphrase, &[u8]) -> Result<Identifier, EnvelopeError>,
    derive: fn(&Passphrase, &PassphraseSalt) -> Result<DerivedKey, EnvelopeError>,
}

const STEPS: Steps = Steps {
    sign: envelope::sign_id,
    derive: envelope::derive,
};

async fn seal_shared(
    steps: Steps,
    passphrase: Arc<Passphrase>,
    salt: PassphraseSalt,
    iv: AesIv,
    plaintext: &[u8],
) -> Result<SealedEnvelope, EnvelopeError> {
    let message = Arc::new(Zeroizing::new(plaintext.to_vec()));

    let (id, digest, key) = tokio::try_join!(
        blocking({
            let passphrase = Arc::clone(&passphrase);
            let message = Arc::clone(&message);
            move || (steps.sign)(&passphrase, &message)
        }),
        blocking({
            let passphrase = Arc::clone(&passphrase);
            move || Ok(PassphraseDigest::of(&passphrase))
        }),
        blocking({
            let passphrase = Arc::clone(&passphrase);
            move || (steps.derive)(&passphrase, &salt)
        }),
    )?;

    let ciphertext = blocking({
        let message = Arc::clone(&message);
        move || aead::seal(&message, &iv, &key)
    })
    .await?;

    tracing::debug!(
        plaintext_len = plaintext.len(),
        ciphertext_len = ciphertext.len(),
        "envelope sealed"
    );

    Ok(SealedEnvelope {
        id,
        passphrase: Passphrase::clone(&passphrase),
        salt,
        digest,
        iv,
        ciphertext,
    })
}

impl<R: RandomSource> Envelope<R> {
    /// Async [`Envelope::create`]. Must be polled inside a tokio runtime.
    pub async fn create_async(&self, plaintext: &[u8]) -> Result<SealedEnvelope, EnvelopeError> {
        let Minted {
            passphrase,
            salt,
            iv,
        } = envelope::mint(self.rng())?;
        seal_shared(STEPS, Arc::new(passphrase), salt, iv, plaintext).await
    }

    /// Async [`envelope::open`](crate::envelope::open).
    pub async fn open_async(
        &self,
        id: &Identifier,
        passphrase: &Passphrase,
        salt: &PassphraseSalt,
        iv: &AesIv,
        ciphertext: &[u8],
    ) -> Result<Vec<u8>, EnvelopeError> {
        open_async(id, passphrase, salt, iv, ciphertext).await
    }
}

/// Async [`envelope::open`](crate::envelope::open). Must be polled inside a
/// tokio runtime.
pub async fn open_async(
    id: &Identifier,
    passphrase: &Passphrase,
    salt: &PassphraseSalt,
    iv: &AesIv,
    ciphertext: &[u8],
) -> Result<Vec<u8>, EnvelopeError> {
    let passphrase = Arc::new(passphrase.clone());
    let salt = *salt;
    let iv = *iv;
    let id = *id;
    let ciphertext = ciphertext.to_vec();

    let key = blocking({
        let passphrase = Arc::clone(&passphrase);
        move || envelope::derive(&passphrase, &salt)
    })
    .await?;

    let plaintext = blocking(move || aead::open(&ciphertext, &iv, &key))
        .await
        .map_err(|e| {
            envelope::log_rejection(&e);
            e
        })?;

    blocking(move || envelope::verify_id(&id, plaintext, &passphrase)).await
}
