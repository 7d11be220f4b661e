//! Random source: OS CSPRNG behind a trait seam.

use getrandom::getrandom;

use crate::error::EnvelopeError;

/// Supplier of cryptographically secure random bytes.
///
/// Implementations must fail with [`EnvelopeError::EntropyUnavailable`]
/// rather than fall back to a weaker generator.
pub trait RandomSource: Send + Sync {
    fn fill(&self, dest: &mut [u8]) -> Result<(), EnvelopeError>;

    /// `n` fresh random bytes.
    fn random_bytes(&self, n: usize) -> Result<Vec<u8>, EnvelopeError> {
        let mut out = vec![0u8; n];
        self.fill(&mut out)?;
        Ok(out)
    }

    /// A fresh random array.
    fn random_array<const N: usize>(&self) -> Result<[u8; N], EnvelopeError>
    where
        Self: Sized,
    {
        let mut out = [0u8; N];
        self.fill(&mut out)?;
        Ok(out)
    }
}

/// The operating system's generator via `getrandom`.
#[derive(Clone, Copy, Debug, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn fill(&self, dest: &mut [u8]) -> Result<(), EnvelopeError> {
        let requested = dest.len();
        getrandom(dest).map_err(|e| {
            tracing::error!(error = %e, requested, "secure random generator failed");
            EnvelopeError::EntropyUnavailable
        })
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &R {
    fn fill(&self, dest: &mut [u8]) -> Result<(), EnvelopeError> {
        (**self).fill(dest)
    }
}
