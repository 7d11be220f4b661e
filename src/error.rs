//! Error taxonomy for envelope creation and opening.
//!
//! Variants are distinct so logs can tell a wrong passphrase from a tampered
//! record. Anything shown to an end user should go through
//! [`EnvelopeError::user_message`], which does not reveal which check failed.

use thiserror::Error;

/// Failure of a create/open call or of one of its primitives.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EnvelopeError {
    /// The OS random generator could not service the request.
    #[error("secure random generator unavailable")]
    EntropyUnavailable,

    /// The AEAD tag did not verify: wrong passphrase, salt, iv, or ciphertext.
    #[error("ciphertext failed authentication")]
    AuthenticationFailure,

    /// Decryption succeeded but the identifier does not match
    /// `MAC(passphrase, plaintext)`.
    #[error("decrypted content failed integrity check")]
    IntegrityMismatch,

    /// A field could not be decoded from its text form or has the wrong size.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// A primitive refused its input.
    #[error("{0} failed")]
    Primitive(&'static str),

    /// A blocking task was cancelled or panicked before producing a result.
    #[error("envelope task interrupted")]
    Interrupted,
}

impl EnvelopeError {
    /// True for the two terminal `Rejected` outcomes of opening.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::AuthenticationFailure | Self::IntegrityMismatch)
    }

    /// Message safe to show an end user of `op`. The same for every variant.
    pub fn user_message(&self, op: Operation) -> &'static str {
        match op {
            Operation::Create => "unable to create content",
            Operation::Open => "unable to retrieve content",
        }
    }
}

/// The call an error came out of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Open,
}

/// Malformed text, link, or field length at the codec boundary.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CodecError {
    #[error("invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("invalid base58: {0}")]
    Base58(#[from] bs58::decode::Error),

    #[error("expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("malformed share link: {0}")]
    MalformedLink(&'static str),
}
