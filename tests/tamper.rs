//! Any single-bit change to a stored field or the passphrase must reject.

use linkseal::{
    open, AesIv, Envelope, EnvelopeError, Identifier, Operation, Passphrase, PassphraseSalt,
    SealedEnvelope,
};
use proptest::prelude::*;

fn sealed() -> SealedEnvelope {
    Envelope::new().create(b"tamper target content").unwrap()
}

fn flip<const N: usize>(bytes: &[u8; N], bit: usize) -> [u8; N] {
    let mut out = *bytes;
    out[(bit / 8) % N] ^= 1 << (bit % 8);
    out
}

fn assert_rejected(result: Result<Vec<u8>, EnvelopeError>) {
    match result {
        Err(e) => assert!(e.is_rejection(), "unexpected error kind: {e:?}"),
        Ok(pt) => panic!("tampered envelope opened to {} bytes", pt.len()),
    }
}

#[test]
fn tamper_ciphertext_body_fails() {
    let env = sealed();
    let mut ct = env.ciphertext.clone();
    ct[0] ^= 0x01;
    assert_eq!(
        open(&env.id, &env.passphrase, &env.salt, &env.iv, &ct),
        Err(EnvelopeError::AuthenticationFailure)
    );
}

#[test]
fn tamper_tag_fails() {
    let env = sealed();
    let mut ct = env.ciphertext.clone();
    let last = ct.len() - 1;
    ct[last] ^= 0x80;
    assert_eq!(
        open(&env.id, &env.passphrase, &env.salt, &env.iv, &ct),
        Err(EnvelopeError::AuthenticationFailure)
    );
}

#[test]
fn truncated_ciphertext_fails() {
    let env = sealed();
    for len in [0, 1, 15, 16, env.ciphertext.len() - 1] {
        assert_eq!(
            open(&env.id, &env.passphrase, &env.salt, &env.iv, &env.ciphertext[..len]),
            Err(EnvelopeError::AuthenticationFailure),
            "len {len}"
        );
    }
}

#[test]
fn extended_ciphertext_fails() {
    let env = sealed();
    let mut ct = env.ciphertext.clone();
    ct.push(0);
    assert_eq!(
        open(&env.id, &env.passphrase, &env.salt, &env.iv, &ct),
        Err(EnvelopeError::AuthenticationFailure)
    );
}

#[test]
fn wrong_passphrase_is_authentication_failure_not_integrity() {
    let env = sealed();
    let other = Envelope::new().create(b"unrelated").unwrap();
    assert_eq!(
        open(&env.id, &other.passphrase, &env.salt, &env.iv, &env.ciphertext),
        Err(EnvelopeError::AuthenticationFailure)
    );
}

#[test]
fn tampered_id_is_integrity_mismatch() {
    let env = sealed();
    let id = Identifier::from_bytes(flip(env.id.as_bytes(), 0));
    assert_eq!(
        open(&id, &env.passphrase, &env.salt, &env.iv, &env.ciphertext),
        Err(EnvelopeError::IntegrityMismatch)
    );
}

#[test]
fn rejections_share_a_user_message() {
    let env = sealed();
    let id = Identifier::from_bytes(flip(env.id.as_bytes(), 3));
    let integrity = open(&id, &env.passphrase, &env.salt, &env.iv, &env.ciphertext).unwrap_err();
    let auth = open(&env.id, &env.passphrase, &env.salt, &env.iv, &[0u8; 40]).unwrap_err();
    assert_ne!(integrity, auth);
    assert_eq!(
        integrity.user_message(Operation::Open),
        auth.user_message(Operation::Open)
    );
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_flip_ciphertext_bit(bit in 0usize..((21 + 16) * 8)) {
        let env = sealed();
        let mut ct = env.ciphertext.clone();
        ct[bit / 8] ^= 1 << (bit % 8);
        assert_rejected(open(&env.id, &env.passphrase, &env.salt, &env.iv, &ct));
    }

    #[test]
    fn prop_flip_iv_bit(bit in 0usize..(12 * 8)) {
        let env = sealed();
        let iv = AesIv::from_bytes(flip(env.iv.as_bytes(), bit));
        assert_rejected(open(&env.id, &env.passphrase, &env.salt, &iv, &env.ciphertext));
    }

    #[test]
    fn prop_flip_salt_bit(bit in 0usize..(64 * 8)) {
        let env = sealed();
        let salt = PassphraseSalt::from_bytes(flip(env.salt.as_bytes(), bit));
        assert_rejected(open(&env.id, &env.passphrase, &salt, &env.iv, &env.ciphertext));
    }

    #[test]
    fn prop_flip_passphrase_bit(bit in 0usize..(64 * 8)) {
        let env = sealed();
        let passphrase = Passphrase::from_bytes(flip(env.passphrase.as_bytes(), bit));
        assert_rejected(open(&env.id, &passphrase, &env.salt, &env.iv, &env.ciphertext));
    }

    #[test]
    fn prop_flip_id_bit(bit in 0usize..(32 * 8)) {
        let env = sealed();
        let id = Identifier::from_bytes(flip(env.id.as_bytes(), bit));
        prop_assert_eq!(
            open(&id, &env.passphrase, &env.salt, &env.iv, &env.ciphertext),
            Err(EnvelopeError::IntegrityMismatch)
        );
    }
}
