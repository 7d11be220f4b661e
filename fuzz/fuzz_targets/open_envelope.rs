#![no_main]

use libfuzzer_sys::fuzz_target;
use linkseal::{open, AesIv, Envelope, EnvelopeError, Identifier, SealedEnvelope};
use once_cell::sync::Lazy;

static SEALED: Lazy<SealedEnvelope> =
    Lazy::new(|| Envelope::new().create(b"fuzz target").expect("create"));

// Arbitrary id, iv, and ciphertext against a real passphrase/salt must never
// open to anything but the original plaintext.
fuzz_target!(|data: &[u8]| {
    if data.len() < 44 {
        return;
    }
    let id = Identifier::from_slice(&data[..32]).expect("32 bytes");
    let iv = AesIv::from_slice(&data[32..44]).expect("12 bytes");
    let ct = &data[44..];

    match open(&id, &SEALED.passphrase, &SEALED.salt, &iv, ct) {
        Ok(pt) => assert_eq!(pt, b"fuzz target"),
        Err(e) => assert!(matches!(
            e,
            EnvelopeError::AuthenticationFailure | EnvelopeError::IntegrityMismatch
        )),
    }
});
