//! Storage boundary: the text-encoded record handed to persistence.
//!
//! Field encodings follow the link-sharing client:
//!
//!   id                 base58
//!   passphrase_salt    base64
//!   passphrase_digest  hex      (lookup key)
//!   aes_iv             base64
//!   ciphertext         base64
//!
//! `max_views` / `max_days` are caller policy. They are carried verbatim and
//! never interpreted here. The passphrase has no field.

use serde::{Deserialize, Serialize};

use crate::codec::Codec;
use crate::envelope::EnvelopeParts;
use crate::error::{CodecError, EnvelopeError};
use crate::types::{AesIv, Identifier, Passphrase, PassphraseDigest, PassphraseSalt};

/// A caller policy value, kept exactly as it arrived.
///
/// Forms submit numbers as text, so both shapes are accepted. Anything else
/// fails deserialization instead of being dropped.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PolicyValue {
    Count(u64),
    Text(String),
}

impl From<u32> for PolicyValue {
    fn from(n: u32) -> Self {
        Self::Count(u64::from(n))
    }
}

/// View/expiry limits chosen by the caller. Each field is independent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkPolicy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_views: Option<PolicyValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_days: Option<PolicyValue>,
}

impl LinkPolicy {
    pub fn is_empty(&self) -> bool {
        self.max_views.is_none() && self.max_days.is_none()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredRecord {
    pub id: String,
    pub passphrase_salt: String,
    pub passphrase_digest: String,
    pub aes_iv: String,
    pub ciphertext: String,
    #[serde(flatten)]
    pub policy: LinkPolicy,
}

impl StoredRecord {
    pub fn from_parts(parts: &EnvelopeParts, policy: LinkPolicy) -> Self {
        Self {
            id: Codec::Base58.encode(parts.id.as_bytes()),
            passphrase_salt: Codec::Base64.encode(parts.salt.as_bytes()),
            passphrase_digest: Codec::Hex.encode(parts.digest.as_bytes()),
            aes_iv: Codec::Base64.encode(parts.iv.as_bytes()),
            ciphertext: Codec::Base64.encode(&parts.ciphertext),
            policy,
        }
    }

    /// Decode every field, checking encodings and sizes.
    pub fn decode(&self) -> Result<EnvelopeParts, CodecError> {
        Ok(EnvelopeParts {
            id: Identifier::from_slice(&Codec::Base58.decode(&self.id)?)?,
            salt: PassphraseSalt::from_slice(&Codec::Base64.decode(&self.passphrase_salt)?)?,
            digest: PassphraseDigest::from_slice(&Codec::Hex.decode(&self.passphrase_digest)?)?,
            iv: AesIv::from_slice(&Codec::Base64.decode(&self.aes_iv)?)?,
            ciphertext: Codec::Base64.decode(&self.ciphertext)?,
        })
    }

    /// Decode and open with the out-of-band passphrase.
    ///
    /// The identifier used for verification is the record's own; callers that
    /// received the id through a share link should use [`EnvelopeParts::open`]
    /// with the link's id instead.
    pub fn open(&self, passphrase: &Passphrase) -> Result<Vec<u8>, EnvelopeError> {
        self.decode()?.open(passphrase)
    }

    /// Whether this record is the one a viewer holding `digest` is looking for.
    pub fn matches_digest(&self, digest: &PassphraseDigest) -> bool {
        match Codec::Hex.decode(&self.passphrase_digest) {
            Ok(bytes) => PassphraseDigest::from_slice(&bytes).map_or(false, |d| d == *digest),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::Envelope;

    #[test]
    fn record_roundtrip_through_json() {
        let (passphrase, parts) = Envelope::new().create(b"stored").unwrap().into_parts();
        let record = StoredRecord::from_parts(
            &parts,
            LinkPolicy {
                max_views: Some(1u32.into()),
                max_days: Some(7u32.into()),
            },
        );

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"max_views\":1"));
        assert!(!json.contains("passphrase\""));

        let back: StoredRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
        assert_eq!(back.decode().unwrap(), parts);
        assert_eq!(back.open(&passphrase).unwrap(), b"stored");
    }

    #[test]
    fn policy_is_optional() {
        let (_, parts) = Envelope::new().create(b"x").unwrap().into_parts();
        let record = StoredRecord::from_parts(&parts, LinkPolicy::default());
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("max_views").is_none());
        assert!(json.get("max_days").is_none());
        let back: StoredRecord = serde_json::from_value(json).unwrap();
        assert!(back.policy.is_empty());
    }

    #[test]
    fn partial_policy_survives_roundtrip() {
        let (_, parts) = Envelope::new().create(b"x").unwrap().into_parts();
        let mut json = serde_json::to_value(StoredRecord::from_parts(&parts, LinkPolicy::default()))
            .unwrap();
        json["max_views"] = serde_json::json!(1);

        let back: StoredRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back.policy.max_views, Some(PolicyValue::Count(1)));
        assert_eq!(back.policy.max_days, None);

        let again = serde_json::to_value(&back).unwrap();
        assert_eq!(again["max_views"], serde_json::json!(1));
        assert!(again.get("max_days").is_none());
    }

    #[test]
    fn text_policy_is_carried_verbatim() {
        let (_, parts) = Envelope::new().create(b"x").unwrap().into_parts();
        let mut json = serde_json::to_value(StoredRecord::from_parts(&parts, LinkPolicy::default()))
            .unwrap();
        json["max_views"] = serde_json::json!("1");
        json["max_days"] = serde_json::json!("7");

        let back: StoredRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back.policy.max_views, Some(PolicyValue::Text("1".into())));
        assert_eq!(back.policy.max_days, Some(PolicyValue::Text("7".into())));

        let again = serde_json::to_value(&back).unwrap();
        assert_eq!(again["max_views"], serde_json::json!("1"));
        assert_eq!(again["max_days"], serde_json::json!("7"));
    }

    #[test]
    fn unsupported_policy_type_is_an_error() {
        let (_, parts) = Envelope::new().create(b"x").unwrap().into_parts();
        let mut json = serde_json::to_value(StoredRecord::from_parts(&parts, LinkPolicy::default()))
            .unwrap();
        json["max_days"] = serde_json::json!(true);
        assert!(serde_json::from_value::<StoredRecord>(json).is_err());
    }

    #[test]
    fn decode_rejects_bad_fields() {
        let (_, parts) = Envelope::new().create(b"x").unwrap().into_parts();
        let good = StoredRecord::from_parts(&parts, LinkPolicy::default());

        let mut odd_digest = good.clone();
        odd_digest.passphrase_digest.pop();
        assert!(matches!(odd_digest.decode(), Err(CodecError::Hex(_))));

        let mut short_iv = good.clone();
        short_iv.aes_iv = Codec::Base64.encode(&[0u8; 11]);
        assert_eq!(
            short_iv.decode(),
            Err(CodecError::InvalidLength {
                expected: 12,
                actual: 11
            })
        );

        let mut bad_id = good;
        bad_id.id.push('0');
        assert!(matches!(bad_id.decode(), Err(CodecError::Base58(_))));
    }

    #[test]
    fn digest_lookup() {
        let (passphrase, parts) = Envelope::new().create(b"x").unwrap().into_parts();
        let record = StoredRecord::from_parts(&parts, LinkPolicy::default());
        assert!(record.matches_digest(&PassphraseDigest::of(&passphrase)));
        let stranger = Passphrase::from_bytes([1u8; 64]);
        assert!(!record.matches_digest(&PassphraseDigest::of(&stranger)));
    }
}
