//! Out-of-band channel: the share link.
//!
//!   {origin}/s/{base58(id)}#{base58(passphrase)}
//!
//! The passphrase rides in the fragment, which browsers do not send to the
//! server. This module can build and parse the link; it cannot enforce how the
//! link travels.

use crate::codec::Codec;
use crate::error::CodecError;
use crate::types::{Identifier, Passphrase, PassphraseDigest};

const SHARE_PATH: &str = "/s/";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShareLink {
    origin: String,
    id: Identifier,
    passphrase: Passphrase,
}

impl ShareLink {
    /// Trailing slashes on `origin` are dropped.
    pub fn new(origin: &str, id: Identifier, passphrase: Passphrase) -> Self {
        Self {
            origin: origin.trim_end_matches('/').into(),
            id,
            passphrase,
        }
    }

    /// Parse `{origin}/s/{id}#{passphrase}`.
    pub fn parse(url: &str) -> Result<Self, CodecError> {
        let (location, fragment) = url
            .split_once('#')
            .ok_or(CodecError::MalformedLink("missing passphrase fragment"))?;
        let (origin, id_text) = location
            .rsplit_once(SHARE_PATH)
            .ok_or(CodecError::MalformedLink("missing /s/ path"))?;
        if id_text.is_empty() || id_text.contains('/') {
            return Err(CodecError::MalformedLink("bad id segment"));
        }

        let id = Identifier::from_slice(&Codec::Base58.decode(id_text)?)?;
        let passphrase = Passphrase::from_slice(&zeroize::Zeroizing::new(
            Codec::Base58.decode(fragment)?,
        ))?;

        Ok(Self::new(origin, id, passphrase))
    }

    pub fn to_url(&self) -> String {
        format!(
            "{}{}{}#{}",
            self.origin,
            SHARE_PATH,
            Codec::Base58.encode(self.id.as_bytes()),
            Codec::Base58.encode(self.passphrase.as_bytes())
        )
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn id(&self) -> &Identifier {
        &self.id
    }

    pub fn passphrase(&self) -> &Passphrase {
        &self.passphrase
    }

    /// Hex digest a viewer sends to look up the record.
    pub fn lookup_digest(&self) -> String {
        Codec::Hex.encode(PassphraseDigest::of(&self.passphrase).as_bytes())
    }
}
