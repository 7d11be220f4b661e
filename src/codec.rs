//! Text codecs used to move envelope bytes through records, forms, and URLs.
//!
//! Every codec is an exact inverse over the bytes it encodes, and `decode`
//! never returns partial output.

use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use base64::Engine;

use crate::error::CodecError;

/// Base58 alphabet (Bitcoin ordering).
pub const BASE58_ALPHABET: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Codec {
    /// Lowercase hexadecimal. Decoding accepts either case.
    Hex,
    /// Standard base64 alphabet with `=` padding.
    Base64,
    /// URL-safe base64 alphabet without padding.
    Base64Url,
    /// Base58, Bitcoin alphabet.
    Base58,
}

impl Codec {
    pub fn encode(self, data: &[u8]) -> String {
        match self {
            Self::Hex => hex::encode(data),
            Self::Base64 => STANDARD.encode(data),
            Self::Base64Url => URL_SAFE_NO_PAD.encode(data),
            Self::Base58 => bs58::encode(data).into_string(),
        }
    }

    pub fn decode(self, text: &str) -> Result<Vec<u8>, CodecError> {
        match self {
            Self::Hex => Ok(hex::decode(text)?),
            Self::Base64 => Ok(STANDARD.decode(text)?),
            Self::Base64Url => Ok(URL_SAFE_NO_PAD.decode(text)?),
            Self::Base58 => Ok(bs58::decode(text).into_vec()?),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Hex => "hex",
            Self::Base64 => "base64",
            Self::Base64Url => "base64url",
            Self::Base58 => "base58",
        }
    }
}

impl core::str::FromStr for Codec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hex" | "base16" => Ok(Self::Hex),
            "base64" => Ok(Self::Base64),
            "base64url" => Ok(Self::Base64Url),
            "base58" => Ok(Self::Base58),
            other => Err(format!("unknown codec '{}'", other)),
        }
    }
}
