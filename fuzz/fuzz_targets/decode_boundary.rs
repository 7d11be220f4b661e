#![no_main]

use libfuzzer_sys::fuzz_target;
use linkseal::{Codec, ShareLink, StoredRecord};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    for codec in [Codec::Hex, Codec::Base64, Codec::Base64Url, Codec::Base58] {
        if let Ok(bytes) = codec.decode(text) {
            assert_eq!(codec.decode(&codec.encode(&bytes)).unwrap(), bytes);
        }
    }

    let _ = ShareLink::parse(text);

    if let Ok(record) = serde_json::from_str::<StoredRecord>(text) {
        let _ = record.decode();
    }
});
