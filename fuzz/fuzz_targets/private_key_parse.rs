#![no_main]

use libfuzzer_sys::fuzz_target;
use nof_config::PrivateKey;

fuzz_target!(|data: &[u8]| {
    let raw = String::from_utf8_lossy(data);
    if let Ok(key) = PrivateKey::parse(&raw) {
        let hex = key.expose_hex();
        assert_eq!(hex.len(), 64);
        assert!(!format!("{key:?}").contains(&hex));
        assert_eq!(PrivateKey::parse(&hex).map(|again| again.expose_hex()), Ok(hex));
    }
});
