#![no_main]

use libfuzzer_sys::fuzz_target;
use nof_deployment::ContractArtifact;

fuzz_target!(|data: &[u8]| {
    let raw = String::from_utf8_lossy(data);
    if let Ok(artifact) = ContractArtifact::from_json_str(&raw) {
        assert!(!artifact.bytecode_hex().is_empty());
        assert!(artifact.bytecode_hex().chars().all(|ch| ch.is_ascii_hexdigit()));
        assert_eq!(artifact.bytecode_hex().len(), artifact.bytecode_size_bytes() * 2);
        assert_eq!(artifact.bytecode_sha256().len(), 64);
    }
});
