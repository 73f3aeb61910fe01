#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Malformed records must be tolerated, never panic
    let _ = sentinel_fuzz::payload_to_articles(data);
});
