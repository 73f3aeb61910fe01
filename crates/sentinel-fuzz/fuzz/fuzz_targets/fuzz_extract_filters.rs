#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Extraction is total: any text yields a URL on the works endpoint
    if let Ok(query) = std::str::from_utf8(data) {
        let url = sentinel_fuzz::query_to_url(query);
        assert!(url.starts_with("https://api.openalex.org/works?filter="));
    }
});
