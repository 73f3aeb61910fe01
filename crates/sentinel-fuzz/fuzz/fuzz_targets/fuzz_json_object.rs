#![no_main]

use libfuzzer_sys::fuzz_target;
use scholar_chat::models::{BotResponse, FilterSet, WorkRecord, WorksResponse};

fuzz_target!(|data: &[u8]| {
    // First try to parse as valid JSON
    if let Ok(json) = serde_json::from_slice::<serde_json::Value>(data) {
        // Then try each model type
        let _ = serde_json::from_value::<WorksResponse>(json.clone());
        let _ = serde_json::from_value::<WorkRecord>(json.clone());
        let _ = serde_json::from_value::<FilterSet>(json.clone());
        let _ = serde_json::from_value::<BotResponse>(json);
    }
});
