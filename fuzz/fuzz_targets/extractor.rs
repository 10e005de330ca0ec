#![no_main]

use libfuzzer_sys::fuzz_target;
use serde_json::Value;

use douyin_relay::{extractor::extract, normalizer::normalize, template};

fuzz_target!(|data: &[u8]| {
    // Only well-formed JSON reaches the normalizer; anything else is a decode error upstream.
    let Ok(response) = serde_json::from_slice::<Value>(data) else {
        return;
    };

    let record = normalize(&response);
    if let Some(fields) = extract(&record) {
        let context = fields.template_context();
        let _ = template::render("{desc} {type} {digg_count} {duration} {nickname}", &context);
        let _ = fields.video_urls.preferred();
    }
});
