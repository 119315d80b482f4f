#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Parsing and decoding must never panic, whatever the input
    let context = fiqlc::fiql::ParseContext::default();
    if let Ok(condition) = fiqlc::fiql::parse(data, &context) {
        // Rendered text must parse again
        let text = condition.to_text();
        assert!(fiqlc::fiql::parse(&text, &context).is_ok());
    }
    let _ = fiqlc::search::decode(data, &context);
});
