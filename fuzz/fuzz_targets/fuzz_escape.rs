#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Escaped values never carry grammar metacharacters
    let escaped = fiqlc::search::escape::encode(data);
    assert!(!fiqlc::search::escape::needs_escaping(&escaped));
    let _ = fiqlc::search::escape::decode(data);
});
