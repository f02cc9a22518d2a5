#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(raw) = std::str::from_utf8(data) {
        // Only checks for panics; errors are expected on junk input.
        let _ = wenxin_provider_qianfan::aggregate(raw);
    }
});
