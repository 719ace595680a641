#![no_main]

use framedata::config::loader::ConfigLoader;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(yaml_str) = std::str::from_utf8(data) {
        // Only panics matter; load errors are expected.
        let _ = ConfigLoader::with_defaults().load_from_str(yaml_str);
    }
});
