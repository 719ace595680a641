#![no_main]

use framedata::analysis::{EventClassifier, build_attack_info};
use framedata::timeline::{FieldTemplates, JsonTimelineDecoder, TimelineDecoder};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let decoder = JsonTimelineDecoder;
    if !decoder.is_container(data) {
        return;
    }
    let Ok(container) = decoder.decode(data) else {
        return;
    };

    // Arbitrary parameter blocks must decode or error, never panic.
    let templates = FieldTemplates::default();
    let classifier = EventClassifier::new(&templates, container.version);
    for animation in &container.animations {
        let _ = build_attack_info(animation, "fuzz", &classifier);
    }
});
