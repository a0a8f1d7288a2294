#![no_main]
use libfuzzer_sys::fuzz_target;
use shelf_read::metadata;

fuzz_target!(|data: &[u8]| {
    if let Ok(found) = metadata::parse(data) {
        assert!(!found.family.trim().is_empty());
        assert!(!found.style.trim().is_empty());
        assert!(!found.full_name.trim().is_empty());
        if let Some(weight) = found.weight {
            assert!((1..=1000).contains(&weight.value()));
        }
    }
});
