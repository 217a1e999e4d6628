#![no_main]

use libfuzzer_sys::fuzz_target;
use tree_inventory::io::parse_stand;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(stand) = parse_stand(text) {
            assert!(stand.area.is_finite());
            for tree in &stand.trees {
                assert!(!tree.species.is_empty());
                assert!(tree.height.is_finite());
                assert!(tree.diameter.is_finite());
            }
        }
    }
});
