#![no_main]

use libfuzzer_sys::fuzz_target;
use paramsync_router::{Location, SearchParams};

fuzz_target!(|data: &[u8]| {
    let Ok(query) = std::str::from_utf8(data) else {
        return;
    };

    // Serialization must be a fixed point after one parse.
    let params = SearchParams::parse(query);
    let serialized = params.to_string();
    assert_eq!(SearchParams::parse(&serialized), params);

    if let Ok(location) = Location::parse(&format!("/{query}")) {
        assert!(location.href().starts_with('/'));
        let _ = location.search_params();
    }
});
