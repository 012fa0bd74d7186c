#![no_main]

use clara_core::{extract, matches_extension, restore_target};
use libfuzzer_sys::fuzz_target;
use std::path::Path;

fuzz_target!(|data: &[u8]| {
    let name = String::from_utf8_lossy(data);
    let name: String = name.chars().take(255).collect();

    if let Some(info) = extract(&name) {
        // Anything accepted carries the page marker and lands on UTC midnight
        assert!(name.contains(".p."));
        assert!(info.date.timestamp() % 86_400 == 0);
    }

    let _ = matches_extension(&name, Some("jpeg"));
    let _ = restore_target(Path::new(&name));
});
