//! Fuzz target for path expression parsing.
//!
//! Parsing must never panic, and any parsed path must render to an
//! expression that parses back to the same segments.

#![no_main]

use libfuzzer_sys::fuzz_target;
use rustible_utils::paths::Path;

fuzz_target!(|input: &str| {
    let Ok(parsed) = Path::parse(input) else {
        return;
    };

    // Anchor under a fixed first key so every parsed segment is rendered in
    // its dotted or bracketed form.
    let mut anchored = Path::root().join("v");
    for segment in parsed.segments() {
        anchored = anchored.join(segment.clone());
    }
    let rendered = anchored.to_string();

    let reparsed = Path::parse(&rendered[1..]).expect("rendered path must parse");
    assert_eq!(reparsed.segments(), parsed.segments(), "{:?} -> {:?}", input, rendered);
});
