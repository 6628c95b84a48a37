#![no_main]

use libfuzzer_sys::fuzz_target;
use markup::{EventReader, ParseConfig, parse};

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(doc) = parse(input) else {
        return;
    };
    let events = EventReader::new(input, ParseConfig::default())
        .collect::<Result<Vec<_>, _>>()
        .expect("events rejected what the builder accepted");
    assert_eq!(events.len(), doc.len() * 2);

    let xml = doc.to_xml();
    let reparsed = parse(&xml).expect("serialized document must parse");
    assert_eq!(reparsed.to_xml(), xml);
});
