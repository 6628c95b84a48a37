#![no_main]

use docgroup::{stream, tree};
use libfuzzer_sys::fuzz_target;
use markup::{Document, Element, parse};

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    let Some((a, b)) = input.split_once('\u{0}') else {
        return;
    };
    let (Ok(ta), Ok(tb)) = (parse(a), parse(b)) else {
        return;
    };
    // Only documents inside the symbol domains are group elements.
    let (Ok(inverse_a), Ok(_)) = (tree::invert(ta.clone()), tree::invert(tb.clone())) else {
        return;
    };

    let sum = tree::add(ta.clone(), &tb).expect("a + b");
    let swapped = tree::add(tb.clone(), &ta).expect("b + a");
    assert!(tree::equal(&sum, &swapped), "a + b != b + a");
    assert_eq!(stream::add(a, b).expect("stream a + b"), sum.to_xml());

    let cancelled = tree::add(inverse_a, &ta).expect("-a + a");
    assert!(tree::equal(&cancelled, &Document::new(Element::new("_"))));

    let distance = tree::metric(&ta, &tb).expect("d(a, b)");
    assert_eq!(distance, tree::metric(&tb, &ta).expect("d(b, a)"));
    assert_eq!(tree::metric(&ta, &ta).expect("d(a, a)"), 0);
});
