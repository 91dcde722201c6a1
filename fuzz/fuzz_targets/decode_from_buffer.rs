#![no_main]

use libfuzzer_sys::fuzz_target;
use plaiceholder::{CssFormat, Placeholder, PlaceholderOptions};

// Arbitrary bytes must either fail cleanly or yield a placeholder whose
// strategies all succeed.
fuzz_target!(|data: &[u8]| {
    let Ok(mut placeholder) = Placeholder::from_bytes(data.to_vec(), PlaceholderOptions::new())
    else {
        return;
    };

    let (w, h) = placeholder.dimensions();
    assert!(w >= 1 && h >= 1 && w <= 4 && h <= 4);

    placeholder.base64().unwrap();
    placeholder.blurhash().unwrap();
    placeholder.css(CssFormat::Properties).unwrap();
    placeholder.svg(false).unwrap();
});
