#![no_main]

use arbitrary::Arbitrary;
use jsonpick::{ExtractOptions, Extractor};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    flags: u8,
    path: Vec<&'a str>,
    data: &'a [u8],
}

fn extract(input: &Input<'_>) {
    let options = ExtractOptions {
        allow_unicode_whitespace: input.flags & 1 != 0,
        allow_decimal_comma: input.flags & 2 != 0,
        max_depth: usize::from(input.flags >> 2) + 1,
    };

    match Extractor::with_options(input.data, options).extract(&input.path) {
        Ok(raw) => {
            assert!(raw.kind.is_value());
            let range = input.data.as_ptr_range();
            let span = raw.value.as_ptr_range();
            assert!(range.start <= span.start && span.end <= range.end);

            // A delimited value re-extracts to itself.
            let again = Extractor::with_options(raw.value, options)
                .extract(&[])
                .expect("span of a delimited value must extract");
            assert_eq!((again.kind, again.value), (raw.kind, raw.value));
        }
        Err(err) => {
            assert!(err.pos() <= err.byte_pos());
            assert!(err.byte_pos() <= input.data.len());
        }
    }
}

fuzz_target!(|input: Input<'_>| extract(&input));
