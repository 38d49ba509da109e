use alloc::{
    format,
    string::{String, ToString},
    vec::Vec,
};

use quickcheck::{QuickCheck, TestResult};

use super::arbitrary::{Doc, Pad, quote};
use crate::{ErrorKind, extract, get_raw_value};

fn tests() -> u64 {
    if cfg!(any(miri, feature = "test-fast")) {
        10
    } else if is_ci::cached() {
        10_000
    } else {
        1_000
    }
}

fn as_strs(path: &[String]) -> Vec<&str> {
    path.iter().map(String::as_str).collect()
}

/// Property: with an empty path the extracted span is exactly the rendered
/// document, wherever it sits between whitespace.
#[test]
fn top_level_span_is_the_document() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(doc: Doc, lead: Pad, trail: Pad) -> bool {
        let text = doc.render();
        let src = [lead.0, text.as_str(), trail.0].concat();
        let Ok(raw) = extract(src.as_bytes(), &[]) else {
            return false;
        };
        raw.kind == doc.kind()
            && raw.value == text.as_bytes()
            && raw.position.byte_pos == lead.0.len()
            && raw.position.pos == lead.0.chars().count()
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(Doc, Pad, Pad) -> bool);
}

/// Property: a path of keys reaches the first field carrying each key, and
/// the span is that field's rendering.
#[test]
fn path_reaches_first_matching_field() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(doc: Doc, steps: Vec<usize>) -> bool {
        let (path, target) = doc.walk(&steps);
        let src = doc.render();
        match get_raw_value(src.as_bytes(), &as_strs(&path)) {
            Ok((kind, span)) => kind == target.kind() && span == target.render().as_bytes(),
            Err(_) => false,
        }
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(Doc, Vec<usize>) -> bool);
}

/// Property: extracting `[k1, k2, ...]` equals extracting `[k1]`, then `[k2]`
/// from that span, and so on.
#[test]
fn path_extraction_composes() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(doc: Doc, steps: Vec<usize>) -> bool {
        let (path, _) = doc.walk(&steps);
        let src = doc.render();
        let Ok(whole) = get_raw_value(src.as_bytes(), &as_strs(&path)) else {
            return false;
        };
        let mut step = (doc.kind(), src.as_bytes());
        for key in &path {
            match get_raw_value(step.1, &[key.as_str()]) {
                Ok(next) => step = next,
                Err(_) => return false,
            }
        }
        step == whole
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(Doc, Vec<usize>) -> bool);
}

/// Property: a key missing from a well-formed object is reported as a wrong
/// path.
#[test]
fn missing_key_is_wrong_path() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(fields: Vec<(String, Doc)>, missing: String, pad: Pad) -> TestResult {
        if fields.iter().any(|(k, _)| *k == missing) {
            return TestResult::discard();
        }
        let src = Doc::Object(fields, pad).render();
        let err = get_raw_value(src.as_bytes(), &[missing.as_str()]).unwrap_err();
        TestResult::from_bool(err.kind() == ErrorKind::WrongPath)
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(Vec<(String, Doc)>, String, Pad) -> TestResult);
}

/// Property: cutting a composite anywhere before its closing bracket is
/// always an error located inside the kept prefix.
#[test]
fn truncated_composites_fail_inside_the_prefix() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(doc: Doc, cut: usize) -> TestResult {
        if !matches!(doc, Doc::Array(..) | Doc::Object(..)) {
            return TestResult::discard();
        }
        let src = doc.render();
        let cut = cut % src.len();
        let prefix = &src.as_bytes()[..cut];
        match get_raw_value(prefix, &[]) {
            Ok(_) => TestResult::failed(),
            Err(err) => TestResult::from_bool(
                matches!(
                    err.kind(),
                    ErrorKind::Unexpected | ErrorKind::InvalidRune | ErrorKind::EmptyInput
                ) && err.byte_pos() <= cut,
            ),
        }
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(Doc, usize) -> TestResult);
}

/// Property: arbitrary input never panics, gives the same answer twice, and
/// any span or error position stays within the input.
#[test]
fn arbitrary_bytes_are_handled_deterministically() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(data: Vec<u8>, path: Vec<String>) -> bool {
        let path = as_strs(&path);
        let first = extract(&data, &path);
        let second = extract(&data, &path);
        if first != second {
            return false;
        }
        match first {
            Ok(raw) => {
                let range = data.as_ptr_range();
                let span = raw.value.as_ptr_range();
                range.start <= span.start && span.end <= range.end
            }
            Err(err) => err.pos() <= err.byte_pos() && err.byte_pos() <= data.len(),
        }
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(Vec<u8>, Vec<String>) -> bool);
}

/// Property: escaped keys match the text they decode to.
#[test]
fn quoted_keys_match_their_text() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(key: String, value: i64) -> bool {
        let src = format!("{{{}: {value}}}", quote(&key));
        get_raw_value(src.as_bytes(), &[key.as_str()])
            .is_ok_and(|(_, span)| span == value.to_string().as_bytes())
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(String, i64) -> bool);
}
