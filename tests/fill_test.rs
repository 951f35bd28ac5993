// File: tests/fill_test.rs

use hwrand::{
    to_hex_string, Error, Family, Generator, ScriptedSource, SupportFlags, Width, RETRY_LIMIT,
};

fn scripted(rdrand: bool, rdseed: bool) -> ScriptedSource {
    ScriptedSource::new(SupportFlags::new(rdrand, rdseed)).with_seed(7)
}

#[test]
fn test_fill_length_matches_request() {
    let source = scripted(true, true);
    let generator = Generator::with_source(&source);

    for length in [0, 1, 7, 8, 9, 15, 16, 17, 63, 64, 65, 1000] {
        let fill = generator.fill(length, length % 2 == 0);
        assert_eq!(fill.len(), length, "fill({length}) returned the wrong length");
        assert!(fill.is_complete());
        assert_eq!(fill.words_drawn(), length.div_ceil(8));
    }
}

#[test]
fn test_twenty_bytes_from_three_rdrand_words() {
    let source = scripted(true, false);
    let generator = Generator::with_source(&source);

    let fill = generator.fill(20, false);

    assert_eq!(fill.len(), 20);
    assert_eq!(source.calls(Family::Rdrand), 3);
    assert_eq!(source.calls(Family::Rdseed), 0);
    assert!(source.produced().iter().all(|(f, _)| *f == Family::Rdrand));
}

#[test]
fn test_no_hardware_eight_bytes() {
    let source = scripted(false, false);
    let generator = Generator::with_source(&source);

    let fill = generator.fill(8, true);

    assert!(fill.is_empty());
    assert_eq!(fill.error(), Some(&Error::NoHardwareSupport));
    assert_eq!(source.total_calls(), 0, "no instruction should be attempted");
}

#[test]
fn test_fallback_is_transparent() {
    let preferred = scripted(true, false);
    let plain = scripted(true, false);

    let a = Generator::with_source(&preferred).fill(37, true);
    let b = Generator::with_source(&plain).fill(37, false);

    assert_eq!(a.bytes(), b.bytes());
    assert_eq!(a.family(), Some(Family::Rdrand));
    assert!(a.fell_back(), "the override of the RDSEED preference must be visible");
    assert_eq!(preferred.calls(Family::Rdseed), 0);
}

#[test]
fn test_draw_never_exceeds_retry_limit() {
    let source = scripted(true, true).always_failing();
    let generator = Generator::with_source(&source);

    for family in [Family::Rdrand, Family::Rdseed] {
        for width in [Width::W32, Width::W64] {
            let before = source.calls(family);
            let result = generator.draw(family, width);
            assert_eq!(
                result,
                Err(Error::RetryExhausted {
                    family,
                    width,
                    attempts: RETRY_LIMIT,
                })
            );
            assert_eq!(source.calls(family) - before, RETRY_LIMIT);
        }
    }
}

#[test]
fn test_short_fill_after_exhaustion() {
    let source = scripted(true, true);
    let generator = Generator::with_source(&source);
    source.set_always_fail(true);

    let fill = generator.fill(100, true);

    assert!(fill.len() < fill.requested());
    assert!(matches!(
        fill.clone().into_result(),
        Err(Error::RetryExhausted {
            family: Family::Rdseed,
            ..
        })
    ));
    assert_eq!(source.calls(Family::Rdseed), RETRY_LIMIT);
}

#[test]
fn test_hex_of_fill_round_trips() {
    let source = scripted(true, false);
    let fill = Generator::with_source(&source).fill(33, false);

    let text = to_hex_string(fill.bytes());
    assert_eq!(text.len(), 66);
    assert_eq!(hex::decode(&text).unwrap(), fill.bytes());
}
