use bram_rom_tools::error::EncodeError;
use bram_rom_tools::fixed_point::{from_hex, to_amplitude, to_hex, OverflowPolicy, SCALE};
use bram_rom_tools::sine_table::{SineTable, SineTableConfig, DEFAULT_SAMPLES};

fn table(samples: usize, cycle_multiplier: u32, overflow: OverflowPolicy) -> Result<SineTable, EncodeError> {
    SineTable::generate(&SineTableConfig {
        samples,
        cycle_multiplier,
        overflow,
    })
}

#[test]
fn test_default_config() {
    let config = SineTableConfig::default();
    assert_eq!(config.samples, 4096);
    assert_eq!(config.cycle_multiplier, 2);
    assert_eq!(config.overflow, OverflowPolicy::Saturate);
}

#[test]
fn test_sample_count_matches_config() {
    for samples in [1, 2, 7, 100, DEFAULT_SAMPLES] {
        for f in [1, 2, 4, 8] {
            let t = table(samples, f, OverflowPolicy::Saturate).unwrap();
            assert_eq!(t.len(), samples);
            assert!(t.words().all(|w| to_hex(w).len() == 4));
        }
    }
}

#[test]
fn test_first_word_is_zero() {
    let t = SineTable::generate(&SineTableConfig::default()).unwrap();
    assert_eq!(to_hex(t.samples()[0].word), "0000");
}

#[test]
fn test_midpoint_word_default_table() {
    let t = SineTable::generate(&SineTableConfig::default()).unwrap();
    let mid = t.samples()[DEFAULT_SAMPLES / 2];
    assert!((mid.amplitude - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-12);
    assert_eq!(mid.word, 23170);
    assert_eq!(to_hex(mid.word), "5a82");
}

#[test]
fn test_default_table_is_monotonic_and_positive() {
    let t = SineTable::generate(&SineTableConfig::default()).unwrap();
    let words: Vec<i16> = t.words().collect();
    assert!(words.windows(2).all(|w| w[0] <= w[1]));
    assert!(words.iter().all(|&w| w >= 0));
}

#[test]
fn test_angles_span_f_pi_over_four() {
    let config = SineTableConfig {
        samples: 8,
        cycle_multiplier: 2,
        overflow: OverflowPolicy::Saturate,
    };
    assert_eq!(config.angle(0), 0.0);
    assert!((config.angle(4) - std::f64::consts::FRAC_PI_4).abs() < 1e-12);
    assert!((config.angle(8) - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
}

#[test]
fn test_round_trip_within_quantization_error() {
    for f in [1, 2, 3, 8, 12] {
        let t = table(1000, f, OverflowPolicy::Saturate).unwrap();
        for s in t.samples() {
            let decoded = from_hex(&to_hex(s.word)).unwrap();
            let err = (to_amplitude(decoded) - s.amplitude).abs();
            assert!(err <= 1.0 / SCALE, "f={} i={} err={}", f, s.index, err);
        }
    }
}

#[test]
fn test_full_period_has_negative_words() {
    let t = table(4096, 8, OverflowPolicy::Saturate).unwrap();
    let three_quarter = t.samples()[3072];
    assert!(three_quarter.word < -32000);
    assert!(to_hex(three_quarter.word).starts_with('8'));
}

#[test]
fn test_peak_overflow_policies() {
    // f = 8 reaches exactly pi/2 at sample N/4
    let saturated = table(4096, 8, OverflowPolicy::Saturate).unwrap();
    assert_eq!(saturated.samples()[1024].word, i16::MAX);
    assert_eq!(to_hex(saturated.samples()[1024].word), "7fff");

    let wrapped = table(4096, 8, OverflowPolicy::Wrap).unwrap();
    assert_eq!(to_hex(wrapped.samples()[1024].word), "8000");

    let rejected = table(4096, 8, OverflowPolicy::Reject);
    assert_eq!(
        rejected.unwrap_err(),
        EncodeError::Overflow {
            index: 1024,
            value: 32768
        }
    );
}

#[test]
fn test_quarter_table_never_overflows() {
    assert!(table(4096, 2, OverflowPolicy::Reject).is_ok());
}

#[test]
fn test_empty_table_rejected() {
    assert_eq!(
        table(0, 2, OverflowPolicy::Saturate).unwrap_err(),
        EncodeError::EmptyTable
    );
}
