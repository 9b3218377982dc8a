use bram_rom_tools::fixed_point::{from_hex, quantize, to_amplitude, to_hex, OverflowPolicy, SCALE};

#[test]
fn test_scale_is_two_to_the_fifteen() {
    assert_eq!(SCALE, 32768.0);
}

#[test]
fn test_eighth_period_word() {
    // sin(pi/4) * 2^15 = 23170.47..., truncated
    let word = quantize(0, std::f64::consts::FRAC_1_SQRT_2, OverflowPolicy::Reject).unwrap();
    assert_eq!(word, 23170);
    assert_eq!(to_hex(word), "5a82");
}

#[test]
fn test_negative_words_are_twos_complement() {
    let word = quantize(0, -0.5, OverflowPolicy::Reject).unwrap();
    assert_eq!(word, -16384);
    assert_eq!(to_hex(word), "c000");
    assert_eq!(from_hex("c000"), Some(-16384));
}

#[test]
fn test_hex_always_four_digits() {
    for word in [i16::MIN, -4096, -1, 0, 1, 15, 16, 255, 256, 4095, 4096, i16::MAX] {
        let hex = to_hex(word);
        assert_eq!(hex.len(), 4, "{} -> {}", word, hex);
        assert_eq!(hex, hex.to_lowercase());
        assert_eq!(from_hex(&hex), Some(word));
    }
}

#[test]
fn test_amplitude_recovered_within_one_step() {
    let step = 1.0 / SCALE;
    let mut a = -0.999;
    while a < 0.999 {
        let word = quantize(0, a, OverflowPolicy::Reject).unwrap();
        let back = to_amplitude(word);
        assert!((back - a).abs() < step, "{} -> {} -> {}", a, word, back);
        // truncation never moves away from zero
        assert!(back.abs() <= a.abs());
        a += 0.0137;
    }
}
