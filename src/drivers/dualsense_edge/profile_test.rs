use crate::drivers::dualsense_edge::{
    profile::{Profile, ValueAdjustment, SLIDER_MAX, SLIDER_MIN, SLIDER_NEUTRAL},
    ReportError,
};

#[test]
fn test_fixed_value_ignores_slider() {
    let adjustment = ValueAdjustment::fixed(0x80);
    for index in SLIDER_MIN..=SLIDER_MAX {
        assert_eq!(adjustment.evaluate(index), 0x80);
    }
}

#[test]
fn test_step_modifier_is_linear() {
    let adjustment = ValueAdjustment::with_step(100, 3);
    assert_eq!(adjustment.evaluate(0), 100);
    for index in 1..=SLIDER_MAX {
        assert_eq!(
            adjustment.evaluate(index) - adjustment.evaluate(index - 1),
            3
        );
    }
}

#[test]
fn test_zero_step_reproduces_initial_value_at_neutral() {
    let adjustment = ValueAdjustment::with_step(0x42, 0);
    assert_eq!(adjustment.evaluate(SLIDER_NEUTRAL), 0x42);
}

#[test]
fn test_sequence_modifier_cycles() {
    let adjustment = ValueAdjustment::with_sequence(10, vec![1, 2, 3]);
    assert_eq!(adjustment.evaluate(0), 10);
    assert_eq!(adjustment.evaluate(1), 11);
    assert_eq!(adjustment.evaluate(2), 13);
    assert_eq!(adjustment.evaluate(3), 16);
    // Fourth step wraps back to the start of the sequence
    assert_eq!(adjustment.evaluate(4), 17);
    assert_eq!(adjustment.evaluate(10), 10 + 3 * (1 + 2 + 3) + 1);
}

#[test]
fn test_sequence_accumulates_from_zero_not_neutral() {
    // Accumulation is anchored at index 0: evaluating at the neutral
    // position still includes the first five steps. The firmware expects
    // this asymmetry, so it must not be "fixed" to center on neutral.
    let adjustment = ValueAdjustment::with_sequence(0, vec![4]);
    assert_eq!(adjustment.evaluate(SLIDER_NEUTRAL), 20);
}

#[test]
fn test_empty_sequence_is_no_modifier() {
    let adjustment = ValueAdjustment::with_sequence(42, Vec::new());
    assert_eq!(adjustment.evaluate(7), 42);
}

#[test]
fn test_evaluate_all_preserves_declaration_order() {
    let profile = Profile::new(
        "Order",
        vec![
            ValueAdjustment::fixed(1),
            ValueAdjustment::with_step(2, 1),
            ValueAdjustment::with_sequence(3, vec![10]),
        ],
    );
    assert_eq!(profile.evaluate_all(2), vec![1, 4, 23]);
}

#[test]
fn test_evaluate_does_not_clamp() {
    // The engine never clamps; range policy belongs to check_range
    let adjustment = ValueAdjustment::with_step(250, 2);
    assert_eq!(adjustment.evaluate(5), 260);
    let adjustment = ValueAdjustment::with_step(4, -1);
    assert_eq!(adjustment.evaluate(5), -1);
}

#[test]
fn test_check_range_flags_overflow() {
    let profile = Profile::new("", vec![ValueAdjustment::with_step(250, 2)]);
    assert!(profile.check_range(2).is_ok());
    let result = profile.check_range(3);
    assert!(matches!(
        result,
        Err(ReportError::ValueOutOfRange {
            position: 0,
            value: 256
        })
    ));
}

#[test]
fn test_check_range_flags_underflow() {
    let profile = Profile::new("", vec![ValueAdjustment::with_step(4, -1)]);
    assert!(profile.check_range(4).is_ok());
    assert!(profile.check_range(5).is_err());
}

#[test]
fn test_check_range_accepts_byte_bounds() {
    let profile = Profile::new(
        "",
        vec![ValueAdjustment::fixed(0), ValueAdjustment::fixed(255)],
    );
    assert!(profile.check_range(SLIDER_NEUTRAL).is_ok());
}
