use std::time::Duration;

use sevendom::{Easing, SlideSettings};

// ============================================================================
// Easing Function Tests
// ============================================================================

#[test]
fn test_easing_linear() {
    assert_eq!(Easing::Linear.apply(0.0), 0.0);
    assert_eq!(Easing::Linear.apply(0.5), 0.5);
    assert_eq!(Easing::Linear.apply(1.0), 1.0);
}

#[test]
fn test_easing_ease_in() {
    assert_eq!(Easing::EaseIn.apply(0.0), 0.0);
    assert_eq!(Easing::EaseIn.apply(1.0), 1.0);
    // Quadratic: slower start.
    assert_eq!(Easing::EaseIn.apply(0.5), 0.25);
}

#[test]
fn test_easing_ease_out() {
    assert_eq!(Easing::EaseOut.apply(0.0), 0.0);
    assert_eq!(Easing::EaseOut.apply(1.0), 1.0);
    // Faster start.
    assert_eq!(Easing::EaseOut.apply(0.5), 0.75);
}

#[test]
fn test_easing_ease_in_out() {
    assert_eq!(Easing::EaseInOut.apply(0.0), 0.0);
    assert_eq!(Easing::EaseInOut.apply(1.0), 1.0);
    assert_eq!(Easing::EaseInOut.apply(0.5), 0.5);
    assert!(Easing::EaseInOut.apply(0.25) < 0.25);
    assert!(Easing::EaseInOut.apply(0.75) > 0.75);
}

#[test]
fn test_easing_monotonic() {
    for easing in [
        Easing::Linear,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::EaseInOut,
    ] {
        let mut prev = 0.0;
        for i in 1..=10 {
            let t = i as f32 / 10.0;
            let val = easing.apply(t);
            assert!(val >= prev, "{:?} not monotonic at t={}", easing, t);
            prev = val;
        }
    }
}

// ============================================================================
// SlideSettings
// ============================================================================

#[test]
fn test_slide_settings_default_is_slow() {
    let slide = SlideSettings::default();
    assert_eq!(slide.duration, Duration::from_millis(600));
    assert_eq!(slide.easing, Easing::EaseInOut);
}

#[test]
fn test_slide_settings_instant() {
    assert!(SlideSettings::instant().duration.is_zero());
}

#[test]
fn test_slide_settings_new() {
    let slide = SlideSettings::new(Duration::from_millis(250), Easing::EaseOut);
    assert_eq!(slide.duration, Duration::from_millis(250));
    assert_eq!(slide.easing, Easing::EaseOut);
}
