use super::*;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn timing(display: u64, transition: u64) -> Timing {
    Timing::new(ms(display), ms(transition)).unwrap()
}

#[test]
fn timing_validation() {
    assert!(Timing::new(Duration::ZERO, Duration::ZERO).is_err());
    assert!(Timing::new(ms(500), ms(501)).is_err());
    assert!(Timing::new(ms(500), ms(500)).is_ok());
    assert_eq!(timing(3000, 500).total(2), ms(6000));
}

#[test]
fn total_saturates_for_huge_entry_counts() {
    let t = timing(3000, 500);
    assert_eq!(t.total(usize::MAX), ms(3000).saturating_mul(u32::MAX));
    assert!(t.total(usize::MAX) >= t.total(1 << 20));
}

#[test]
fn advance_carries_remainder_without_dropping_time() {
    let mut clock = PlaybackClock::new(3, timing(1000, 200));
    assert_eq!(
        clock.advance(ms(400)),
        ClockTick::Showing {
            index: 0,
            entered: true
        }
    );
    assert_eq!(
        clock.advance(ms(400)),
        ClockTick::Showing {
            index: 0,
            entered: false
        }
    );
    assert_eq!(
        clock.advance(ms(300)),
        ClockTick::Showing {
            index: 1,
            entered: true
        }
    );
    assert_eq!(clock.elapsed(), ms(100));

    // A stall longer than a whole entry walks through it rather than wrapping.
    assert_eq!(
        clock.advance(ms(1850)),
        ClockTick::Showing {
            index: 2,
            entered: true
        }
    );
    assert_eq!(clock.elapsed(), ms(950));

    assert_eq!(clock.advance(ms(50)), ClockTick::Exhausted);
    assert!(clock.is_exhausted());
    assert_eq!(clock.advance(ms(1)), ClockTick::Exhausted);
}

#[test]
fn two_entry_scenario_blends_at_2600ms() {
    let t = timing(3000, 500);
    let mut clock = PlaybackClock::new(2, t);
    clock.advance(ms(2600));

    let plan = plan_frame(&clock, &t).unwrap();
    assert_eq!(plan.current.index, 0);
    assert_eq!(plan.current.opacity, 1.0);
    assert!((plan.current.zoom - 2600.0 / 3000.0).abs() < 1e-9);

    let incoming = plan.incoming.unwrap();
    assert_eq!(incoming.index, 1);
    assert_eq!(incoming.zoom, 0.0);
    assert!((incoming.opacity - 0.2).abs() < 1e-6);
}

#[test]
fn no_crossfade_before_window_or_after_last_entry() {
    let t = timing(3000, 500);
    let mut clock = PlaybackClock::new(2, t);
    clock.advance(ms(2500));
    assert!(plan_frame(&clock, &t).unwrap().incoming.is_none());

    clock.advance(ms(3400));
    let plan = plan_frame(&clock, &t).unwrap();
    assert_eq!(plan.current.index, 1);
    assert!(plan.incoming.is_none());
}

#[test]
fn single_entry_never_crossfades() {
    let t = timing(3000, 500);
    let mut clock = PlaybackClock::new(1, t);
    for _ in 0..89 {
        assert!(matches!(
            clock.advance(ms(33)),
            ClockTick::Showing { index: 0, .. }
        ));
        assert!(plan_frame(&clock, &t).unwrap().incoming.is_none());
    }
}

#[test]
fn full_length_transition_fades_monotonically() {
    let t = timing(1000, 1000);
    let mut clock = PlaybackClock::new(2, t);
    let mut last = -1.0f32;
    for _ in 0..9 {
        clock.advance(ms(100));
        let incoming = plan_frame(&clock, &t).unwrap().incoming.unwrap();
        assert!(incoming.opacity.is_finite());
        assert!(incoming.opacity > last);
        assert!((0.0..=1.0).contains(&incoming.opacity));
        last = incoming.opacity;
    }
}

#[test]
fn zero_transition_has_no_window() {
    let t = timing(1000, 0);
    let mut clock = PlaybackClock::new(2, t);
    clock.advance(ms(999));
    assert!(plan_frame(&clock, &t).unwrap().incoming.is_none());
}

#[test]
fn exhausted_clock_has_no_plan() {
    let t = timing(100, 0);
    let mut clock = PlaybackClock::new(1, t);
    assert_eq!(clock.advance(ms(100)), ClockTick::Exhausted);
    assert!(plan_frame(&clock, &t).is_none());
}
