//! Exponential sampling and the three-clock scheduler.

use custody_core::{
    clock::{sample_exponential, EventClock},
    config::ModelParameters,
    error::SimError,
    event::WalletEvent,
    rng::RngBank,
};

#[test]
fn samples_are_non_negative_and_mean_converges() {
    let mut rng = RngBank::new(0xC0FF_EE00).for_trial(0);
    for rate in [0.5, 3.0, 80.0 / 3600.0] {
        let n = 200_000;
        let mut sum = 0.0;
        for _ in 0..n {
            let x = sample_exponential(rate, &mut rng).unwrap();
            assert!(x >= 0.0 && x.is_finite(), "bad sample {x} at rate {rate}");
            sum += x;
        }
        let mean = sum / n as f64;
        let expected = 1.0 / rate;
        // SE of the mean is expected / sqrt(n) ≈ 0.22%.
        assert!(
            (mean - expected).abs() / expected < 0.015,
            "rate {rate}: mean {mean} vs 1/rate {expected}"
        );
    }
}

#[test]
fn zero_rate_fails_fast() {
    let mut rng = RngBank::new(1).for_trial(0);
    for rate in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        assert!(matches!(
            sample_exponential(rate, &mut rng),
            Err(SimError::InvalidRate { .. })
        ));
    }
}

#[test]
fn advance_rearms_only_the_fired_process() {
    let params = ModelParameters::new(2.0, 1.5, 0.1, 0.0, 10).unwrap();
    let mut rng = RngBank::new(42).for_trial(3);
    let mut clock = EventClock::start(&params, &mut rng).unwrap();

    for _ in 0..1_000 {
        let before = clock.clone();
        let (expected_event, expected_time) = before.peek();
        let fired = clock.advance(&mut rng).unwrap();

        assert_eq!(fired, expected_event);
        assert_eq!(clock.now, expected_time);
        assert!(clock.now >= before.now, "clock went backwards");
        for other in WalletEvent::ALL.into_iter().filter(|e| *e != fired) {
            assert_eq!(clock.pending(other), before.pending(other), "{} was resampled", other.name());
        }
        assert!(clock.pending(fired) > clock.now, "re-armed time not in the future");
    }
}
