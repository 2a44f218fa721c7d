//! Next-event selection: argmin with Deposit < Withdrawal < Theft on ties.

use custody_core::event::{next_event, WalletEvent};
use proptest::prelude::*;

#[test]
fn picks_the_smallest_time() {
    assert_eq!(next_event(1.0, 2.0, 3.0), WalletEvent::Deposit);
    assert_eq!(next_event(2.0, 1.0, 3.0), WalletEvent::Withdrawal);
    assert_eq!(next_event(3.0, 2.0, 1.0), WalletEvent::Theft);
}

#[test]
fn exact_ties_follow_priority_order() {
    assert_eq!(next_event(1.0, 1.0, 1.0), WalletEvent::Deposit);
    assert_eq!(next_event(1.0, 1.0, 2.0), WalletEvent::Deposit);
    assert_eq!(next_event(1.0, 2.0, 1.0), WalletEvent::Deposit);
    assert_eq!(next_event(2.0, 1.0, 1.0), WalletEvent::Withdrawal);
}

proptest! {
    #[test]
    fn returns_an_argmin(
        d in 0.0..1e6f64,
        w in 0.0..1e6f64,
        t in 0.0..1e6f64,
    ) {
        let times = [d, w, t];
        let min = d.min(w).min(t);
        let picked = next_event(d, w, t);
        let idx = WalletEvent::ALL.iter().position(|e| *e == picked).unwrap();
        prop_assert_eq!(times[idx], min);
        // Nothing earlier in priority order shares the minimum.
        prop_assert!(times[..idx].iter().all(|x| *x > min));
    }

    #[test]
    fn coarse_grid_exercises_ties(d in 0u8..3, w in 0u8..3, t in 0u8..3) {
        let (d, w, t) = (f64::from(d), f64::from(w), f64::from(t));
        let expected = if d <= w && d <= t {
            WalletEvent::Deposit
        } else if w <= t {
            WalletEvent::Withdrawal
        } else {
            WalletEvent::Theft
        };
        prop_assert_eq!(next_event(d, w, t), expected);
    }

    #[test]
    fn selection_is_pure(d in 0.0..10.0f64, w in 0.0..10.0f64, t in 0.0..10.0f64) {
        prop_assert_eq!(next_event(d, w, t), next_event(d, w, t));
    }
}
