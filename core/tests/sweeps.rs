//! μ sweeps over the engine and the solver.

use custody_core::{
    config::{HourlyRates, MuRange, RunConfig},
    error::SimError,
    solver::RecurrenceModel,
    sweep,
};

#[test]
fn theory_time_uses_exclusive_upper_bound() {
    let rates = HourlyRates::new(79.0, 78.0, 0.01);
    let rows = sweep::theory_time(rates, MuRange::exclusive(10, 600, 10)).unwrap();
    assert_eq!(rows.len(), 59);
    assert_eq!(rows.first().unwrap().mu, 10);
    assert_eq!(rows.last().unwrap().mu, 590);

    let model = RecurrenceModel::new(79.0, 78.0, 0.01).unwrap();
    for row in &rows {
        assert_eq!(row.expected_time_hours, model.expected_time(row.mu).unwrap());
    }
}

#[test]
fn theory_balance_rows() {
    let rates = HourlyRates::new(80.0, 78.0, 0.01);
    let rows = sweep::theory_balance(rates, 0.01, MuRange::exclusive(100, 130, 1)).unwrap();
    assert_eq!(rows.len(), 30);
    assert!(rows.iter().all(|r| r.expected_balance.is_finite()));
}

#[test]
fn balance_simulation_reports_every_mu() {
    let rates = HourlyRates::new(79.0, 78.0, 0.01);
    let rows = sweep::simulate_balance(rates, 0.01, 50.0, MuRange::inclusive(10, 12), RunConfig::new(20, 9)).unwrap();
    let mus: Vec<u32> = rows.iter().map(|r| r.threshold).collect();
    assert_eq!(mus, vec![10, 11, 12]);
    assert!(rows.iter().all(|r| r.iterations == 20));
}

#[test]
fn bad_inputs_surface_as_errors() {
    let rates = HourlyRates::new(80.0, 78.0, 0.01);
    assert!(matches!(
        sweep::theory_time(rates, MuRange::exclusive(50, 10, 10)),
        Err(SimError::InvalidMuRange { .. })
    ));
    assert!(matches!(
        sweep::simulate_depletion(HourlyRates::new(80.0, 0.0, 0.01), MuRange::inclusive(5, 6), RunConfig::new(10, 1)),
        Err(SimError::InvalidRate { name: "withdrawal_rate", .. })
    ));
    assert!(matches!(
        sweep::simulate_balance(rates, 0.01, -5.0, MuRange::inclusive(5, 6), RunConfig::new(10, 1)),
        Err(SimError::InvalidRunConfig { .. })
    ));
    assert!(matches!(
        sweep::simulate_balance(rates, 1.5, 10.0, MuRange::inclusive(5, 6), RunConfig::new(10, 1)),
        Err(SimError::InvalidProbability { .. })
    ));
}
