//! The three competing event processes and the next-event selector.

use serde::{Deserialize, Serialize};

/// Every event a trial can observe. The set is fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WalletEvent {
    Deposit,
    Withdrawal,
    Theft,
}

impl WalletEvent {
    pub const ALL: [WalletEvent; 3] = [Self::Deposit, Self::Withdrawal, Self::Theft];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Deposit    => "deposit",
            Self::Withdrawal => "withdrawal",
            Self::Theft      => "theft",
        }
    }
}

/// Pick the most imminent of three pending absolute times.
///
/// Exact ties go to Deposit, then Withdrawal, then Theft.
pub fn next_event(t_deposit: f64, t_withdrawal: f64, t_theft: f64) -> WalletEvent {
    if t_deposit <= t_withdrawal && t_deposit <= t_theft {
        WalletEvent::Deposit
    } else if t_withdrawal <= t_theft {
        WalletEvent::Withdrawal
    } else {
        WalletEvent::Theft
    }
}
