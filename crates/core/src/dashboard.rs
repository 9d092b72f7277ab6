//! Dashboard summary over the most recent contracts.

use serde::Serialize;

use crate::contract::{Contract, ContractStatus};
use crate::types::Date;

/// How many of the newest contracts the dashboard covers.
pub const RECENT_CONTRACTS_LIMIT: i64 = 10;

/// An end date within this many days (today inclusive) counts as expiring.
pub const EXPIRING_WINDOW_DAYS: i64 = 30;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total_contracts: usize,
    pub active_contracts: usize,
    pub pending_contracts: usize,
    pub expiring_contracts: usize,
    pub total_value: f64,
}

/// Whether `end_date` falls in `[today, today + EXPIRING_WINDOW_DAYS]`.
pub fn is_expiring(end_date: Option<Date>, today: Date) -> bool {
    end_date.is_some_and(|end| {
        let days = (end - today).num_days();
        (0..=EXPIRING_WINDOW_DAYS).contains(&days)
    })
}

pub fn compute_stats(contracts: &[Contract], today: Date) -> DashboardStats {
    let count = |status: ContractStatus| contracts.iter().filter(|c| c.status == status).count();

    DashboardStats {
        total_contracts: contracts.len(),
        active_contracts: count(ContractStatus::Active),
        pending_contracts: count(ContractStatus::Pending),
        expiring_contracts: contracts
            .iter()
            .filter(|c| is_expiring(c.end_date, today))
            .count(),
        total_value: contracts.iter().filter_map(|c| c.contract_value).sum(),
    }
}
