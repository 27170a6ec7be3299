use serde::{Deserialize, Serialize};

/// The dashboard's financial figures at the moment a debt is recorded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSnapshot {
    pub surplus: f64,
    pub total_inflow: f64,
}

impl FinancialSnapshot {
    pub fn new(surplus: f64, total_inflow: f64) -> Self {
        Self {
            surplus,
            total_inflow,
        }
    }

    /// Surplus is income minus spending already committed for the period.
    pub fn from_totals(total_inflow: f64, committed_outflow: f64) -> Self {
        Self {
            surplus: total_inflow - committed_outflow,
            total_inflow,
        }
    }
}
