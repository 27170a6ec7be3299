use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
    Low,
    Medium,
    High,
    Critical,
}

impl Importance {
    pub const ALL: [Importance; 4] = [
        Importance::Low,
        Importance::Medium,
        Importance::High,
        Importance::Critical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Importance::Low => "low",
            Importance::Medium => "medium",
            Importance::High => "high",
            Importance::Critical => "critical",
        }
    }
}

/// Suggested action for a debt, serialized with its display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Recommendation {
    #[serde(rename = "Pay now")]
    PayNow,
    #[serde(rename = "Delay strategically")]
    DelayStrategically,
    #[serde(rename = "Partial payment")]
    PartialPayment,
    #[serde(rename = "Escalate priority")]
    EscalatePriority,
}

impl Recommendation {
    pub const ALL: [Recommendation; 4] = [
        Recommendation::PayNow,
        Recommendation::DelayStrategically,
        Recommendation::PartialPayment,
        Recommendation::EscalatePriority,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Recommendation::PayNow => "Pay now",
            Recommendation::DelayStrategically => "Delay strategically",
            Recommendation::PartialPayment => "Partial payment",
            Recommendation::EscalatePriority => "Escalate priority",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What the user types into the "add debt" form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtTerms {
    pub name: String,
    pub amount: f64,
    pub deadline: NaiveDate,
    pub importance: Importance,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Debt {
    pub id: String,
    pub name: String,
    pub amount: f64,
    pub deadline: NaiveDate,
    pub importance: Importance,
    // Frozen at creation; never recomputed against a newer surplus.
    pub recommendation: Recommendation,
    pub rationale: String,
    pub created_at: DateTime<Utc>,
}
