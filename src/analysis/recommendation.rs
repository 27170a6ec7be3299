use crate::models::debt::Recommendation;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Deadlines this many days out (or fewer, or overdue) are treated as imminent.
pub const IMMINENT_DEADLINE_DAYS: i64 = 3;

/// Below this share of the amount, the surplus is too thin to commit.
pub const DELAY_SURPLUS_RATIO: f64 = 0.5;

const RATIONALE_PAY_NOW_IMMINENT: &str =
    "Deadline is critical and your surplus covers the full amount. Paying now avoids late penalties.";
const RATIONALE_ESCALATE: &str =
    "Deadline is critical but your surplus is insufficient. Reallocate funds from discretionary categories to cover this debt.";
const RATIONALE_DELAY: &str =
    "Your surplus is too low relative to this debt. Close other spending leaks before committing funds.";
const RATIONALE_PAY_NOW_COMFORTABLE: &str =
    "Your surplus comfortably covers this debt. Paying now strengthens your credit standing and reduces financial stress.";
const RATIONALE_PARTIAL: &str =
    "Pay roughly half now to reduce the obligation while keeping liquidity for essentials.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationResult {
    pub recommendation: Recommendation,
    pub rationale: String,
}

impl RecommendationResult {
    fn new(recommendation: Recommendation, rationale: &str) -> Self {
        Self {
            recommendation,
            rationale: rationale.to_string(),
        }
    }
}

/// Signed whole days from `today` until `deadline`; negative when overdue.
pub fn days_to_deadline(deadline: NaiveDate, today: NaiveDate) -> i64 {
    deadline.signed_duration_since(today).num_days()
}

/// Recommend against today's UTC date.
pub fn recommend(amount: f64, deadline: NaiveDate, surplus: f64, total_inflow: f64) -> RecommendationResult {
    recommend_at(amount, deadline, surplus, total_inflow, Utc::now().date_naive())
}

/// Ordered decision list, first match wins:
/// - imminent deadline: pay now if the surplus covers it, otherwise escalate
/// - surplus under half the amount: delay
/// - surplus covers the amount: pay now
/// - otherwise: partial payment
///
/// `total_inflow` is part of the interface but does not affect the outcome.
pub fn recommend_at(
    amount: f64,
    deadline: NaiveDate,
    surplus: f64,
    _total_inflow: f64,
    today: NaiveDate,
) -> RecommendationResult {
    let days = days_to_deadline(deadline, today);

    if days <= IMMINENT_DEADLINE_DAYS {
        return if surplus >= amount {
            RecommendationResult::new(Recommendation::PayNow, RATIONALE_PAY_NOW_IMMINENT)
        } else {
            RecommendationResult::new(Recommendation::EscalatePriority, RATIONALE_ESCALATE)
        };
    }

    if surplus < amount * DELAY_SURPLUS_RATIO {
        RecommendationResult::new(Recommendation::DelayStrategically, RATIONALE_DELAY)
    } else if surplus >= amount {
        RecommendationResult::new(Recommendation::PayNow, RATIONALE_PAY_NOW_COMFORTABLE)
    } else {
        RecommendationResult::new(Recommendation::PartialPayment, RATIONALE_PARTIAL)
    }
}
