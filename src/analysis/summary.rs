use crate::analysis::recommendation::{days_to_deadline, IMMINENT_DEADLINE_DAYS};
use crate::models::debt::{Debt, Importance, Recommendation};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtSummary {
    pub total_count: usize,
    pub total_amount: f64,
    pub overdue_count: usize,
    pub due_soon_count: usize,
    pub by_recommendation: BTreeMap<String, usize>,
    pub by_importance: BTreeMap<String, usize>,
}

/// Aggregate figures for the debt tracker header cards.
pub fn summarize(debts: &[Debt], today: NaiveDate) -> DebtSummary {
    let mut by_recommendation: BTreeMap<String, usize> = Recommendation::ALL
        .iter()
        .map(|r| (r.label().to_string(), 0))
        .collect();
    let mut by_importance: BTreeMap<String, usize> = Importance::ALL
        .iter()
        .map(|i| (i.as_str().to_string(), 0))
        .collect();

    let mut total_amount = 0.0;
    let mut overdue_count = 0;
    let mut due_soon_count = 0;

    for debt in debts {
        total_amount += debt.amount;

        let days = days_to_deadline(debt.deadline, today);
        if days < 0 {
            overdue_count += 1;
        } else if days <= IMMINENT_DEADLINE_DAYS {
            due_soon_count += 1;
        }

        *by_recommendation
            .entry(debt.recommendation.label().to_string())
            .or_insert(0) += 1;
        *by_importance
            .entry(debt.importance.as_str().to_string())
            .or_insert(0) += 1;
    }

    DebtSummary {
        total_count: debts.len(),
        total_amount,
        overdue_count,
        due_soon_count,
        by_recommendation,
        by_importance,
    }
}

/// Render an amount like `₦10,000` or `₦1,250.50`.
pub fn format_amount(amount: f64, symbol: &str) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let fraction = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if fraction == 0 {
        format!("{sign}{symbol}{grouped}")
    } else {
        format!("{sign}{symbol}{grouped}.{fraction:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn debt(id: &str, amount: f64, deadline: NaiveDate, importance: Importance, recommendation: Recommendation) -> Debt {
        Debt {
            id: id.to_string(),
            name: id.to_string(),
            amount,
            deadline,
            importance,
            recommendation,
            rationale: String::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn summarize_counts_deadlines_and_buckets() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 17).expect("valid date");
        let debts = vec![
            debt("a", 10000.0, today - Duration::days(2), Importance::High, Recommendation::EscalatePriority),
            debt("b", 2500.0, today + Duration::days(3), Importance::Low, Recommendation::PayNow),
            debt("c", 7500.0, today + Duration::days(40), Importance::Low, Recommendation::PartialPayment),
        ];

        let summary = summarize(&debts, today);
        assert_eq!(summary.total_count, 3);
        assert_eq!(summary.total_amount, 20000.0);
        assert_eq!(summary.overdue_count, 1);
        assert_eq!(summary.due_soon_count, 1);
        assert_eq!(summary.by_recommendation["Pay now"], 1);
        assert_eq!(summary.by_recommendation["Delay strategically"], 0);
        assert_eq!(summary.by_importance["low"], 2);
        assert_eq!(summary.by_importance["critical"], 0);
    }

    #[test]
    fn empty_list_summarizes_to_zero() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 17).expect("valid date");
        let summary = summarize(&[], today);
        assert_eq!(summary.total_count, 0);
        assert_eq!(summary.total_amount, 0.0);
        assert_eq!(summary.by_recommendation.len(), 4);
    }

    #[test]
    fn format_amount_groups_thousands() {
        assert_eq!(format_amount(10000.0, "₦"), "₦10,000");
        assert_eq!(format_amount(1250.5, "₦"), "₦1,250.50");
        assert_eq!(format_amount(999.0, "$"), "$999");
        assert_eq!(format_amount(1234567.0, "₦"), "₦1,234,567");
        assert_eq!(format_amount(-4200.0, "₦"), "-₦4,200");
        assert_eq!(format_amount(0.0, "₦"), "₦0");
    }
}
