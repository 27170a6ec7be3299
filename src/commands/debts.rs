use crate::analysis::recommendation::{recommend, RecommendationResult};
use crate::analysis::summary::{format_amount, summarize};
use crate::models::debt::DebtTerms;
use crate::models::snapshot::FinancialSnapshot;
use crate::store::DebtStore;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

/// Form-level checks the debt tracker runs before anything is stored.
pub fn validate_terms(terms: &DebtTerms) -> Result<(), String> {
    if terms.name.trim().is_empty() {
        return Err("All fields are required: name is empty".to_string());
    }
    if !terms.amount.is_finite() || terms.amount <= 0.0 {
        return Err("Amount must be a positive number".to_string());
    }
    Ok(())
}

pub fn preview_recommendation(
    terms: DebtTerms,
    snapshot: FinancialSnapshot,
) -> Result<RecommendationResult, String> {
    validate_terms(&terms)?;
    Ok(recommend(
        terms.amount,
        terms.deadline,
        snapshot.surplus,
        snapshot.total_inflow,
    ))
}

pub fn debt_crud(
    store: &Arc<Mutex<DebtStore>>,
    operation: String,
    terms: Option<DebtTerms>,
    snapshot: Option<FinancialSnapshot>,
    id: Option<String>,
) -> Result<Value, String> {
    let mut store = store.lock().map_err(|_| "Store lock error".to_string())?;

    match operation.as_str() {
        "create" => {
            let terms = terms.ok_or("Debt terms required for create")?;
            let snapshot = snapshot.ok_or("Financial snapshot required for create")?;
            validate_terms(&terms)?;

            let debt = store.add(terms, snapshot);
            let mut response = json!({"status": "created", "id": debt.id, "debt": debt});
            if let Some(warning) = store.take_persist_warning() {
                response["warning"] = json!(warning);
            }
            Ok(response)
        }
        "read" => {
            let id = id.ok_or("ID required for read")?;
            Ok(serde_json::to_value(store.get(&id)).unwrap_or(Value::Null))
        }
        "list" => Ok(serde_json::to_value(store.debts()).unwrap_or_default()),
        "delete" => {
            let id = id.ok_or("ID required for delete")?;
            let removed = store.delete(&id);
            let mut response = json!({"status": "deleted", "removed": removed});
            if let Some(warning) = store.take_persist_warning() {
                response["warning"] = json!(warning);
            }
            Ok(response)
        }
        _ => Err(format!("Unknown operation: {operation}")),
    }
}

/// Header-card figures, with the total rendered in the workspace currency.
pub fn get_debt_summary(store: &Arc<Mutex<DebtStore>>, currency_symbol: &str) -> Result<Value, String> {
    let store = store.lock().map_err(|_| "Store lock error".to_string())?;
    let today = chrono::Utc::now().date_naive();
    let summary = summarize(store.debts(), today);

    let mut value = serde_json::to_value(&summary).map_err(|e| format!("Serialize error: {e}"))?;
    value["total_amount_display"] = json!(format_amount(summary.total_amount, currency_symbol));
    Ok(value)
}
