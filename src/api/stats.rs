//! Statistics endpoints

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::AppResult;

/// Loan counts for the admin and member dashboards
#[derive(Serialize, ToSchema)]
pub struct LoanStatsResponse {
    /// All loans ever recorded
    pub total: i64,
    /// Loans awaiting a decision
    pub pending: i64,
    /// Loans currently out
    pub active: i64,
    /// Active loans past their due date
    pub overdue: i64,
    /// Completed loans
    pub returned: i64,
    /// Rejected requests
    pub rejected: i64,
}

/// Get aggregate loan statistics
#[utoipa::path(
    get,
    path = "/stats/loans",
    tag = "stats",
    responses(
        (status = 200, description = "Loan statistics", body = LoanStatsResponse)
    )
)]
pub async fn get_loan_stats(
    State(state): State<crate::AppState>,
) -> AppResult<Json<LoanStatsResponse>> {
    let stats = state.services.loans.loan_stats().await?;
    Ok(Json(stats))
}
