//! Loan lifecycle endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::loan::{Loan, LoanDetails},
};

/// Create loan request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateLoanRequest {
    /// Borrowing member
    #[validate(range(min = 1, message = "member_id must be positive"))]
    pub member_id: i32,
    /// Borrowed book
    #[validate(range(min = 1, message = "book_id must be positive"))]
    pub book_id: i32,
}

/// Approve or reject request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct DecideLoanRequest {
    /// true approves the loan, false rejects it
    pub approved: bool,
    /// Admin taking the decision
    #[validate(range(min = 1, message = "admin_id must be positive"))]
    pub admin_id: i32,
}

/// Purge confirmation
#[derive(Serialize, ToSchema)]
pub struct DeleteLoanResponse {
    pub message: String,
    pub loan_id: i32,
}

fn check<T: Validate>(request: &T) -> AppResult<()> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))
}

fn view(loan: Loan) -> LoanDetails {
    LoanDetails::new(loan, Utc::now())
}

fn views(loans: Vec<Loan>) -> Vec<LoanDetails> {
    let now = Utc::now();
    loans.into_iter().map(|l| LoanDetails::new(l, now)).collect()
}

/// Get all loans
#[utoipa::path(
    get,
    path = "/loans",
    tag = "loans",
    responses(
        (status = 200, description = "All loans", body = Vec<LoanDetails>)
    )
)]
pub async fn list_loans(State(state): State<crate::AppState>) -> AppResult<Json<Vec<LoanDetails>>> {
    let loans = state.services.loans.list_loans().await?;
    Ok(Json(views(loans)))
}

/// Get a loan by ID
#[utoipa::path(
    get,
    path = "/loans/{id}",
    tag = "loans",
    params(
        ("id" = i32, Path, description = "Loan ID")
    ),
    responses(
        (status = 200, description = "The loan", body = LoanDetails),
        (status = 404, description = "Loan not found")
    )
)]
pub async fn get_loan(
    State(state): State<crate::AppState>,
    Path(loan_id): Path<i32>,
) -> AppResult<Json<LoanDetails>> {
    let loan = state.services.loans.get_loan(loan_id).await?;
    Ok(Json(view(loan)))
}

/// Get loans for a member
#[utoipa::path(
    get,
    path = "/loans/member/{member_id}",
    tag = "loans",
    params(
        ("member_id" = i32, Path, description = "Member ID")
    ),
    responses(
        (status = 200, description = "The member's loans", body = Vec<LoanDetails>)
    )
)]
pub async fn get_member_loans(
    State(state): State<crate::AppState>,
    Path(member_id): Path<i32>,
) -> AppResult<Json<Vec<LoanDetails>>> {
    let loans = state.services.loans.loans_for_member(member_id).await?;
    Ok(Json(views(loans)))
}

/// Get loans for a book
#[utoipa::path(
    get,
    path = "/loans/book/{book_id}",
    tag = "loans",
    params(
        ("book_id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "The book's loans", body = Vec<LoanDetails>)
    )
)]
pub async fn get_book_loans(
    State(state): State<crate::AppState>,
    Path(book_id): Path<i32>,
) -> AppResult<Json<Vec<LoanDetails>>> {
    let loans = state.services.loans.loans_for_book(book_id).await?;
    Ok(Json(views(loans)))
}

/// Get loans awaiting an admin decision
#[utoipa::path(
    get,
    path = "/loans/status/pending",
    tag = "loans",
    responses(
        (status = 200, description = "Pending loans", body = Vec<LoanDetails>)
    )
)]
pub async fn get_pending_loans(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<LoanDetails>>> {
    let loans = state.services.loans.pending_loans().await?;
    Ok(Json(views(loans)))
}

/// Get active loans past their due date
#[utoipa::path(
    get,
    path = "/loans/status/overdue",
    tag = "loans",
    responses(
        (status = 200, description = "Overdue loans", body = Vec<LoanDetails>)
    )
)]
pub async fn get_overdue_loans(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<LoanDetails>>> {
    let loans = state.services.loans.overdue_loans().await?;
    Ok(Json(views(loans)))
}

/// Create a new loan (borrow a book)
#[utoipa::path(
    post,
    path = "/loans",
    tag = "loans",
    request_body = CreateLoanRequest,
    responses(
        (status = 201, description = "Loan created", body = LoanDetails),
        (status = 400, description = "Invalid request or book out of stock"),
        (status = 404, description = "Member or book not found"),
        (status = 502, description = "Member registry or inventory unreachable")
    )
)]
pub async fn create_loan(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateLoanRequest>,
) -> AppResult<(StatusCode, Json<LoanDetails>)> {
    check(&request)?;

    let loan = state
        .services
        .loans
        .create_loan(request.member_id, request.book_id)
        .await?;

    Ok((StatusCode::CREATED, Json(view(loan))))
}

/// Approve or reject a pending loan
#[utoipa::path(
    put,
    path = "/loans/{id}/approve",
    tag = "loans",
    params(
        ("id" = i32, Path, description = "Loan ID")
    ),
    request_body = DecideLoanRequest,
    responses(
        (status = 200, description = "Loan decided", body = LoanDetails),
        (status = 404, description = "Loan not found"),
        (status = 409, description = "Loan is not pending")
    )
)]
pub async fn decide_loan(
    State(state): State<crate::AppState>,
    Path(loan_id): Path<i32>,
    Json(request): Json<DecideLoanRequest>,
) -> AppResult<Json<LoanDetails>> {
    check(&request)?;

    let loan = state
        .services
        .loans
        .decide_loan(loan_id, request.approved, request.admin_id)
        .await?;

    Ok(Json(view(loan)))
}

/// Return a borrowed book
#[utoipa::path(
    put,
    path = "/loans/{id}/return",
    tag = "loans",
    params(
        ("id" = i32, Path, description = "Loan ID")
    ),
    responses(
        (status = 200, description = "Loan returned", body = LoanDetails),
        (status = 404, description = "Loan not found"),
        (status = 409, description = "Loan already returned or not active")
    )
)]
pub async fn return_loan(
    State(state): State<crate::AppState>,
    Path(loan_id): Path<i32>,
) -> AppResult<Json<LoanDetails>> {
    let loan = state.services.loans.return_loan(loan_id).await?;
    Ok(Json(view(loan)))
}

/// Delete a loan record (administrative purge)
#[utoipa::path(
    delete,
    path = "/loans/{id}",
    tag = "loans",
    params(
        ("id" = i32, Path, description = "Loan ID")
    ),
    responses(
        (status = 200, description = "Loan deleted", body = DeleteLoanResponse),
        (status = 404, description = "Loan not found")
    )
)]
pub async fn delete_loan(
    State(state): State<crate::AppState>,
    Path(loan_id): Path<i32>,
) -> AppResult<Json<DeleteLoanResponse>> {
    state.services.loans.delete_loan(loan_id).await?;

    Ok(Json(DeleteLoanResponse {
        message: "Loan deleted successfully".to_string(),
        loan_id,
    }))
}
