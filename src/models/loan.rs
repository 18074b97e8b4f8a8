//! Loan model and lifecycle types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Lifecycle status of a loan.
///
/// Transitions move forward only: `pending` is decided into `active` or
/// `rejected` by an admin, and an `active` loan ends as `returned`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "loan_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LoanStatus {
    Pending,
    Active,
    Rejected,
    Returned,
}

impl LoanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoanStatus::Pending => "pending",
            LoanStatus::Active => "active",
            LoanStatus::Rejected => "rejected",
            LoanStatus::Returned => "returned",
        }
    }
}

/// Loan model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Loan {
    pub id: i32,
    pub member_id: i32,
    pub book_id: i32,
    pub loan_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub return_date: Option<DateTime<Utc>>,
    pub status: LoanStatus,
    /// Admin who decided the loan; null while pending
    pub admin_id: Option<i32>,
}

impl Loan {
    /// A loan is overdue iff it is still active and its due date has passed.
    /// Pending loans (no decision yet) and terminal loans never count.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.status == LoanStatus::Active && self.due_date < now
    }
}

/// Loan as served to clients, with the overdue flag evaluated at read time
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LoanDetails {
    #[serde(flatten)]
    pub loan: Loan,
    pub is_overdue: bool,
}

impl LoanDetails {
    pub fn new(loan: Loan, now: DateTime<Utc>) -> Self {
        let is_overdue = loan.is_overdue(now);
        Self { loan, is_overdue }
    }
}

/// Insert payload for a new loan
#[derive(Debug, Clone, PartialEq)]
pub struct NewLoan {
    pub member_id: i32,
    pub book_id: i32,
    pub loan_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub status: LoanStatus,
}
