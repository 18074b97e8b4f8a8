//! Loans repository for database operations

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::loan::{Loan, LoanStatus, NewLoan},
};

/// Persistence contract for loan records.
///
/// The transition writers (`record_decision`, `record_return`) are conditional
/// single-row updates: they return `None` when the loan was not in the
/// expected state, which is how concurrent transitions against the same loan
/// are serialized: exactly one caller sees the row change.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoanStore: Send + Sync {
    async fn insert(&self, new: NewLoan) -> AppResult<Loan>;
    async fn get(&self, id: i32) -> AppResult<Option<Loan>>;
    async fn list(&self) -> AppResult<Vec<Loan>>;
    async fn list_by_member(&self, member_id: i32) -> AppResult<Vec<Loan>>;
    async fn list_by_book(&self, book_id: i32) -> AppResult<Vec<Loan>>;
    async fn list_by_status(&self, status: LoanStatus) -> AppResult<Vec<Loan>>;
    async fn list_overdue(&self, now: DateTime<Utc>) -> AppResult<Vec<Loan>>;

    /// Decide a pending loan: set `status` (active or rejected) and `admin_id`
    /// iff the loan is still pending. `None` means the guard did not match.
    async fn record_decision(
        &self,
        id: i32,
        status: LoanStatus,
        admin_id: i32,
    ) -> AppResult<Option<Loan>>;

    /// Close an active loan: set `returned` and the return date iff the loan
    /// is still active. `None` means the guard did not match.
    async fn record_return(&self, id: i32, returned_at: DateTime<Utc>)
        -> AppResult<Option<Loan>>;

    /// Administrative purge, independent of the state machine.
    /// Returns false when no such loan existed.
    async fn delete(&self, id: i32) -> AppResult<bool>;

    async fn count_total(&self) -> AppResult<i64>;
    async fn count_by_status(&self, status: LoanStatus) -> AppResult<i64>;
    async fn count_overdue(&self, now: DateTime<Utc>) -> AppResult<i64>;
}

#[derive(Clone)]
pub struct LoansRepository {
    pool: Pool<Postgres>,
}

impl LoansRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LoanStore for LoansRepository {
    async fn insert(&self, new: NewLoan) -> AppResult<Loan> {
        let loan = sqlx::query_as::<_, Loan>(
            r#"
            INSERT INTO loans (member_id, book_id, loan_date, due_date, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(new.member_id)
        .bind(new.book_id)
        .bind(new.loan_date)
        .bind(new.due_date)
        .bind(new.status)
        .fetch_one(&self.pool)
        .await?;

        Ok(loan)
    }

    async fn get(&self, id: i32) -> AppResult<Option<Loan>> {
        let loan = sqlx::query_as::<_, Loan>("SELECT * FROM loans WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(loan)
    }

    async fn list(&self) -> AppResult<Vec<Loan>> {
        let loans = sqlx::query_as::<_, Loan>("SELECT * FROM loans ORDER BY loan_date, id")
            .fetch_all(&self.pool)
            .await?;

        Ok(loans)
    }

    async fn list_by_member(&self, member_id: i32) -> AppResult<Vec<Loan>> {
        let loans = sqlx::query_as::<_, Loan>(
            "SELECT * FROM loans WHERE member_id = $1 ORDER BY loan_date, id",
        )
        .bind(member_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(loans)
    }

    async fn list_by_book(&self, book_id: i32) -> AppResult<Vec<Loan>> {
        let loans = sqlx::query_as::<_, Loan>(
            "SELECT * FROM loans WHERE book_id = $1 ORDER BY loan_date, id",
        )
        .bind(book_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(loans)
    }

    async fn list_by_status(&self, status: LoanStatus) -> AppResult<Vec<Loan>> {
        let loans = sqlx::query_as::<_, Loan>(
            "SELECT * FROM loans WHERE status = $1 ORDER BY loan_date, id",
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await?;

        Ok(loans)
    }

    async fn list_overdue(&self, now: DateTime<Utc>) -> AppResult<Vec<Loan>> {
        let loans = sqlx::query_as::<_, Loan>(
            r#"
            SELECT * FROM loans
            WHERE status = 'active' AND due_date < $1
            ORDER BY due_date, id
            "#,
        )
        .bind(now)
        .fetch_all(&self.pool)
        .await?;

        Ok(loans)
    }

    async fn record_decision(
        &self,
        id: i32,
        status: LoanStatus,
        admin_id: i32,
    ) -> AppResult<Option<Loan>> {
        let loan = sqlx::query_as::<_, Loan>(
            r#"
            UPDATE loans
            SET status = $2, admin_id = $3
            WHERE id = $1 AND status = 'pending'
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .bind(admin_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(loan)
    }

    async fn record_return(
        &self,
        id: i32,
        returned_at: DateTime<Utc>,
    ) -> AppResult<Option<Loan>> {
        let loan = sqlx::query_as::<_, Loan>(
            r#"
            UPDATE loans
            SET status = 'returned', return_date = $2
            WHERE id = $1 AND status = 'active'
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(returned_at)
        .fetch_optional(&self.pool)
        .await?;

        Ok(loan)
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM loans WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count_total(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM loans")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn count_by_status(&self, status: LoanStatus) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM loans WHERE status = $1")
            .bind(status)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn count_overdue(&self, now: DateTime<Utc>) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM loans WHERE status = 'active' AND due_date < $1",
        )
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}
