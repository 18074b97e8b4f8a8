//! Loan workflow engine.
//!
//! Owns the loan state machine (`pending → active/rejected`, `active →
//! returned`) and keeps loan records consistent with the inventory's stock
//! counts. Stock is decremented when a loan is created and restored when it
//! is returned or rejected.
//!
//! Every operation that touches both the inventory and the loan store runs
//! as a two-step sequence with compensation: the stock mutation goes first,
//! the loan write second, and a failed loan write hands the stock mutation
//! back. State transitions themselves are conditional single-row updates, so
//! concurrent requests against the same loan resolve to exactly one winner.

use std::sync::Arc;

use chrono::{Duration, Utc};

use crate::{
    api::stats::LoanStatsResponse,
    config::{CreationPolicy, LoansConfig},
    error::{AppError, AppResult},
    gateway::{InventoryGateway, MemberGateway, StockDecrement},
    models::loan::{Loan, LoanStatus, NewLoan},
    repository::loans::LoanStore,
};

#[derive(Clone)]
pub struct LoanWorkflowService {
    store: Arc<dyn LoanStore>,
    members: Arc<dyn MemberGateway>,
    inventory: Arc<dyn InventoryGateway>,
    config: LoansConfig,
}

impl LoanWorkflowService {
    pub fn new(
        store: Arc<dyn LoanStore>,
        members: Arc<dyn MemberGateway>,
        inventory: Arc<dyn InventoryGateway>,
        config: LoansConfig,
    ) -> Self {
        Self {
            store,
            members,
            inventory,
            config,
        }
    }

    fn initial_status(&self) -> LoanStatus {
        match self.config.creation_policy {
            CreationPolicy::RequireApproval => LoanStatus::Pending,
            CreationPolicy::AutoApprove => LoanStatus::Active,
        }
    }

    /// Get a single loan
    pub async fn get_loan(&self, loan_id: i32) -> AppResult<Loan> {
        self.store
            .get(loan_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Loan with id {} not found", loan_id)))
    }

    /// Get all loans
    pub async fn list_loans(&self) -> AppResult<Vec<Loan>> {
        self.store.list().await
    }

    /// Get loans for a member
    pub async fn loans_for_member(&self, member_id: i32) -> AppResult<Vec<Loan>> {
        self.store.list_by_member(member_id).await
    }

    /// Get loans for a book
    pub async fn loans_for_book(&self, book_id: i32) -> AppResult<Vec<Loan>> {
        self.store.list_by_book(book_id).await
    }

    /// Get loans awaiting an admin decision
    pub async fn pending_loans(&self) -> AppResult<Vec<Loan>> {
        self.store.list_by_status(LoanStatus::Pending).await
    }

    /// Get active loans whose due date has passed
    pub async fn overdue_loans(&self) -> AppResult<Vec<Loan>> {
        self.store.list_overdue(Utc::now()).await
    }

    /// Create a new loan (borrow a book).
    ///
    /// The member and book are validated against their services before any
    /// write. The stock read only produces the friendlier errors; the
    /// conditional decrement below is the authoritative availability
    /// decision, so a race on the last copy ends with one winner.
    pub async fn create_loan(&self, member_id: i32, book_id: i32) -> AppResult<Loan> {
        if !self.members.exists(member_id).await? {
            return Err(AppError::NotFound(format!(
                "Member with id {} not found",
                member_id
            )));
        }

        match self.inventory.stock(book_id).await? {
            None => {
                return Err(AppError::NotFound(format!(
                    "Book with id {} not found",
                    book_id
                )))
            }
            Some(stock) if stock <= 0 => {
                return Err(AppError::OutOfStock(format!(
                    "Book with id {} has no stock",
                    book_id
                )))
            }
            Some(_) => {}
        }

        match self.inventory.decrement_stock(book_id).await? {
            StockDecrement::Applied => {}
            StockDecrement::Refused => {
                return Err(AppError::OutOfStock(format!(
                    "Book with id {} has no stock",
                    book_id
                )))
            }
            StockDecrement::NotFound => {
                return Err(AppError::NotFound(format!(
                    "Book with id {} not found",
                    book_id
                )))
            }
        }

        let now = Utc::now();
        let new = NewLoan {
            member_id,
            book_id,
            loan_date: now,
            due_date: now + Duration::days(self.config.period_days),
            status: self.initial_status(),
        };

        match self.store.insert(new).await {
            Ok(loan) => {
                tracing::info!(loan_id = loan.id, member_id, book_id, "loan created");
                Ok(loan)
            }
            Err(err) => {
                // The decrement is already acknowledged; hand the copy back
                self.restore_stock_or_log(book_id, "loan insert failed").await;
                Err(err)
            }
        }
    }

    /// Approve or reject a pending loan.
    ///
    /// Rejection hands the copy reserved at creation back to the inventory;
    /// approval changes nothing on the inventory side.
    pub async fn decide_loan(&self, loan_id: i32, approved: bool, admin_id: i32) -> AppResult<Loan> {
        let loan = self.get_loan(loan_id).await?;
        if loan.status != LoanStatus::Pending {
            return Err(AppError::Conflict(format!(
                "Loan {} is {} and cannot be decided",
                loan_id,
                loan.status.as_str()
            )));
        }

        if approved {
            return self
                .store
                .record_decision(loan_id, LoanStatus::Active, admin_id)
                .await?
                .ok_or_else(|| {
                    AppError::Conflict(format!("Loan {} is no longer pending", loan_id))
                });
        }

        self.inventory.increment_stock(loan.book_id).await?;
        match self
            .store
            .record_decision(loan_id, LoanStatus::Rejected, admin_id)
            .await
        {
            Ok(Some(updated)) => Ok(updated),
            Ok(None) => {
                self.take_back_stock_or_log(loan.book_id, "lost rejection race")
                    .await;
                Err(AppError::Conflict(format!(
                    "Loan {} is no longer pending",
                    loan_id
                )))
            }
            Err(err) => {
                self.take_back_stock_or_log(loan.book_id, "rejection write failed")
                    .await;
                Err(err)
            }
        }
    }

    /// Return an active loan and restore the book's stock
    pub async fn return_loan(&self, loan_id: i32) -> AppResult<Loan> {
        let loan = self.get_loan(loan_id).await?;
        match loan.status {
            LoanStatus::Active => {}
            LoanStatus::Returned => {
                return Err(AppError::Conflict(format!(
                    "Loan {} already returned",
                    loan_id
                )))
            }
            status => {
                return Err(AppError::Conflict(format!(
                    "Loan {} is {} and cannot be returned",
                    loan_id,
                    status.as_str()
                )))
            }
        }

        self.inventory.increment_stock(loan.book_id).await?;
        match self.store.record_return(loan_id, Utc::now()).await {
            Ok(Some(updated)) => {
                tracing::info!(loan_id, book_id = loan.book_id, "loan returned");
                Ok(updated)
            }
            Ok(None) => {
                self.take_back_stock_or_log(loan.book_id, "lost return race")
                    .await;
                Err(AppError::Conflict(format!(
                    "Loan {} already returned",
                    loan_id
                )))
            }
            Err(err) => {
                self.take_back_stock_or_log(loan.book_id, "return write failed")
                    .await;
                Err(err)
            }
        }
    }

    /// Administrative purge. Outside the state machine: deletes the record
    /// whatever its status and makes no stock mutation.
    pub async fn delete_loan(&self, loan_id: i32) -> AppResult<()> {
        if !self.store.delete(loan_id).await? {
            return Err(AppError::NotFound(format!(
                "Loan with id {} not found",
                loan_id
            )));
        }
        tracing::info!(loan_id, "loan purged");
        Ok(())
    }

    /// Aggregate loan counts for the dashboards
    pub async fn loan_stats(&self) -> AppResult<LoanStatsResponse> {
        let now = Utc::now();
        Ok(LoanStatsResponse {
            total: self.store.count_total().await?,
            pending: self.store.count_by_status(LoanStatus::Pending).await?,
            active: self.store.count_by_status(LoanStatus::Active).await?,
            overdue: self.store.count_overdue(now).await?,
            returned: self.store.count_by_status(LoanStatus::Returned).await?,
            rejected: self.store.count_by_status(LoanStatus::Rejected).await?,
        })
    }

    /// Compensate a decrement that can no longer be paired with a loan write
    async fn restore_stock_or_log(&self, book_id: i32, context: &str) {
        if let Err(err) = self.inventory.increment_stock(book_id).await {
            tracing::error!(book_id, context, "stock restore failed: {}", err);
        }
    }

    /// Take back an increment whose transition lost its race
    async fn take_back_stock_or_log(&self, book_id: i32, context: &str) {
        match self.inventory.decrement_stock(book_id).await {
            Ok(StockDecrement::Applied) => {}
            Ok(outcome) => {
                tracing::warn!(book_id, context, ?outcome, "stock compensation not applied");
            }
            Err(err) => {
                tracing::error!(book_id, context, "stock compensation failed: {}", err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::{MockInventoryGateway, MockMemberGateway};
    use crate::repository::loans::MockLoanStore;
    use chrono::{DateTime, TimeZone};
    use mockall::predicate::eq;

    fn service(
        store: MockLoanStore,
        members: MockMemberGateway,
        inventory: MockInventoryGateway,
        creation_policy: CreationPolicy,
    ) -> LoanWorkflowService {
        LoanWorkflowService::new(
            Arc::new(store),
            Arc::new(members),
            Arc::new(inventory),
            LoansConfig {
                period_days: 14,
                creation_policy,
            },
        )
    }

    fn loan(id: i32, book_id: i32, status: LoanStatus) -> Loan {
        let loan_date = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
        Loan {
            id,
            member_id: 1,
            book_id,
            loan_date,
            due_date: loan_date + Duration::days(14),
            return_date: None,
            status,
            admin_id: None,
        }
    }

    fn loan_from(new: &NewLoan, id: i32) -> Loan {
        Loan {
            id,
            member_id: new.member_id,
            book_id: new.book_id,
            loan_date: new.loan_date,
            due_date: new.due_date,
            return_date: None,
            status: new.status,
            admin_id: None,
        }
    }

    fn db_error() -> AppError {
        AppError::Database(sqlx::Error::WorkerCrashed)
    }

    #[tokio::test]
    async fn test_create_loan_sets_due_date_and_pending_status() {
        let mut store = MockLoanStore::new();
        let mut members = MockMemberGateway::new();
        let mut inventory = MockInventoryGateway::new();

        members.expect_exists().with(eq(1)).returning(|_| Ok(true));
        inventory.expect_stock().with(eq(5)).returning(|_| Ok(Some(3)));
        inventory
            .expect_decrement_stock()
            .with(eq(5))
            .times(1)
            .returning(|_| Ok(StockDecrement::Applied));
        store
            .expect_insert()
            .withf(|new| {
                new.member_id == 1
                    && new.book_id == 5
                    && new.status == LoanStatus::Pending
                    && new.due_date - new.loan_date == Duration::days(14)
            })
            .returning(|new| Ok(loan_from(&new, 42)));

        let svc = service(store, members, inventory, CreationPolicy::RequireApproval);
        let created = svc.create_loan(1, 5).await.unwrap();

        assert_eq!(created.id, 42);
        assert_eq!(created.status, LoanStatus::Pending);
        assert_eq!(created.due_date - created.loan_date, Duration::days(14));
        assert!(created.return_date.is_none());
        assert!(created.admin_id.is_none());
    }

    #[tokio::test]
    async fn test_create_loan_auto_approve_policy_goes_straight_to_active() {
        let mut store = MockLoanStore::new();
        let mut members = MockMemberGateway::new();
        let mut inventory = MockInventoryGateway::new();

        members.expect_exists().returning(|_| Ok(true));
        inventory.expect_stock().returning(|_| Ok(Some(1)));
        inventory
            .expect_decrement_stock()
            .returning(|_| Ok(StockDecrement::Applied));
        store
            .expect_insert()
            .withf(|new| new.status == LoanStatus::Active)
            .returning(|new| Ok(loan_from(&new, 7)));

        let svc = service(store, members, inventory, CreationPolicy::AutoApprove);
        let created = svc.create_loan(1, 5).await.unwrap();
        assert_eq!(created.status, LoanStatus::Active);
    }

    #[tokio::test]
    async fn test_create_loan_unknown_member_fails_before_any_mutation() {
        let store = MockLoanStore::new();
        let mut members = MockMemberGateway::new();
        let inventory = MockInventoryGateway::new();

        members.expect_exists().with(eq(99)).returning(|_| Ok(false));

        let svc = service(store, members, inventory, CreationPolicy::RequireApproval);
        let err = svc.create_loan(99, 5).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_create_loan_unknown_book() {
        let store = MockLoanStore::new();
        let mut members = MockMemberGateway::new();
        let mut inventory = MockInventoryGateway::new();

        members.expect_exists().returning(|_| Ok(true));
        inventory.expect_stock().with(eq(5)).returning(|_| Ok(None));

        let svc = service(store, members, inventory, CreationPolicy::RequireApproval);
        let err = svc.create_loan(1, 5).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_create_loan_zero_stock_fails_without_decrement() {
        let store = MockLoanStore::new();
        let mut members = MockMemberGateway::new();
        let mut inventory = MockInventoryGateway::new();

        members.expect_exists().returning(|_| Ok(true));
        inventory.expect_stock().returning(|_| Ok(Some(0)));
        inventory.expect_decrement_stock().times(0);

        let svc = service(store, members, inventory, CreationPolicy::RequireApproval);
        let err = svc.create_loan(1, 5).await.unwrap_err();
        assert!(matches!(err, AppError::OutOfStock(_)));
    }

    #[tokio::test]
    async fn test_create_loan_loses_last_copy_race() {
        // Stock read said 1, but another borrower got there first: the
        // conditional decrement refuses and no loan is written.
        let store = MockLoanStore::new();
        let mut members = MockMemberGateway::new();
        let mut inventory = MockInventoryGateway::new();

        members.expect_exists().returning(|_| Ok(true));
        inventory.expect_stock().returning(|_| Ok(Some(1)));
        inventory
            .expect_decrement_stock()
            .returning(|_| Ok(StockDecrement::Refused));

        let svc = service(store, members, inventory, CreationPolicy::RequireApproval);
        let err = svc.create_loan(1, 5).await.unwrap_err();
        assert!(matches!(err, AppError::OutOfStock(_)));
    }

    #[tokio::test]
    async fn test_create_loan_insert_failure_restores_stock() {
        let mut store = MockLoanStore::new();
        let mut members = MockMemberGateway::new();
        let mut inventory = MockInventoryGateway::new();

        members.expect_exists().returning(|_| Ok(true));
        inventory.expect_stock().returning(|_| Ok(Some(3)));
        inventory
            .expect_decrement_stock()
            .returning(|_| Ok(StockDecrement::Applied));
        store.expect_insert().returning(|_| Err(db_error()));
        inventory
            .expect_increment_stock()
            .with(eq(5))
            .times(1)
            .returning(|_| Ok(()));

        let svc = service(store, members, inventory, CreationPolicy::RequireApproval);
        let err = svc.create_loan(1, 5).await.unwrap_err();
        assert!(matches!(err, AppError::Database(_)));
    }

    #[tokio::test]
    async fn test_create_loan_gateway_timeout_aborts_operation() {
        let store = MockLoanStore::new();
        let mut members = MockMemberGateway::new();
        let inventory = MockInventoryGateway::new();

        members
            .expect_exists()
            .returning(|_| Err(AppError::Upstream("member registry request timed out".into())));

        let svc = service(store, members, inventory, CreationPolicy::RequireApproval);
        let err = svc.create_loan(1, 5).await.unwrap_err();
        assert!(matches!(err, AppError::Upstream(_)));
    }

    #[tokio::test]
    async fn test_approve_pending_loan_sets_active_and_admin() {
        let mut store = MockLoanStore::new();
        let members = MockMemberGateway::new();
        let inventory = MockInventoryGateway::new();

        store
            .expect_get()
            .with(eq(42))
            .returning(|id| Ok(Some(loan(id, 5, LoanStatus::Pending))));
        store
            .expect_record_decision()
            .with(eq(42), eq(LoanStatus::Active), eq(9))
            .times(1)
            .returning(|id, status, admin_id| {
                let mut l = loan(id, 5, status);
                l.admin_id = Some(admin_id);
                Ok(Some(l))
            });

        let svc = service(store, members, inventory, CreationPolicy::RequireApproval);
        let decided = svc.decide_loan(42, true, 9).await.unwrap();
        assert_eq!(decided.status, LoanStatus::Active);
        assert_eq!(decided.admin_id, Some(9));
    }

    #[tokio::test]
    async fn test_decide_non_pending_loan_is_a_conflict() {
        let members = MockMemberGateway::new();
        let inventory = MockInventoryGateway::new();
        let mut store = MockLoanStore::new();

        store
            .expect_get()
            .returning(|id| Ok(Some(loan(id, 5, LoanStatus::Active))));

        let svc = service(store, members, inventory, CreationPolicy::RequireApproval);
        let err = svc.decide_loan(42, true, 9).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_approve_lost_race_is_a_conflict() {
        let mut store = MockLoanStore::new();
        let members = MockMemberGateway::new();
        let inventory = MockInventoryGateway::new();

        store
            .expect_get()
            .returning(|id| Ok(Some(loan(id, 5, LoanStatus::Pending))));
        store.expect_record_decision().returning(|_, _, _| Ok(None));

        let svc = service(store, members, inventory, CreationPolicy::RequireApproval);
        let err = svc.decide_loan(42, true, 9).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_reject_pending_loan_restores_stock() {
        let mut store = MockLoanStore::new();
        let members = MockMemberGateway::new();
        let mut inventory = MockInventoryGateway::new();

        store
            .expect_get()
            .returning(|id| Ok(Some(loan(id, 5, LoanStatus::Pending))));
        inventory
            .expect_increment_stock()
            .with(eq(5))
            .times(1)
            .returning(|_| Ok(()));
        store
            .expect_record_decision()
            .with(eq(42), eq(LoanStatus::Rejected), eq(9))
            .returning(|id, status, admin_id| {
                let mut l = loan(id, 5, status);
                l.admin_id = Some(admin_id);
                Ok(Some(l))
            });

        let svc = service(store, members, inventory, CreationPolicy::RequireApproval);
        let decided = svc.decide_loan(42, false, 9).await.unwrap();
        assert_eq!(decided.status, LoanStatus::Rejected);
        assert_eq!(decided.admin_id, Some(9));
    }

    #[tokio::test]
    async fn test_reject_lost_race_takes_restock_back() {
        let mut store = MockLoanStore::new();
        let members = MockMemberGateway::new();
        let mut inventory = MockInventoryGateway::new();

        store
            .expect_get()
            .returning(|id| Ok(Some(loan(id, 5, LoanStatus::Pending))));
        inventory
            .expect_increment_stock()
            .times(1)
            .returning(|_| Ok(()));
        store.expect_record_decision().returning(|_, _, _| Ok(None));
        inventory
            .expect_decrement_stock()
            .with(eq(5))
            .times(1)
            .returning(|_| Ok(StockDecrement::Applied));

        let svc = service(store, members, inventory, CreationPolicy::RequireApproval);
        let err = svc.decide_loan(42, false, 9).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_return_active_loan_restocks_and_sets_return_date() {
        let mut store = MockLoanStore::new();
        let members = MockMemberGateway::new();
        let mut inventory = MockInventoryGateway::new();

        store
            .expect_get()
            .with(eq(42))
            .returning(|id| Ok(Some(loan(id, 5, LoanStatus::Active))));
        inventory
            .expect_increment_stock()
            .with(eq(5))
            .times(1)
            .returning(|_| Ok(()));
        store
            .expect_record_return()
            .withf(|id, _| *id == 42)
            .returning(|id, returned_at: DateTime<Utc>| {
                let mut l = loan(id, 5, LoanStatus::Returned);
                l.return_date = Some(returned_at);
                Ok(Some(l))
            });

        let svc = service(store, members, inventory, CreationPolicy::RequireApproval);
        let returned = svc.return_loan(42).await.unwrap();
        assert_eq!(returned.status, LoanStatus::Returned);
        assert!(returned.return_date.is_some());
    }

    #[tokio::test]
    async fn test_return_twice_fails_the_second_time() {
        let mut store = MockLoanStore::new();
        let members = MockMemberGateway::new();
        let inventory = MockInventoryGateway::new();

        store
            .expect_get()
            .returning(|id| Ok(Some(loan(id, 5, LoanStatus::Returned))));

        let svc = service(store, members, inventory, CreationPolicy::RequireApproval);
        let err = svc.return_loan(42).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_return_pending_loan_is_a_conflict() {
        let mut store = MockLoanStore::new();
        let members = MockMemberGateway::new();
        let inventory = MockInventoryGateway::new();

        store
            .expect_get()
            .returning(|id| Ok(Some(loan(id, 5, LoanStatus::Pending))));

        let svc = service(store, members, inventory, CreationPolicy::RequireApproval);
        let err = svc.return_loan(42).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_return_unknown_loan() {
        let mut store = MockLoanStore::new();
        let members = MockMemberGateway::new();
        let inventory = MockInventoryGateway::new();

        store.expect_get().returning(|_| Ok(None));

        let svc = service(store, members, inventory, CreationPolicy::RequireApproval);
        let err = svc.return_loan(404).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_return_lost_race_takes_restock_back() {
        let mut store = MockLoanStore::new();
        let members = MockMemberGateway::new();
        let mut inventory = MockInventoryGateway::new();

        store
            .expect_get()
            .returning(|id| Ok(Some(loan(id, 5, LoanStatus::Active))));
        inventory
            .expect_increment_stock()
            .times(1)
            .returning(|_| Ok(()));
        store.expect_record_return().returning(|_, _| Ok(None));
        inventory
            .expect_decrement_stock()
            .with(eq(5))
            .times(1)
            .returning(|_| Ok(StockDecrement::Applied));

        let svc = service(store, members, inventory, CreationPolicy::RequireApproval);
        let err = svc.return_loan(42).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_purge_ignores_status_and_inventory() {
        let mut store = MockLoanStore::new();
        let members = MockMemberGateway::new();
        let inventory = MockInventoryGateway::new();

        store.expect_delete().with(eq(42)).returning(|_| Ok(true));

        let svc = service(store, members, inventory, CreationPolicy::RequireApproval);
        svc.delete_loan(42).await.unwrap();
    }

    #[tokio::test]
    async fn test_purge_unknown_loan() {
        let mut store = MockLoanStore::new();
        let members = MockMemberGateway::new();
        let inventory = MockInventoryGateway::new();

        store.expect_delete().returning(|_| Ok(false));

        let svc = service(store, members, inventory, CreationPolicy::RequireApproval);
        let err = svc.delete_loan(404).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_loan_stats_aggregates_counts() {
        let mut store = MockLoanStore::new();
        let members = MockMemberGateway::new();
        let inventory = MockInventoryGateway::new();

        store.expect_count_total().returning(|| Ok(10));
        store
            .expect_count_by_status()
            .with(eq(LoanStatus::Pending))
            .returning(|_| Ok(2));
        store
            .expect_count_by_status()
            .with(eq(LoanStatus::Active))
            .returning(|_| Ok(4));
        store
            .expect_count_by_status()
            .with(eq(LoanStatus::Returned))
            .returning(|_| Ok(3));
        store
            .expect_count_by_status()
            .with(eq(LoanStatus::Rejected))
            .returning(|_| Ok(1));
        store.expect_count_overdue().returning(|_| Ok(1));

        let svc = service(store, members, inventory, CreationPolicy::RequireApproval);
        let stats = svc.loan_stats().await.unwrap();
        assert_eq!(stats.total, 10);
        assert_eq!(stats.pending, 2);
        assert_eq!(stats.active, 4);
        assert_eq!(stats.overdue, 1);
        assert_eq!(stats.returned, 3);
        assert_eq!(stats.rejected, 1);
    }
}
