//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{health, loans, stats};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Pustaka Loans API",
        version = "1.0.0",
        description = "Library loan workflow REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Loans
        loans::list_loans,
        loans::get_loan,
        loans::get_member_loans,
        loans::get_book_loans,
        loans::get_pending_loans,
        loans::get_overdue_loans,
        loans::create_loan,
        loans::decide_loan,
        loans::return_loan,
        loans::delete_loan,
        // Stats
        stats::get_loan_stats,
    ),
    components(
        schemas(
            // Loans
            crate::models::loan::Loan,
            crate::models::loan::LoanDetails,
            crate::models::loan::LoanStatus,
            loans::CreateLoanRequest,
            loans::DecideLoanRequest,
            loans::DeleteLoanResponse,
            // Stats
            stats::LoanStatsResponse,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "loans", description = "Loan lifecycle management"),
        (name = "stats", description = "Statistics")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new().merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
