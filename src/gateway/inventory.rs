//! HTTP client for the book inventory service

use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;

use crate::{
    config::GatewayConfig,
    error::{AppError, AppResult},
    models::book::BookRecord,
};

use super::{upstream_error, InventoryGateway, StockDecrement};

#[derive(Clone)]
pub struct HttpInventoryGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpInventoryGateway {
    pub fn new(config: &GatewayConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Internal(format!("failed to build inventory client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.book_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl InventoryGateway for HttpInventoryGateway {
    async fn stock(&self, book_id: i32) -> AppResult<Option<i64>> {
        let url = format!("{}/books/{}", self.base_url, book_id);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| upstream_error("inventory", e))?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                let book: BookRecord = response
                    .json()
                    .await
                    .map_err(|e| upstream_error("inventory", e))?;
                Ok(Some(book.stock))
            }
            status => Err(AppError::Upstream(format!(
                "inventory returned {} for book {}",
                status, book_id
            ))),
        }
    }

    async fn decrement_stock(&self, book_id: i32) -> AppResult<StockDecrement> {
        let url = format!("{}/books/{}/decreaseStock", self.base_url, book_id);

        let response = self
            .client
            .put(&url)
            .send()
            .await
            .map_err(|e| upstream_error("inventory", e))?;

        match response.status() {
            status if status.is_success() => Ok(StockDecrement::Applied),
            StatusCode::BAD_REQUEST => Ok(StockDecrement::Refused),
            StatusCode::NOT_FOUND => Ok(StockDecrement::NotFound),
            status => Err(AppError::Upstream(format!(
                "inventory returned {} decrementing stock of book {}",
                status, book_id
            ))),
        }
    }

    async fn increment_stock(&self, book_id: i32) -> AppResult<()> {
        let url = format!("{}/books/{}/increaseStock", self.base_url, book_id);

        let response = self
            .client
            .put(&url)
            .send()
            .await
            .map_err(|e| upstream_error("inventory", e))?;

        match response.status() {
            status if status.is_success() => Ok(()),
            StatusCode::NOT_FOUND => Err(AppError::NotFound(format!(
                "Book with id {} not found in inventory",
                book_id
            ))),
            status => Err(AppError::Upstream(format!(
                "inventory returned {} incrementing stock of book {}",
                status, book_id
            ))),
        }
    }
}
