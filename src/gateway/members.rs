//! HTTP client for the member registry service

use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;

use crate::{
    config::GatewayConfig,
    error::{AppError, AppResult},
    models::member::MemberRecord,
};

use super::{upstream_error, MemberGateway};

#[derive(Clone)]
pub struct HttpMemberGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpMemberGateway {
    pub fn new(config: &GatewayConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Internal(format!("failed to build member client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.member_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl MemberGateway for HttpMemberGateway {
    async fn exists(&self, member_id: i32) -> AppResult<bool> {
        let url = format!("{}/members/{}", self.base_url, member_id);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| upstream_error("member registry", e))?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(false),
            status if status.is_success() => {
                // Parse the payload so a misrouted response doesn't pass as a member
                response
                    .json::<MemberRecord>()
                    .await
                    .map_err(|e| upstream_error("member registry", e))?;
                Ok(true)
            }
            status => Err(AppError::Upstream(format!(
                "member registry returned {} for member {}",
                status, member_id
            ))),
        }
    }
}
