//! Business logic services

pub mod loans;

use std::sync::Arc;

use crate::{
    config::{GatewayConfig, LoansConfig},
    error::AppResult,
    gateway::{HttpInventoryGateway, HttpMemberGateway},
    repository::Repository,
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub loans: loans::LoanWorkflowService,
}

impl Services {
    /// Create all services with the given repository and gateway endpoints
    pub fn new(
        repository: Repository,
        gateways: &GatewayConfig,
        loans_config: LoansConfig,
    ) -> AppResult<Self> {
        let members = HttpMemberGateway::new(gateways)?;
        let inventory = HttpInventoryGateway::new(gateways)?;

        Ok(Self {
            loans: loans::LoanWorkflowService::new(
                Arc::new(repository.loans),
                Arc::new(members),
                Arc::new(inventory),
                loans_config,
            ),
        })
    }
}
