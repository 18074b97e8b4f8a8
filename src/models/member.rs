//! Member record as exposed by the member registry service

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Member payload returned by `GET /members/{id}` on the registry service
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MemberRecord {
    pub member_id: i32,
    pub name: String,
    pub email: Option<String>,
}
