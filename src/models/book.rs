//! Book record as exposed by the inventory service

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Book payload returned by `GET /books/{id}` on the inventory service.
/// Only the fields the workflow engine reads are deserialized.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookRecord {
    pub book_id: i32,
    pub title: String,
    pub author: Option<String>,
    pub isbn: Option<String>,
    pub stock: i64,
}
