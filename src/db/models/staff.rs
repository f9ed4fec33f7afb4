//! Staff models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Staff {
    pub id: i64,
    pub name: String,
    pub role: String,
    /// Optional contact number, stored as given (unvalidated)
    pub phone: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateStaffRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: String,
    pub phone: Option<String>,
}
