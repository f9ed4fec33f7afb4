//! Shift models and DTOs.
//!
//! A shift is either unassigned (`staff_id` null) or assigned to exactly one
//! staff member. The assign/unassign endpoints are the only mutators of that
//! field after creation.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Shift {
    pub id: i64,
    /// Calendar date, `YYYY-MM-DD`
    pub day: String,
    /// `HH:MM`, 24-hour clock; always strictly before `end_time`
    pub start_time: String,
    pub end_time: String,
    pub role: String,
    pub staff_id: Option<i64>,
}

/// Shift left-joined with the assigned staff member's display name
/// (`staff_name` is null when unassigned).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ShiftWithStaff {
    pub id: i64,
    pub day: String,
    pub start_time: String,
    pub end_time: String,
    pub role: String,
    pub staff_id: Option<i64>,
    pub staff_name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateShiftRequest {
    #[serde(default)]
    pub day: String,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
    #[serde(default)]
    pub role: String,
    pub staff_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssignShiftRequest {
    #[serde(default)]
    pub shift_id: i64,
    #[serde(default)]
    pub staff_id: i64,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UnassignShiftRequest {
    #[serde(default)]
    pub shift_id: i64,
}
