//! Shift API endpoints: listing, creation, and the assign/unassign workflow.
//!
//! A shift binds a day, a half-open `[start_time, end_time)` window and a
//! required role, plus an optional staff reference. Assignment enforces two
//! invariants before mutating anything: the staff member's role must match
//! the shift's role, and the staff member must not already hold an
//! overlapping shift on the same day. Both checks and the write run inside
//! one transaction so concurrent assignments cannot both slip past the
//! overlap check.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use sqlx::{Executor, Sqlite};
use std::sync::Arc;

use crate::db::{
    AssignShiftRequest, CreateShiftRequest, Shift, ShiftWithStaff, Staff, UnassignShiftRequest,
};
use crate::schedule::{has_overlap, is_valid_day, is_valid_time, time_to_minutes, validate_role};
use crate::AppState;

use super::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct ListShiftsQuery {
    pub day: Option<String>,
}

/// Shift state transitions selectable on POST /api/shifts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftAction {
    Assign,
    Unassign,
}

#[derive(Debug, Deserialize)]
pub struct ShiftPostQuery {
    pub action: Option<ShiftAction>,
}

/// List shifts joined with their assigned staff's name, optionally
/// filtered to one day.
pub async fn list_shifts(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListShiftsQuery>,
) -> Result<Json<Vec<ShiftWithStaff>>, ApiError> {
    if let Some(ref day) = query.day {
        if !is_valid_day(day) {
            return Err(ApiError::bad_request("Invalid 'day' format. Use YYYY-MM-DD"));
        }

        let shifts = sqlx::query_as::<_, ShiftWithStaff>(
            r#"
            SELECT s.id, s.day, s.start_time, s.end_time, s.role, s.staff_id, st.name AS staff_name
            FROM shifts s
            LEFT JOIN staff st ON st.id = s.staff_id
            WHERE s.day = ?
            ORDER BY s.start_time ASC, s.id ASC
            "#,
        )
        .bind(day)
        .fetch_all(&state.db)
        .await?;

        return Ok(Json(shifts));
    }

    let shifts = sqlx::query_as::<_, ShiftWithStaff>(
        r#"
        SELECT s.id, s.day, s.start_time, s.end_time, s.role, s.staff_id, st.name AS staff_name
        FROM shifts s
        LEFT JOIN staff st ON st.id = s.staff_id
        ORDER BY s.day ASC, s.start_time ASC, s.id ASC
        "#,
    )
    .fetch_all(&state.db)
    .await?;

    Ok(Json(shifts))
}

/// POST /api/shifts dispatcher.
///
/// `?action=assign|unassign` (or an `action` field in the body, with the
/// query string winning) selects the transition; no action means create.
/// Each branch parses its own typed request struct.
pub async fn post_shifts(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ShiftPostQuery>,
    body: Option<Json<serde_json::Value>>,
) -> Result<Response, ApiError> {
    // A missing or non-JSON body degrades to an empty object, so the
    // field-level validation below produces the useful message
    let mut body = body
        .map(|Json(value)| value)
        .unwrap_or_else(|| serde_json::Value::Object(serde_json::Map::new()));

    // Pull `action` out of the body so the per-operation structs can stay strict
    let body_action = body.as_object_mut().and_then(|obj| obj.remove("action"));
    let action = match query.action {
        Some(action) => Some(action),
        None => match body_action {
            Some(value) => serde_json::from_value::<Option<ShiftAction>>(value)
                .map_err(|_| ApiError::bad_request("Invalid 'action'. Allowed: assign, unassign"))?,
            None => None,
        },
    };

    match action {
        Some(ShiftAction::Assign) => {
            let req: AssignShiftRequest = parse_body(body)?;
            let shift = assign_shift(&state, req).await?;
            Ok(Json(shift).into_response())
        }
        Some(ShiftAction::Unassign) => {
            let req: UnassignShiftRequest = parse_body(body)?;
            let shift = unassign_shift(&state, req).await?;
            Ok(Json(shift).into_response())
        }
        None => {
            let req: CreateShiftRequest = parse_body(body)?;
            let shift = create_shift(&state, req).await?;
            Ok((StatusCode::CREATED, Json(shift)).into_response())
        }
    }
}

fn parse_body<T: serde::de::DeserializeOwned>(body: serde_json::Value) -> Result<T, ApiError> {
    serde_json::from_value(body).map_err(|e| ApiError::bad_request(format!("Invalid request body: {e}")))
}

async fn load_joined<'e, E>(executor: E, shift_id: i64) -> sqlx::Result<Option<ShiftWithStaff>>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, ShiftWithStaff>(
        r#"
        SELECT s.id, s.day, s.start_time, s.end_time, s.role, s.staff_id, st.name AS staff_name
        FROM shifts s
        LEFT JOIN staff st ON st.id = s.staff_id
        WHERE s.id = ?
        "#,
    )
    .bind(shift_id)
    .fetch_optional(executor)
    .await
}

/// Create a shift, optionally pre-assigned to a staff member.
async fn create_shift(
    state: &AppState,
    req: CreateShiftRequest,
) -> Result<ShiftWithStaff, ApiError> {
    let day = req.day.trim().to_string();
    let start = req.start_time.trim().to_string();
    let end = req.end_time.trim().to_string();
    let role = req.role.trim().to_lowercase();

    if !is_valid_day(&day) || !is_valid_time(&start) || !is_valid_time(&end) || role.is_empty() {
        return Err(ApiError::bad_request(
            "Required fields: day (YYYY-MM-DD), start_time (HH:MM), end_time (HH:MM), role",
        ));
    }

    if time_to_minutes(&start) >= time_to_minutes(&end) {
        return Err(ApiError::bad_request("start_time must be earlier than end_time"));
    }

    validate_role(&role).map_err(ApiError::bad_request)?;

    let mut tx = state.db.begin().await?;

    if let Some(staff_id) = req.staff_id {
        let staff = sqlx::query_as::<_, Staff>("SELECT id, name, role, phone FROM staff WHERE id = ?")
            .bind(staff_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| ApiError::not_found("Staff not found"))?;

        if staff.role.to_lowercase() != role {
            return Err(ApiError::role_mismatch(format!(
                "Role mismatch: shift requires '{}', staff is '{}'",
                role, staff.role
            )));
        }

        if has_overlap(&mut *tx, &day, &start, &end, Some(staff_id), None).await? {
            return Err(ApiError::conflict(format!(
                "Staff already has an overlapping shift on {day}"
            )));
        }
    }

    let result = sqlx::query(
        "INSERT INTO shifts (day, start_time, end_time, role, staff_id) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&day)
    .bind(&start)
    .bind(&end)
    .bind(&role)
    .bind(req.staff_id)
    .execute(&mut *tx)
    .await?;
    let id = result.last_insert_rowid();

    let shift = load_joined(&mut *tx, id)
        .await?
        .ok_or_else(|| ApiError::internal("Created shift could not be read back"))?;
    tx.commit().await?;

    Ok(shift)
}

/// Bind a staff member to an existing shift.
async fn assign_shift(state: &AppState, req: AssignShiftRequest) -> Result<ShiftWithStaff, ApiError> {
    if req.shift_id <= 0 || req.staff_id <= 0 {
        return Err(ApiError::bad_request("'shift_id' and 'staff_id' are required"));
    }

    // Check-then-act against the store: one transaction, so a concurrent
    // assign for the same staff/day cannot pass the overlap check too
    let mut tx = state.db.begin().await?;

    let shift = sqlx::query_as::<_, Shift>(
        "SELECT id, day, start_time, end_time, role, staff_id FROM shifts WHERE id = ?",
    )
    .bind(req.shift_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| ApiError::not_found("Shift not found"))?;

    let staff = sqlx::query_as::<_, Staff>("SELECT id, name, role, phone FROM staff WHERE id = ?")
        .bind(req.staff_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| ApiError::not_found("Staff not found"))?;

    if staff.role.to_lowercase() != shift.role.to_lowercase() {
        return Err(ApiError::role_mismatch(format!(
            "Role mismatch: shift requires '{}', staff is '{}'",
            shift.role, staff.role
        )));
    }

    // Exclude the shift itself so re-assigning the same staff stays idempotent
    if has_overlap(
        &mut *tx,
        &shift.day,
        &shift.start_time,
        &shift.end_time,
        Some(staff.id),
        Some(shift.id),
    )
    .await?
    {
        return Err(ApiError::conflict(format!(
            "Staff already has an overlapping shift on {}",
            shift.day
        )));
    }

    sqlx::query("UPDATE shifts SET staff_id = ? WHERE id = ?")
        .bind(staff.id)
        .bind(shift.id)
        .execute(&mut *tx)
        .await?;

    let updated = load_joined(&mut *tx, shift.id)
        .await?
        .ok_or_else(|| ApiError::internal("Assigned shift could not be read back"))?;
    tx.commit().await?;

    Ok(updated)
}

/// Clear a shift's staff reference unconditionally.
///
/// Unassigning an already-unassigned or unknown shift is not an error;
/// an unknown id yields `None` (serialized as JSON null).
async fn unassign_shift(
    state: &AppState,
    req: UnassignShiftRequest,
) -> Result<Option<Shift>, ApiError> {
    if req.shift_id <= 0 {
        return Err(ApiError::bad_request("'shift_id' is required"));
    }

    sqlx::query("UPDATE shifts SET staff_id = NULL WHERE id = ?")
        .bind(req.shift_id)
        .execute(&state.db)
        .await?;

    let shift = sqlx::query_as::<_, Shift>(
        "SELECT id, day, start_time, end_time, role, staff_id FROM shifts WHERE id = ?",
    )
    .bind(req.shift_id)
    .fetch_optional(&state.db)
    .await?;

    Ok(shift)
}
