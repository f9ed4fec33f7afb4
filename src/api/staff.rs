//! Staff API endpoints: listing and creation.
//!
//! Staff records are immutable after creation; there are no update or
//! delete endpoints.

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::db::{CreateStaffRequest, Staff};
use crate::schedule::validate_role;
use crate::AppState;

use super::error::{ApiError, ValidationErrorBuilder};

/// List all staff members, newest first
pub async fn list_staff(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Staff>>, ApiError> {
    let staff = sqlx::query_as::<_, Staff>("SELECT id, name, role, phone FROM staff ORDER BY id DESC")
        .fetch_all(&state.db)
        .await?;

    Ok(Json(staff))
}

/// Create a staff member. The role must belong to the fixed set and is
/// stored lowercase regardless of input casing.
pub async fn create_staff(
    State(state): State<Arc<AppState>>,
    body: Option<Json<CreateStaffRequest>>,
) -> Result<(StatusCode, Json<Staff>), ApiError> {
    // A missing or non-JSON body degrades to an empty request; the field
    // checks below report what was missing
    let req = body.map(|Json(req)| req).unwrap_or_default();

    let name = req.name.trim().to_string();
    let role = req.role.trim().to_string();
    let phone = req.phone.map(|p| p.trim().to_string());

    let mut errors = ValidationErrorBuilder::new();
    if name.is_empty() {
        errors.add("name", "Field 'name' is required");
    }
    if role.is_empty() {
        errors.add("role", "Field 'role' is required");
    }
    errors.finish()?;

    validate_role(&role).map_err(|e| ApiError::validation_field("role", e))?;
    let role = role.to_lowercase();

    let result = sqlx::query("INSERT INTO staff (name, role, phone) VALUES (?, ?, ?)")
        .bind(&name)
        .bind(&role)
        .bind(&phone)
        .execute(&state.db)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create staff member: {}", e);
            ApiError::database("Failed to create staff member")
        })?;

    let staff = Staff {
        id: result.last_insert_rowid(),
        name,
        role,
        phone,
    };

    Ok((StatusCode::CREATED, Json(staff)))
}
