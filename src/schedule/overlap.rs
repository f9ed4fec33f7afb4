//! Overlap detection for shift assignments.

use sqlx::{Executor, Sqlite};

use super::validation::time_to_minutes;

/// Half-open interval intersection: `[s1, e1)` overlaps `[s2, e2)` iff
/// `s1 < e2 && s2 < e1`. Intervals that only touch at a boundary
/// (one's end equals the other's start) do NOT overlap.
pub fn windows_overlap(s1: i64, e1: i64, s2: i64, e2: i64) -> bool {
    s1 < e2 && s2 < e1
}

/// Check whether `staff_id` already has a shift on `day` whose window
/// intersects `[start, end)`.
///
/// `exclude_shift_id` skips one shift, used when re-validating a shift
/// against itself during assignment. A `None` staff id short-circuits to
/// `false`: an unassigned shift cannot conflict with anything.
///
/// Generic over the executor so the check can run inside the same
/// transaction as the mutation it guards.
pub async fn has_overlap<'e, E>(
    executor: E,
    day: &str,
    start: &str,
    end: &str,
    staff_id: Option<i64>,
    exclude_shift_id: Option<i64>,
) -> sqlx::Result<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    let staff_id = match staff_id {
        Some(id) => id,
        None => return Ok(false),
    };

    // Shift ids are positive, so -1 excludes nothing
    let existing: Vec<(String, String)> = sqlx::query_as(
        "SELECT start_time, end_time FROM shifts WHERE day = ? AND staff_id = ? AND id <> ?",
    )
    .bind(day)
    .bind(staff_id)
    .bind(exclude_shift_id.unwrap_or(-1))
    .fetch_all(executor)
    .await?;

    let (start, end) = (time_to_minutes(start), time_to_minutes(end));
    Ok(existing
        .iter()
        .any(|(s, e)| windows_overlap(start, end, time_to_minutes(s), time_to_minutes(e))))
}
