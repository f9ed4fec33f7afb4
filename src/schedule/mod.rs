//! Scheduling core: day/time validation, role checks, and overlap detection.

mod overlap;
mod validation;

pub use overlap::{has_overlap, windows_overlap};
pub use validation::{is_valid_day, is_valid_time, time_to_minutes, validate_role, ALLOWED_ROLES};
