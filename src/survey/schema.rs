//! Structural validation of a graduate profile draft.
//!
//! Checks the shape-level invariants: value ranges, array bounds and the
//! department cross-reference. Branch-conditional requiredness lives in
//! [`super::policy`].

use chrono::{Datelike, Utc};

use crate::catalog::DepartmentIndex;
use crate::survey::draft::SurveyDraft;
use crate::survey::policy::FieldError;

pub const MIN_GRADUATION_YEAR: i32 = 1950;
pub const MAX_TRAINING_TITLES: usize = 3;
pub const MAX_ACTIVITY_IMAGES: usize = 5;

/// Check invariants that hold regardless of branch answers. Returns a batch
/// of field errors; never panics.
pub fn validate_structural(draft: &SurveyDraft, departments: &DepartmentIndex) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if let Some(year) = draft.year_graduated {
        let current = Utc::now().year();
        if !(MIN_GRADUATION_YEAR..=current).contains(&year) {
            errors.push(FieldError::new(
                "year_graduated",
                format!("must be between {MIN_GRADUATION_YEAR} and {current}"),
            ));
        }
    }

    if let Some(email) = &draft.email {
        if !email.trim().is_empty() && !email.contains('@') {
            errors.push(FieldError::new("email", "must be a valid email address"));
        }
    }

    if draft.trainings.len() > MAX_TRAINING_TITLES {
        errors.push(FieldError::new(
            "trainings",
            format!("at most {MAX_TRAINING_TITLES} training titles are allowed"),
        ));
    }

    if draft.activity_images.len() > MAX_ACTIVITY_IMAGES {
        errors.push(FieldError::new(
            "activity_images",
            format!("at most {MAX_ACTIVITY_IMAGES} activity images are allowed"),
        ));
    }

    if let Some(department_id) = draft.department_id {
        if !departments.contains(&department_id) {
            errors.push(FieldError::new(
                "department_id",
                format!("department {department_id} does not exist"),
            ));
        }
    }

    errors
}
