use models::eligibility::EnrollmentDenial;
use sea_orm::DbErr;
use thiserror::Error;

/// User-correctable rejections. Display strings are stable: the HTTP
/// layer shows them verbatim, so changing one is a breaking change.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error(transparent)]
    Enrollment(#[from] EnrollmentDenial),
    #[error("not enrolled")]
    NotEnrolled,
    #[error("cannot disenroll, grades already submitted")]
    DisenrollLocked,
    #[error("semester already ended")]
    SemesterEnded,
    #[error("unknown enrollment in grade batch")]
    UnknownEnrollment,
    #[error("username or email already in use")]
    DuplicateUser,
    #[error("course code already in use")]
    DuplicateCourse,
    #[error("section already exists for this term")]
    DuplicateSection,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("invalid schedule: {0}")]
    InvalidSchedule(String),
    #[error("user not found")]
    UserNotFound,
    #[error("student not found")]
    StudentNotFound,
    #[error("professor not found")]
    ProfessorNotFound,
    #[error("course not found")]
    CourseNotFound,
    #[error("section not found")]
    SectionNotFound,
}

/// Either a validation failure the caller can correct or an
/// infrastructure failure. Storage errors abort the enclosing
/// transaction; the early return drops it and rolls everything back.
#[derive(Debug, Error)]
pub enum RegistrarError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("storage failure: {0}")]
    Storage(#[from] DbErr),
    #[error("password hashing failure: {0}")]
    PasswordHash(String),
}

impl From<EnrollmentDenial> for RegistrarError {
    fn from(denial: EnrollmentDenial) -> Self {
        Self::Validation(ValidationError::Enrollment(denial))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn denial_reasons_surface_unchanged() {
        let err = ValidationError::from(EnrollmentDenial::SectionFull);
        assert_eq!(err.to_string(), "section full");

        let err = RegistrarError::from(EnrollmentDenial::TimeConflict);
        assert_eq!(err.to_string(), "time conflict");
    }

    #[test]
    fn disenroll_lock_names_both_halves() {
        // One message covers "cannot disenroll" and the why.
        let msg = ValidationError::DisenrollLocked.to_string();
        assert!(msg.contains("cannot disenroll"));
        assert!(msg.contains("grades already submitted"));
    }
}
