use crate::entities::{course_sections, enrollments};
use crate::error::{RegistrarError, ValidationError};
use chrono::Utc;
use log::info;
use models::grade::LetterGrade;
use models::status::EnrollmentStatus;
use sea_orm::ActiveValue::Set;
use sea_orm::{DatabaseConnection, EntityTrait, QuerySelect, TransactionTrait};
use std::collections::HashMap;
use uuid::Uuid;

/// Who is submitting a grade batch. Admins keep override capability
/// after a term has ended; professors do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradeActor {
    Professor,
    Admin,
}

pub struct GradeService;

impl GradeService {
    /// Posts a batch of grades for one section, all-or-nothing.
    ///
    /// Every entry must reference an active enrollment of that section.
    /// Each graded enrollment gets its points from the fixed letter table
    /// and is locked against disenrollment; the section is flagged as
    /// graded. Any failure drops the transaction, leaving the section
    /// unharmed rather than half-graded.
    pub async fn submit_grades(
        db: &DatabaseConnection,
        section_id: Uuid,
        grades: &HashMap<Uuid, LetterGrade>,
        actor: GradeActor,
    ) -> Result<(), RegistrarError> {
        let txn = db.begin().await?;

        let section = course_sections::Entity::find_by_id(section_id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(ValidationError::SectionNotFound)?;

        if section.semester_ended && actor != GradeActor::Admin {
            return Err(ValidationError::SemesterEnded.into());
        }

        let now = Utc::now().naive_utc();
        for (&enrollment_id, &letter) in grades {
            let enrollment = enrollments::Entity::find_by_id(enrollment_id)
                .one(&txn)
                .await?
                .filter(|e| {
                    e.section_id == section_id
                        && e.status == EnrollmentStatus::Enrolled.to_string()
                })
                .ok_or(ValidationError::UnknownEnrollment)?;

            let mut graded: enrollments::ActiveModel = enrollment.into();
            graded.grade = Set(Some(letter));
            graded.grade_points = Set(Some(letter.points()));
            graded.can_disenroll = Set(false);
            graded.updated_at = Set(now);
            enrollments::Entity::update(graded).exec(&txn).await?;
        }

        let mut flagged: course_sections::ActiveModel = section.into();
        flagged.grades_submitted = Set(true);
        flagged.updated_at = Set(now);
        course_sections::Entity::update(flagged).exec(&txn).await?;

        txn.commit().await?;
        info!(
            "posted {} grades for section {section_id}",
            grades.len()
        );
        Ok(())
    }
}
