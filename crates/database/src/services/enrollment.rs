use crate::entities::{course_sections, courses, enrollments, students};
use crate::error::{RegistrarError, ValidationError};
use crate::services::{catalog, reporting};
use chrono::Utc;
use log::{debug, info};
use models::eligibility::{
    self, EnrollmentDenial, SectionFacts, StudentStanding, TermEnrollment,
};
use models::gpa;
use models::status::{EnrollmentStatus, SectionStatus};
use sea_orm::ActiveValue::Set;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, QuerySelect,
    TransactionTrait,
};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

pub struct EnrollmentService;

impl EnrollmentService {
    /// Enrolls a student in a section.
    ///
    /// The whole operation is one transaction: the section row is locked
    /// exclusively, the eligibility rules run against state read under
    /// that lock, and the seat counter is incremented with a conditional
    /// update that re-checks capacity at write time. Zero affected rows
    /// means another transaction took the last seat between our read and
    /// our write, and the request fails exactly like an ordinary full
    /// section.
    pub async fn enroll(
        db: &DatabaseConnection,
        student_id: Uuid,
        section_id: Uuid,
    ) -> Result<Uuid, RegistrarError> {
        let txn = db.begin().await?;

        let section = course_sections::Entity::find_by_id(section_id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(EnrollmentDenial::SectionUnavailable)?;

        let course = courses::Entity::find_by_id(section.course_id)
            .one(&txn)
            .await?
            .ok_or(ValidationError::CourseNotFound)?;

        let student = students::Entity::find_by_id(student_id)
            .one(&txn)
            .await?
            .ok_or(ValidationError::StudentNotFound)?;

        let existing = enrollments::Entity::find()
            .filter(enrollments::Column::StudentId.eq(student_id))
            .filter(enrollments::Column::SectionId.eq(section_id))
            .one(&txn)
            .await?;
        let already_enrolled = existing
            .as_ref()
            .is_some_and(|e| e.status == EnrollmentStatus::Enrolled.to_string());

        let completed = Self::completed_with_passing_grade(&txn, student_id).await?;
        let term_load =
            Self::active_term_load(&txn, student_id, &section.semester, section.year).await?;
        let standing = StudentStanding {
            year_level: student.year_level,
            gpa: gpa::gpa(&reporting::graded_credit_pairs(&txn, student_id).await?),
        };

        let facts = SectionFacts {
            open: section.status == SectionStatus::Open.to_string(),
            current_enrollment: section.current_enrollment,
            max_capacity: section.max_capacity,
            credits: course.credits,
            prerequisites: catalog::prereq_codes(&course.prerequisites),
            meetings: section.schedule.parse().ok(),
        };

        if let Err(denial) =
            eligibility::check_enrollment(&facts, already_enrolled, &completed, &term_load, standing)
        {
            debug!("enrollment of {student_id} in {section_id} denied: {denial}");
            return Err(denial.into());
        }

        let updated = course_sections::Entity::update_many()
            .col_expr(
                course_sections::Column::CurrentEnrollment,
                Expr::col(course_sections::Column::CurrentEnrollment).add(1),
            )
            .filter(course_sections::Column::Id.eq(section_id))
            .filter(course_sections::Column::CurrentEnrollment.lt(section.max_capacity))
            .exec(&txn)
            .await?;
        if updated.rows_affected == 0 {
            return Err(EnrollmentDenial::SectionFull.into());
        }

        let now = Utc::now().naive_utc();
        let enrollment_id = match existing {
            // The (student, section) key is total, so a dropped row is
            // revived instead of inserting a second one.
            Some(dropped) => {
                let id = dropped.id;
                let mut revived: enrollments::ActiveModel = dropped.into();
                revived.status = Set(EnrollmentStatus::Enrolled.to_string());
                revived.grade = Set(None);
                revived.grade_points = Set(None);
                revived.can_disenroll = Set(true);
                revived.enrolled_at = Set(now);
                revived.updated_at = Set(now);
                enrollments::Entity::update(revived).exec(&txn).await?;
                id
            }
            None => {
                let id = Uuid::new_v4();
                enrollments::Entity::insert(enrollments::ActiveModel {
                    id: Set(id),
                    student_id: Set(student_id),
                    section_id: Set(section_id),
                    status: Set(EnrollmentStatus::Enrolled.to_string()),
                    grade: Set(None),
                    grade_points: Set(None),
                    can_disenroll: Set(true),
                    enrolled_at: Set(now),
                    updated_at: Set(now),
                })
                .exec(&txn)
                .await?;
                id
            }
        };

        txn.commit().await?;
        info!("student {student_id} enrolled in section {section_id}");
        Ok(enrollment_id)
    }

    /// Drops an active enrollment and frees the seat.
    ///
    /// Blocked once a grade has posted for the enrollment or the section's
    /// semester has ended.
    pub async fn disenroll(
        db: &DatabaseConnection,
        student_id: Uuid,
        section_id: Uuid,
    ) -> Result<(), RegistrarError> {
        let txn = db.begin().await?;

        let section = course_sections::Entity::find_by_id(section_id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(ValidationError::SectionNotFound)?;

        let enrollment = enrollments::Entity::find()
            .filter(enrollments::Column::StudentId.eq(student_id))
            .filter(enrollments::Column::SectionId.eq(section_id))
            .filter(enrollments::Column::Status.eq(EnrollmentStatus::Enrolled.to_string()))
            .one(&txn)
            .await?
            .ok_or(ValidationError::NotEnrolled)?;

        if !enrollment.can_disenroll || section.semester_ended {
            return Err(ValidationError::DisenrollLocked.into());
        }

        let mut dropped: enrollments::ActiveModel = enrollment.into();
        dropped.status = Set(EnrollmentStatus::Dropped.to_string());
        dropped.updated_at = Set(Utc::now().naive_utc());
        enrollments::Entity::update(dropped).exec(&txn).await?;

        course_sections::Entity::update_many()
            .col_expr(
                course_sections::Column::CurrentEnrollment,
                Expr::col(course_sections::Column::CurrentEnrollment).sub(1),
            )
            .filter(course_sections::Column::Id.eq(section_id))
            .filter(course_sections::Column::CurrentEnrollment.gt(0))
            .exec(&txn)
            .await?;

        txn.commit().await?;
        info!("student {student_id} dropped section {section_id}");
        Ok(())
    }

    /// Course codes the student has completed with a passing grade
    async fn completed_with_passing_grade(
        conn: &impl ConnectionTrait,
        student_id: Uuid,
    ) -> Result<HashSet<String>, RegistrarError> {
        let graded = enrollments::Entity::find()
            .filter(enrollments::Column::StudentId.eq(student_id))
            .filter(
                enrollments::Column::GradePoints.gte(models::grade::LetterGrade::PASSING_POINTS),
            )
            .find_also_related(course_sections::Entity)
            .all(conn)
            .await?;

        let course_ids: Vec<Uuid> = graded
            .iter()
            .filter_map(|(_, section)| section.as_ref().map(|s| s.course_id))
            .collect();
        if course_ids.is_empty() {
            return Ok(HashSet::new());
        }

        let codes = courses::Entity::find()
            .filter(courses::Column::Id.is_in(course_ids))
            .all(conn)
            .await?
            .into_iter()
            .map(|c| c.code)
            .collect();

        Ok(codes)
    }

    /// The student's active enrollments in the given term, with parsed
    /// meeting patterns and course credits
    async fn active_term_load(
        conn: &impl ConnectionTrait,
        student_id: Uuid,
        semester: &str,
        year: i16,
    ) -> Result<Vec<TermEnrollment>, RegistrarError> {
        let sections: Vec<course_sections::Model> = enrollments::Entity::find()
            .filter(enrollments::Column::StudentId.eq(student_id))
            .filter(enrollments::Column::Status.eq(EnrollmentStatus::Enrolled.to_string()))
            .find_also_related(course_sections::Entity)
            .all(conn)
            .await?
            .into_iter()
            .filter_map(|(_, section)| section)
            .filter(|s| s.semester == semester && s.year == year)
            .collect();

        if sections.is_empty() {
            return Ok(vec![]);
        }

        let course_ids: Vec<Uuid> = sections.iter().map(|s| s.course_id).collect();
        let credits_by_course: HashMap<Uuid, i16> = courses::Entity::find()
            .filter(courses::Column::Id.is_in(course_ids))
            .all(conn)
            .await?
            .into_iter()
            .map(|c| (c.id, c.credits))
            .collect();

        Ok(sections
            .into_iter()
            .map(|s| TermEnrollment {
                meetings: s.schedule.parse().ok(),
                credits: credits_by_course.get(&s.course_id).copied().unwrap_or(0),
            })
            .collect())
    }
}
