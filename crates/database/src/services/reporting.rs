use crate::entities::{course_sections, courses, enrollments, students};
use crate::error::{RegistrarError, ValidationError};
use models::gpa;
use models::status::EnrollmentStatus;
use models::term::Term;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
};
use serde::Serialize;
use std::collections::HashMap;
use uuid::Uuid;

/// One row of a student's term schedule
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleEntry {
    pub course_code: String,
    pub course_title: String,
    pub section_number: String,
    pub schedule: String,
    pub room: String,
    pub credits: i16,
}

/// `(grade points, course credits)` for every graded enrollment of the
/// student, the input shape the GPA computation wants
pub(crate) async fn graded_credit_pairs(
    conn: &impl ConnectionTrait,
    student_id: Uuid,
) -> Result<Vec<(f32, i16)>, RegistrarError> {
    let graded: Vec<(enrollments::Model, course_sections::Model)> = enrollments::Entity::find()
        .filter(enrollments::Column::StudentId.eq(student_id))
        .filter(enrollments::Column::GradePoints.is_not_null())
        .find_also_related(course_sections::Entity)
        .all(conn)
        .await?
        .into_iter()
        .filter_map(|(enrollment, section)| section.map(|s| (enrollment, s)))
        .collect();

    if graded.is_empty() {
        return Ok(vec![]);
    }

    let course_ids: Vec<Uuid> = graded.iter().map(|(_, s)| s.course_id).collect();
    let credits_by_course: HashMap<Uuid, i16> = courses::Entity::find()
        .filter(courses::Column::Id.is_in(course_ids))
        .all(conn)
        .await?
        .into_iter()
        .map(|c| (c.id, c.credits))
        .collect();

    Ok(graded
        .into_iter()
        .filter_map(|(enrollment, section)| {
            let points = enrollment.grade_points?;
            let credits = credits_by_course.get(&section.course_id).copied()?;
            Some((points, credits))
        })
        .collect())
}

pub struct ReportingService;

impl ReportingService {
    /// Credit-weighted GPA over all graded enrollments; 0.0 when nothing
    /// has been graded yet
    pub async fn gpa(db: &DatabaseConnection, student_id: Uuid) -> Result<f32, RegistrarError> {
        students::Entity::find_by_id(student_id)
            .one(db)
            .await?
            .ok_or(ValidationError::StudentNotFound)?;

        Ok(gpa::gpa(&graded_credit_pairs(db, student_id).await?))
    }

    /// The student's active enrollments for a term, joined with course
    /// and section details for display
    pub async fn schedule(
        db: &DatabaseConnection,
        student_id: Uuid,
        term: &Term,
    ) -> Result<Vec<ScheduleEntry>, RegistrarError> {
        students::Entity::find_by_id(student_id)
            .one(db)
            .await?
            .ok_or(ValidationError::StudentNotFound)?;

        let sections: Vec<course_sections::Model> = enrollments::Entity::find()
            .filter(enrollments::Column::StudentId.eq(student_id))
            .filter(enrollments::Column::Status.eq(EnrollmentStatus::Enrolled.to_string()))
            .find_also_related(course_sections::Entity)
            .all(db)
            .await?
            .into_iter()
            .filter_map(|(_, section)| section)
            .filter(|s| s.semester == term.semester && s.year == term.year)
            .collect();

        if sections.is_empty() {
            return Ok(vec![]);
        }

        let course_ids: Vec<Uuid> = sections.iter().map(|s| s.course_id).collect();
        let courses_by_id: HashMap<Uuid, courses::Model> = courses::Entity::find()
            .filter(courses::Column::Id.is_in(course_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|c| (c.id, c))
            .collect();

        Ok(sections
            .into_iter()
            .filter_map(|section| {
                let course = courses_by_id.get(&section.course_id)?;
                Some(ScheduleEntry {
                    course_code: course.code.clone(),
                    course_title: course.title.clone(),
                    section_number: section.section_number,
                    schedule: section.schedule,
                    room: section.room,
                    credits: course.credits,
                })
            })
            .collect())
    }
}
