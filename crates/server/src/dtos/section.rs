use chrono::NaiveTime;
use database::entities::course_sections;
use database::services::catalog::SectionDetail;
use models::schedule::MeetingPattern;
use sea_orm::prelude::Uuid;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct SectionQueryParams {
    pub semester: Option<String>,
    pub year: Option<i16>,
    pub course_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateSectionRequest {
    pub course_id: Uuid,
    pub professor_id: Uuid,
    pub section_number: String,
    pub semester: String,
    pub year: i16,
    /// Weekly meeting pattern, e.g. "MWF 10:00-11:00"
    pub schedule: String,
    pub room: String,
    /// Defaults to the course's capacity when absent
    pub capacity: Option<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SectionResponse {
    pub id: String,
    pub course_id: String,
    pub professor_id: String,
    pub section_number: String,
    pub semester: String,
    pub year: i16,
    pub schedule: String,
    pub room: String,
    pub max_capacity: i32,
    pub current_enrollment: i32,
    pub status: String,
    pub grades_submitted: bool,
    pub semester_ended: bool,
}

impl From<course_sections::Model> for SectionResponse {
    fn from(section: course_sections::Model) -> Self {
        SectionResponse {
            id: section.id.to_string(),
            course_id: section.course_id.to_string(),
            professor_id: section.professor_id.to_string(),
            section_number: section.section_number,
            semester: section.semester,
            year: section.year,
            schedule: section.schedule,
            room: section.room,
            max_capacity: section.max_capacity,
            current_enrollment: section.current_enrollment,
            status: section.status,
            grades_submitted: section.grades_submitted,
            semester_ended: section.semester_ended,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SectionDetailResponse {
    pub section: SectionResponse,
    pub course_code: String,
    pub course_title: String,
    pub credits: i16,
    pub professor_name: String,
    /// Meeting days as week letters, e.g. "MWF"
    pub days: Option<String>,
    pub time_begin: Option<NaiveTime>,
    pub time_end: Option<NaiveTime>,
}

impl From<SectionDetail> for SectionDetailResponse {
    fn from(detail: SectionDetail) -> Self {
        let pattern = detail.section.schedule.parse::<MeetingPattern>().ok();

        SectionDetailResponse {
            section: detail.section.into(),
            course_code: detail.course.code,
            course_title: detail.course.title,
            credits: detail.course.credits,
            professor_name: format!(
                "{} {}",
                detail.professor.first_name, detail.professor.last_name
            ),
            days: pattern.map(|p| p.days.to_string()),
            time_begin: pattern.map(|p| p.start),
            time_end: pattern.map(|p| p.end),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SetStatusRequest {
    pub status: String, // open | closed
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct GradeSubmissionRequest {
    /// Enrollment id to letter grade
    pub grades: HashMap<Uuid, String>,

    /// Admins may post grades after the term has ended
    #[serde(default)]
    pub admin_override: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct EndTermRequest {
    pub semester: String,
    pub year: i16,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EndTermResponse {
    pub sections_ended: u64,
}
