use database::services::reporting::ScheduleEntry;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Serialize, ToSchema)]
pub struct GpaResponse {
    pub student_id: String,
    pub gpa: f32,
}

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct ScheduleQueryParams {
    pub semester: String,
    pub year: i16,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ScheduleEntryResponse {
    pub course_code: String,
    pub course_title: String,
    pub section_number: String,
    pub schedule: String,
    pub room: String,
    pub credits: i16,
}

impl From<ScheduleEntry> for ScheduleEntryResponse {
    fn from(entry: ScheduleEntry) -> Self {
        ScheduleEntryResponse {
            course_code: entry.course_code,
            course_title: entry.course_title,
            section_number: entry.section_number,
            schedule: entry.schedule,
            room: entry.room,
            credits: entry.credits,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ScheduleResponse {
    pub entries: Vec<ScheduleEntryResponse>,
}
