use crate::routes::{auth, course, enrollment, health, section, student};
use utoipa::OpenApi;

/// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        auth::register,
        auth::login,
        course::list_courses,
        course::create_course,
        course::get_course,
        section::list_sections,
        section::create_section,
        section::get_section,
        section::set_section_status,
        section::submit_grades,
        section::end_term,
        enrollment::enroll,
        enrollment::disenroll,
        student::get_gpa,
        student::get_schedule
    ),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Authentication", description = "Account registration and login"),
        (name = "Courses", description = "Course catalog"),
        (name = "Sections", description = "Scheduled sections, grading, and terms"),
        (name = "Enrollments", description = "Enrollment and disenrollment"),
        (name = "Students", description = "Student GPA and schedules"),
    ),
    info(
        title = "Registration API",
        version = "1.0.0",
        description = "Course registration, enrollment, and grading API",
        license(
            name = "MIT OR Apache-2.0",
        )
    )
)]
pub struct ApiDoc;
