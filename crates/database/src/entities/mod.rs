pub mod course_sections;
pub mod courses;
pub mod enrollments;
pub mod professors;
pub mod students;
pub mod users;
