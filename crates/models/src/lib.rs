pub mod days;
pub mod eligibility;
pub mod gpa;
pub mod grade;
pub mod role;
pub mod schedule;
pub mod status;
pub mod term;
