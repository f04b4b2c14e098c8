use crate::schedule::MeetingPattern;
use std::collections::HashSet;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Why an enrollment request was refused. The display strings are stable
/// and shown to users verbatim, so the rules run in a fixed order and the
/// first failure wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrollmentDenial {
    SectionUnavailable,
    SectionFull,
    AlreadyEnrolled,
    PrerequisitesNotMet,
    TimeConflict,
    ExceedsMaxCredits,
}

impl Display for EnrollmentDenial {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let reason = match self {
            Self::SectionUnavailable => "section not available",
            Self::SectionFull => "section full",
            Self::AlreadyEnrolled => "already enrolled",
            Self::PrerequisitesNotMet => "prerequisites not met",
            Self::TimeConflict => "time conflict",
            Self::ExceedsMaxCredits => "exceeds max credits",
        };

        write!(f, "{reason}")
    }
}

impl std::error::Error for EnrollmentDenial {}

/// Section state the rules evaluate, read under the section row lock
#[derive(Debug, Clone)]
pub struct SectionFacts {
    pub open: bool,
    pub current_enrollment: i32,
    pub max_capacity: i32,
    /// Credits of the underlying course
    pub credits: i16,
    /// Course codes that must already be completed with a passing grade
    pub prerequisites: Vec<String>,
    /// None when the stored schedule string does not parse; such a section
    /// cannot conflict with anything
    pub meetings: Option<MeetingPattern>,
}

/// The requesting student's standing, used for the credit ceiling
#[derive(Debug, Clone, Copy)]
pub struct StudentStanding {
    pub year_level: i16,
    pub gpa: f32,
}

/// One of the student's active enrollments in the target term
#[derive(Debug, Clone)]
pub struct TermEnrollment {
    pub meetings: Option<MeetingPattern>,
    pub credits: i16,
}

/// Maximum credits a student may carry in one term. First-years get the
/// standard load regardless of GPA; a zero GPA past the first year caps
/// the load, and a strong GPA raises it.
pub fn max_credits(year_level: i16, gpa: f32) -> i16 {
    if year_level <= 1 {
        20
    } else if gpa == 0.0 {
        14
    } else if gpa >= 3.0 {
        24
    } else {
        20
    }
}

/// Decides whether a student may enroll in a section.
///
/// `completed` holds the course codes the student finished with a passing
/// grade; `term_load` holds their active enrollments in the section's term.
pub fn check_enrollment(
    section: &SectionFacts,
    already_enrolled: bool,
    completed: &HashSet<String>,
    term_load: &[TermEnrollment],
    standing: StudentStanding,
) -> Result<(), EnrollmentDenial> {
    if !section.open {
        return Err(EnrollmentDenial::SectionUnavailable);
    }

    if section.current_enrollment >= section.max_capacity {
        return Err(EnrollmentDenial::SectionFull);
    }

    if already_enrolled {
        return Err(EnrollmentDenial::AlreadyEnrolled);
    }

    if section
        .prerequisites
        .iter()
        .any(|code| !completed.contains(code))
    {
        return Err(EnrollmentDenial::PrerequisitesNotMet);
    }

    if let Some(meetings) = &section.meetings
        && term_load
            .iter()
            .filter_map(|e| e.meetings.as_ref())
            .any(|m| m.conflicts_with(meetings))
    {
        return Err(EnrollmentDenial::TimeConflict);
    }

    let carried: i32 = term_load.iter().map(|e| i32::from(e.credits)).sum();
    let ceiling = i32::from(max_credits(standing.year_level, standing.gpa));
    if carried + i32::from(section.credits) > ceiling {
        return Err(EnrollmentDenial::ExceedsMaxCredits);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_section() -> SectionFacts {
        SectionFacts {
            open: true,
            current_enrollment: 0,
            max_capacity: 30,
            credits: 3,
            prerequisites: vec![],
            meetings: Some("MWF 10:00-11:00".parse().unwrap()),
        }
    }

    fn standing() -> StudentStanding {
        StudentStanding {
            year_level: 2,
            gpa: 3.2,
        }
    }

    fn no_courses() -> HashSet<String> {
        HashSet::new()
    }

    #[test]
    fn admits_a_clean_request() {
        let result = check_enrollment(&open_section(), false, &no_courses(), &[], standing());
        assert_eq!(result, Ok(()));
    }

    #[test]
    fn closed_section_is_unavailable() {
        let mut section = open_section();
        section.open = false;
        assert_eq!(
            check_enrollment(&section, false, &no_courses(), &[], standing()),
            Err(EnrollmentDenial::SectionUnavailable)
        );
    }

    #[test]
    fn full_section_is_rejected() {
        let mut section = open_section();
        section.current_enrollment = 30;
        assert_eq!(
            check_enrollment(&section, false, &no_courses(), &[], standing()),
            Err(EnrollmentDenial::SectionFull)
        );
    }

    #[test]
    fn rules_run_in_fixed_order() {
        // A full section the student is also already enrolled in reports
        // the capacity problem, not the duplicate.
        let mut section = open_section();
        section.current_enrollment = 30;
        assert_eq!(
            check_enrollment(&section, true, &no_courses(), &[], standing()),
            Err(EnrollmentDenial::SectionFull)
        );
    }

    #[test]
    fn duplicate_enrollment_is_rejected() {
        assert_eq!(
            check_enrollment(&open_section(), true, &no_courses(), &[], standing()),
            Err(EnrollmentDenial::AlreadyEnrolled)
        );
    }

    #[test]
    fn every_prerequisite_must_be_completed() {
        let mut section = open_section();
        section.prerequisites = vec!["CS101".to_string(), "MATH201".to_string()];

        let one_done: HashSet<String> = ["CS101".to_string()].into();
        assert_eq!(
            check_enrollment(&section, false, &one_done, &[], standing()),
            Err(EnrollmentDenial::PrerequisitesNotMet)
        );

        let both_done: HashSet<String> = ["CS101".to_string(), "MATH201".to_string()].into();
        assert_eq!(
            check_enrollment(&section, false, &both_done, &[], standing()),
            Ok(())
        );
    }

    #[test]
    fn overlapping_meeting_is_a_time_conflict() {
        let load = vec![TermEnrollment {
            meetings: Some("MWF 10:30-11:30".parse().unwrap()),
            credits: 3,
        }];
        assert_eq!(
            check_enrollment(&open_section(), false, &no_courses(), &load, standing()),
            Err(EnrollmentDenial::TimeConflict)
        );
    }

    #[test]
    fn disjoint_days_are_not_a_conflict() {
        let load = vec![TermEnrollment {
            meetings: Some("TR 10:00-11:00".parse().unwrap()),
            credits: 3,
        }];
        assert_eq!(
            check_enrollment(&open_section(), false, &no_courses(), &load, standing()),
            Ok(())
        );
    }

    #[test]
    fn unparsed_schedules_never_conflict() {
        let mut section = open_section();
        section.meetings = None;
        let load = vec![TermEnrollment {
            meetings: Some("MWF 10:00-11:00".parse().unwrap()),
            credits: 3,
        }];
        assert_eq!(
            check_enrollment(&section, false, &no_courses(), &load, standing()),
            Ok(())
        );
    }

    #[test]
    fn credit_ceiling_counts_the_new_course() {
        // 2.5 GPA sophomore: ceiling 20, carrying 18, adding 3 overflows.
        let load = vec![TermEnrollment {
            meetings: Some("TR 09:00-10:30".parse().unwrap()),
            credits: 18,
        }];
        let result = check_enrollment(
            &open_section(),
            false,
            &no_courses(),
            &load,
            StudentStanding {
                year_level: 2,
                gpa: 2.5,
            },
        );
        assert_eq!(result, Err(EnrollmentDenial::ExceedsMaxCredits));

        // The same load fits under a 24-credit ceiling.
        let result = check_enrollment(
            &open_section(),
            false,
            &no_courses(),
            &load,
            StudentStanding {
                year_level: 2,
                gpa: 3.5,
            },
        );
        assert_eq!(result, Ok(()));
    }

    #[test]
    fn ceiling_table() {
        // First-years always get 20, even with a perfect or zero GPA.
        assert_eq!(max_credits(1, 0.0), 20);
        assert_eq!(max_credits(1, 4.0), 20);
        // Zero GPA past the first year caps the load.
        assert_eq!(max_credits(2, 0.0), 14);
        // Strong GPA raises it.
        assert_eq!(max_credits(2, 3.5), 24);
        assert_eq!(max_credits(3, 3.0), 24);
        // Everyone else carries the standard load.
        assert_eq!(max_credits(3, 2.4), 20);
    }
}
