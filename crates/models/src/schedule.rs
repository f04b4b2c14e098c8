use crate::days::{DaySet, ParseDaysError};
use chrono::NaiveTime;
use serde::Serialize;
use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

/// A weekly meeting pattern like `MWF 10:00-11:00`: a set of weekdays plus
/// a half-open time range shared by all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MeetingPattern {
    pub days: DaySet,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl MeetingPattern {
    /// Two patterns conflict when they share a weekday and their time
    /// ranges overlap. Ranges are half-open, so back-to-back meetings
    /// (one ending exactly when the other starts) do not conflict.
    pub fn conflicts_with(&self, other: &Self) -> bool {
        self.days.intersects(other.days) && self.start < other.end && other.start < self.end
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseScheduleError {
    /// Expected `<days> <HH:MM>-<HH:MM>`
    MissingParts,
    Days(ParseDaysError),
    Time(String),
    /// The end time is not after the start time
    EmptyRange,
}

impl Display for ParseScheduleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::MissingParts => write!(f, "expected '<days> <HH:MM>-<HH:MM>'"),
            Self::Days(e) => write!(f, "{e}"),
            Self::Time(t) => write!(f, "invalid time '{t}'"),
            Self::EmptyRange => write!(f, "meeting must end after it starts"),
        }
    }
}

impl std::error::Error for ParseScheduleError {}

impl From<ParseDaysError> for ParseScheduleError {
    fn from(e: ParseDaysError) -> Self {
        Self::Days(e)
    }
}

fn parse_time(s: &str) -> Result<NaiveTime, ParseScheduleError> {
    NaiveTime::parse_from_str(s, "%H:%M").map_err(|_| ParseScheduleError::Time(s.to_string()))
}

impl FromStr for MeetingPattern {
    type Err = ParseScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let (days_part, time_part) = match (parts.next(), parts.next(), parts.next()) {
            (Some(days), Some(times), None) => (days, times),
            _ => return Err(ParseScheduleError::MissingParts),
        };

        let days: DaySet = days_part.parse()?;

        let (start_part, end_part) = time_part
            .split_once('-')
            .ok_or(ParseScheduleError::MissingParts)?;
        let start = parse_time(start_part)?;
        let end = parse_time(end_part)?;

        if end <= start {
            return Err(ParseScheduleError::EmptyRange);
        }

        Ok(MeetingPattern { days, start, end })
    }
}

impl Display for MeetingPattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "{} {}-{}",
            self.days,
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(s: &str) -> MeetingPattern {
        s.parse().unwrap()
    }

    #[test]
    fn parses_and_displays() {
        let p = pattern("MWF 10:00-11:00");
        assert_eq!(p.days.to_string(), "MWF");
        assert_eq!(p.to_string(), "MWF 10:00-11:00");
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(
            "MWF".parse::<MeetingPattern>(),
            Err(ParseScheduleError::MissingParts)
        );
        assert_eq!(
            "MWF 10:00".parse::<MeetingPattern>(),
            Err(ParseScheduleError::MissingParts)
        );
        assert!(matches!(
            "MWF 25:00-26:00".parse::<MeetingPattern>(),
            Err(ParseScheduleError::Time(_))
        ));
        assert_eq!(
            "MWF 11:00-10:00".parse::<MeetingPattern>(),
            Err(ParseScheduleError::EmptyRange)
        );
        assert!(matches!(
            "XYZ 10:00-11:00".parse::<MeetingPattern>(),
            Err(ParseScheduleError::Days(_))
        ));
    }

    #[test]
    fn overlapping_times_on_shared_days_conflict() {
        let a = pattern("MWF 10:00-11:00");
        let b = pattern("MWF 10:30-11:30");
        assert!(a.conflicts_with(&b));
        assert!(b.conflicts_with(&a));
    }

    #[test]
    fn same_times_on_disjoint_days_do_not_conflict() {
        let a = pattern("MWF 10:00-11:00");
        let b = pattern("TR 10:00-11:00");
        assert!(!a.conflicts_with(&b));
    }

    #[test]
    fn back_to_back_meetings_do_not_conflict() {
        let a = pattern("MWF 10:00-11:00");
        let b = pattern("MWF 11:00-12:00");
        assert!(!a.conflicts_with(&b));
        assert!(!b.conflicts_with(&a));
    }

    #[test]
    fn single_shared_day_is_enough_to_conflict() {
        let a = pattern("MWF 10:00-11:00");
        let b = pattern("FS 10:45-12:00");
        assert!(a.conflicts_with(&b));
    }
}
