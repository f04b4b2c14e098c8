use serde::Serialize;
use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

/// The weekdays a section meets, one bit per day
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[repr(transparent)]
pub struct DaySet(u8);

impl DaySet {
    pub const MONDAY: Self = DaySet(1 << 0);
    pub const TUESDAY: Self = DaySet(1 << 1);
    pub const WEDNESDAY: Self = DaySet(1 << 2);
    pub const THURSDAY: Self = DaySet(1 << 3);
    pub const FRIDAY: Self = DaySet(1 << 4);
    pub const SATURDAY: Self = DaySet(1 << 5);
    pub const SUNDAY: Self = DaySet(1 << 6);

    pub const NONE: Self = DaySet(0);

    /// Day-to-letter mapping for parsing and display. R is Thursday,
    /// U is Sunday.
    const DAY_LETTERS: [(Self, char); 7] = [
        (Self::MONDAY, 'M'),
        (Self::TUESDAY, 'T'),
        (Self::WEDNESDAY, 'W'),
        (Self::THURSDAY, 'R'),
        (Self::FRIDAY, 'F'),
        (Self::SATURDAY, 'S'),
        (Self::SUNDAY, 'U'),
    ];

    pub fn contains(self, day: Self) -> bool {
        self.0 & day.0 == day.0
    }

    /// True when the two sets share at least one weekday
    pub fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn with(self, day: Self) -> Self {
        DaySet(self.0 | day.0)
    }
}

/// Error for day patterns containing anything other than the seven
/// recognized letters
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseDaysError {
    Empty,
    UnknownLetter(char),
}

impl Display for ParseDaysError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Empty => write!(f, "empty day pattern"),
            Self::UnknownLetter(c) => write!(f, "unknown day letter '{c}'"),
        }
    }
}

impl std::error::Error for ParseDaysError {}

impl FromStr for DaySet {
    type Err = ParseDaysError;

    fn from_str(pattern: &str) -> Result<Self, Self::Err> {
        if pattern.is_empty() {
            return Err(ParseDaysError::Empty);
        }

        let mut result = Self::NONE;
        for c in pattern.chars() {
            let day = Self::DAY_LETTERS
                .iter()
                .find(|(_, letter)| *letter == c)
                .map(|(day, _)| *day)
                .ok_or(ParseDaysError::UnknownLetter(c))?;
            result = result.with(day);
        }

        Ok(result)
    }
}

impl Display for DaySet {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for (day, letter) in Self::DAY_LETTERS {
            if self.contains(day) {
                write!(f, "{letter}")?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_day_letters() {
        let days: DaySet = "MWF".parse().unwrap();
        assert!(days.contains(DaySet::MONDAY));
        assert!(days.contains(DaySet::WEDNESDAY));
        assert!(days.contains(DaySet::FRIDAY));
        assert!(!days.contains(DaySet::TUESDAY));
        assert!(!days.contains(DaySet::THURSDAY));
    }

    #[test]
    fn rejects_unknown_letters_and_empty_patterns() {
        assert_eq!(
            "MXF".parse::<DaySet>(),
            Err(ParseDaysError::UnknownLetter('X'))
        );
        assert_eq!("".parse::<DaySet>(), Err(ParseDaysError::Empty));
    }

    #[test]
    fn displays_in_week_order() {
        let days: DaySet = "FWM".parse().unwrap();
        assert_eq!(days.to_string(), "MWF");
    }

    #[test]
    fn disjoint_sets_do_not_intersect() {
        let mwf: DaySet = "MWF".parse().unwrap();
        let tr: DaySet = "TR".parse().unwrap();
        assert!(!mwf.intersects(tr));
        assert!(mwf.intersects("FS".parse().unwrap()));
        assert!(!DaySet::NONE.intersects(mwf));
    }
}
