use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[cfg(feature = "database")]
use sea_orm::Value;

/// Letter grades with their fixed grade-point values
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
pub enum LetterGrade {
    #[strum(serialize = "A+")]
    #[serde(rename = "A+")]
    APlus,
    A,
    #[strum(serialize = "A-")]
    #[serde(rename = "A-")]
    AMinus,
    #[strum(serialize = "B+")]
    #[serde(rename = "B+")]
    BPlus,
    B,
    #[strum(serialize = "B-")]
    #[serde(rename = "B-")]
    BMinus,
    #[strum(serialize = "C+")]
    #[serde(rename = "C+")]
    CPlus,
    C,
    #[strum(serialize = "C-")]
    #[serde(rename = "C-")]
    CMinus,
    #[strum(serialize = "D+")]
    #[serde(rename = "D+")]
    DPlus,
    D,
    #[strum(serialize = "D-")]
    #[serde(rename = "D-")]
    DMinus,
    F,
}

impl LetterGrade {
    /// A grade at or above this many points satisfies a prerequisite
    pub const PASSING_POINTS: f32 = 2.0;

    pub fn points(self) -> f32 {
        match self {
            Self::APlus | Self::A => 4.0,
            Self::AMinus => 3.7,
            Self::BPlus => 3.3,
            Self::B => 3.0,
            Self::BMinus => 2.7,
            Self::CPlus => 2.3,
            Self::C => 2.0,
            Self::CMinus => 1.7,
            Self::DPlus => 1.3,
            Self::D => 1.0,
            Self::DMinus => 0.7,
            Self::F => 0.0,
        }
    }

    pub fn is_passing(self) -> bool {
        self.points() >= Self::PASSING_POINTS
    }
}

// Stored in the database as the bare letter string, e.g. "A-".

#[cfg(feature = "database")]
impl From<LetterGrade> for Value {
    fn from(grade: LetterGrade) -> Self {
        Value::String(Some(Box::new(grade.to_string())))
    }
}

#[cfg(feature = "database")]
impl sea_orm::TryGetable for LetterGrade {
    fn try_get_by<I: sea_orm::ColIdx>(
        res: &sea_orm::QueryResult,
        index: I,
    ) -> Result<Self, sea_orm::TryGetError> {
        let val: String = res.try_get_by(index)?;

        val.parse().map_err(|_| {
            sea_orm::TryGetError::DbErr(sea_orm::DbErr::Type(format!(
                "invalid letter grade: {val}"
            )))
        })
    }
}

#[cfg(feature = "database")]
impl sea_orm::sea_query::ValueType for LetterGrade {
    fn try_from(v: Value) -> Result<Self, sea_orm::sea_query::ValueTypeErr> {
        match v {
            Value::String(Some(s)) => s.parse().map_err(|_| sea_orm::sea_query::ValueTypeErr),
            _ => Err(sea_orm::sea_query::ValueTypeErr),
        }
    }

    fn type_name() -> String {
        "LetterGrade".to_string()
    }

    fn array_type() -> sea_orm::sea_query::ArrayType {
        sea_orm::sea_query::ArrayType::String
    }

    fn column_type() -> sea_orm::sea_query::ColumnType {
        sea_orm::sea_query::ColumnType::Text
    }
}

#[cfg(feature = "database")]
impl sea_orm::sea_query::Nullable for LetterGrade {
    fn null() -> Value {
        Value::String(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_table_matches_policy() {
        assert_eq!(LetterGrade::APlus.points(), 4.0);
        assert_eq!(LetterGrade::A.points(), 4.0);
        assert_eq!(LetterGrade::AMinus.points(), 3.7);
        assert_eq!(LetterGrade::B.points(), 3.0);
        assert_eq!(LetterGrade::CMinus.points(), 1.7);
        assert_eq!(LetterGrade::DMinus.points(), 0.7);
        assert_eq!(LetterGrade::F.points(), 0.0);
    }

    #[test]
    fn c_passes_and_c_minus_does_not() {
        assert!(LetterGrade::C.is_passing());
        assert!(!LetterGrade::CMinus.is_passing());
        assert!(!LetterGrade::F.is_passing());
    }

    #[test]
    fn letters_round_trip_through_strings() {
        for letter in ["A+", "A", "A-", "B+", "B", "B-", "C+", "C", "C-", "D+", "D", "D-", "F"] {
            let grade: LetterGrade = letter.parse().unwrap();
            assert_eq!(grade.to_string(), letter);
        }
        assert!("E".parse::<LetterGrade>().is_err());
        assert!("a".parse::<LetterGrade>().is_err());
    }
}
