use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Role tag on a user record. Role-specific data lives in a separate
/// payload row (students/professors) keyed by the user id.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Student,
    Professor,
    Admin,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_round_trip_as_lowercase_strings() {
        assert_eq!(UserRole::Student.to_string(), "student");
        assert_eq!("admin".parse::<UserRole>().unwrap(), UserRole::Admin);
        assert!("Dean".parse::<UserRole>().is_err());
    }
}
