use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Whether a section accepts new enrollments
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SectionStatus {
    Open,
    Closed,
}

/// Lifecycle state of an enrollment row. A dropped row keeps its key and
/// is revived if the student enrolls in the same section again.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EnrollmentStatus {
    Enrolled,
    Dropped,
}
