/// Credit-weighted GPA over `(grade points, course credits)` pairs,
/// rounded to two decimal places. A student with no graded enrollments
/// has a GPA of 0.0.
pub fn gpa(graded: &[(f32, i16)]) -> f32 {
    let total_credits: f32 = graded.iter().map(|(_, credits)| f32::from(*credits)).sum();
    if total_credits == 0.0 {
        return 0.0;
    }

    let total_points: f32 = graded
        .iter()
        .map(|(points, credits)| points * f32::from(*credits))
        .sum();

    ((total_points / total_credits) * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_by_credits_and_rounds() {
        // (4.0 x 3 + 3.0 x 4) / 7 = 24 / 7 = 3.4285... -> 3.43
        assert_eq!(gpa(&[(4.0, 3), (3.0, 4)]), 3.43);
    }

    #[test]
    fn no_graded_enrollments_means_zero() {
        assert_eq!(gpa(&[]), 0.0);
        assert_eq!(gpa(&[(4.0, 0)]), 0.0);
    }

    #[test]
    fn uniform_grades_are_exact() {
        assert_eq!(gpa(&[(3.0, 3), (3.0, 4), (3.0, 1)]), 3.0);
    }
}
