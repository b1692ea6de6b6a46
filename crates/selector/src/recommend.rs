//! Recommended daily steps by age.

/// Recommended daily steps for an age in years.
///
/// Total over all inputs: anything outside 5..=100, or no age at all,
/// gets the conservative default of 4000.
pub fn recommended_steps(age: Option<u32>) -> u32 {
    match age {
        Some(5..=12) => 10_000,    // children
        Some(13..=17) => 12_000,   // teenagers
        Some(18..=64) => 10_000,   // adults
        Some(65..=100) => 7_000,   // older adults
        _ => 4_000,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_for_every_valid_age() {
        for age in 5..=100 {
            let expected = match age {
                5..=12 => 10_000,
                13..=17 => 12_000,
                18..=64 => 10_000,
                _ => 7_000,
            };
            assert_eq!(recommended_steps(Some(age)), expected, "age {age}");
        }
    }

    #[test]
    fn test_band_edges() {
        assert_eq!(recommended_steps(Some(12)), 10_000);
        assert_eq!(recommended_steps(Some(13)), 12_000);
        assert_eq!(recommended_steps(Some(17)), 12_000);
        assert_eq!(recommended_steps(Some(18)), 10_000);
        assert_eq!(recommended_steps(Some(64)), 10_000);
        assert_eq!(recommended_steps(Some(65)), 7_000);
        assert_eq!(recommended_steps(Some(100)), 7_000);
    }

    #[test]
    fn test_outside_range_defaults() {
        assert_eq!(recommended_steps(None), 4_000);
        assert_eq!(recommended_steps(Some(0)), 4_000);
        assert_eq!(recommended_steps(Some(4)), 4_000);
        assert_eq!(recommended_steps(Some(101)), 4_000);
        assert_eq!(recommended_steps(Some(u32::MAX)), 4_000);
    }
}
