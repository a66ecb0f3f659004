//! Dice roll results and aggregation.

/// The result of rolling a [`DiceSpec`](crate::DiceSpec).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RollResult {
    /// Individual die values, in roll order.
    pub values: Vec<u32>,
}

impl RollResult {
    /// Sum of all die values.
    pub fn total(&self) -> u64 {
        self.values.iter().map(|&v| u64::from(v)).sum()
    }

    /// Number of dice in the result.
    pub fn count(&self) -> usize {
        self.values.len()
    }
}

impl std::fmt::Display for RollResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let values: Vec<String> = self.values.iter().map(|v| v.to_string()).collect();
        write!(f, "[{}] = {}", values.join(", "), self.total())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_and_count() {
        let r = RollResult {
            values: vec![3, 5, 1],
        };
        assert_eq!(r.total(), 9);
        assert_eq!(r.count(), 3);
    }

    #[test]
    fn empty_result() {
        let r = RollResult::default();
        assert_eq!(r.total(), 0);
        assert_eq!(r.count(), 0);
    }

    #[test]
    fn total_of_largest_faces_does_not_overflow() {
        let r = RollResult {
            values: vec![u32::MAX; 3],
        };
        assert_eq!(r.total(), 3 * u64::from(u32::MAX));
    }

    #[test]
    fn display() {
        let r = RollResult {
            values: vec![3, 5],
        };
        assert_eq!(r.to_string(), "[3, 5] = 8");
    }
}
