use serde::{Deserialize, Serialize};

/// Accumulates the run score. Coins are worth more on later tiers:
/// a pickup while on tier `level` adds `(level + 1)^2` points.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreCalculator {
    score: u32,
}

impl ScoreCalculator {
    pub fn new() -> Self {
        Self { score: 0 }
    }

    pub fn increase(&mut self, level: usize) {
        let weight = (level + 1) as u32;
        self.score += weight * weight;
    }

    pub fn total(&self) -> u32 {
        self.score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        assert_eq!(ScoreCalculator::new().total(), 0);
    }

    #[test]
    fn coin_value_is_squared_tier_weight() {
        let mut score = ScoreCalculator::new();
        score.increase(2);
        assert_eq!(score.total(), 9);

        score.increase(0);
        assert_eq!(score.total(), 10);

        score.increase(4);
        assert_eq!(score.total(), 35);
    }

    #[test]
    fn score_never_decreases() {
        let mut score = ScoreCalculator::new();
        let mut previous = 0;
        for level in [0, 3, 1, 4, 4, 0, 2] {
            score.increase(level);
            assert!(score.total() > previous);
            previous = score.total();
        }
    }
}
