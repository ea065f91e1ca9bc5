use serde::{Deserialize, Serialize};

/// A difficulty bracket: platform spacing jitter, width variance, platform
/// count, and spawn probabilities for one stretch of the course.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelTier {
    /// Maximum extra horizontal gap inserted after each platform.
    pub gap_x: f32,
    /// Vertical drift range between consecutive platforms, centered on zero.
    pub gap_y: f32,
    /// Maximum amount shaved off the nominal platform width.
    pub width_diff: f32,
    /// Platforms emitted for this tier.
    pub total: usize,
    /// Probability of a coin spawning on each platform.
    pub coin_chance: f64,
    /// Probability of an enemy spawning on each platform.
    pub enemy_chance: f64,
}

/// Ordered difficulty progression; index 0 is the easiest tier. Defined
/// once at startup and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierTable {
    #[serde(default = "default_tiers")]
    pub tiers: Vec<LevelTier>,
}

/// The shipped tier list, used to fill `tiers` when a config omits it.
fn default_tiers() -> Vec<LevelTier> {
    TierTable::default().tiers
}

impl Default for TierTable {
    /// The five shipped tiers. Each is at least as hard as the previous:
    /// spawn chances, platform counts, and jitter ranges never decrease.
    fn default() -> Self {
        Self {
            tiers: vec![
                LevelTier {
                    gap_x: 0.0,
                    gap_y: 30.0,
                    width_diff: 0.0,
                    total: 5,
                    coin_chance: 0.4,
                    enemy_chance: 0.2,
                },
                LevelTier {
                    gap_x: 0.0,
                    gap_y: 30.0,
                    width_diff: 10.0,
                    total: 20,
                    coin_chance: 0.5,
                    enemy_chance: 0.3,
                },
                LevelTier {
                    gap_x: 10.0,
                    gap_y: 35.0,
                    width_diff: 15.0,
                    total: 50,
                    coin_chance: 0.5,
                    enemy_chance: 0.3,
                },
                LevelTier {
                    gap_x: 20.0,
                    gap_y: 40.0,
                    width_diff: 20.0,
                    total: 100,
                    coin_chance: 0.6,
                    enemy_chance: 0.4,
                },
                LevelTier {
                    gap_x: 30.0,
                    gap_y: 40.0,
                    width_diff: 25.0,
                    total: 120,
                    coin_chance: 0.6,
                    enemy_chance: 0.4,
                },
            ],
        }
    }
}

impl TierTable {
    /// Total platform count across all tiers.
    pub fn platform_total(&self) -> usize {
        self.tiers.iter().map(|tier| tier.total).sum()
    }

    /// Reject tables the generator cannot run over: empty tables,
    /// negative or non-finite ranges, probabilities outside [0, 1].
    pub fn validate(&self) -> Result<(), TierTableError> {
        if self.tiers.is_empty() {
            return Err(TierTableError::Empty);
        }
        for (tier, entry) in self.tiers.iter().enumerate() {
            let ranges = [
                ("gap_x", entry.gap_x),
                ("gap_y", entry.gap_y),
                ("width_diff", entry.width_diff),
            ];
            for (field, value) in ranges {
                if !value.is_finite() || value < 0.0 {
                    return Err(TierTableError::NegativeRange { tier, field });
                }
            }
            let chances = [
                ("coin_chance", entry.coin_chance),
                ("enemy_chance", entry.enemy_chance),
            ];
            for (field, value) in chances {
                if !(0.0..=1.0).contains(&value) {
                    return Err(TierTableError::ChanceOutOfRange { tier, field, value });
                }
            }
        }
        Ok(())
    }
}

/// Rejection reasons for a malformed tier table, surfaced at config load.
#[derive(Debug, Clone, PartialEq)]
pub enum TierTableError {
    Empty,
    NegativeRange { tier: usize, field: &'static str },
    ChanceOutOfRange { tier: usize, field: &'static str, value: f64 },
}

impl std::fmt::Display for TierTableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "tier table is empty"),
            Self::NegativeRange { tier, field } => {
                write!(f, "tier {tier}: {field} must be a non-negative finite range")
            },
            Self::ChanceOutOfRange { tier, field, value } => {
                write!(f, "tier {tier}: {field} = {value} is outside [0, 1]")
            },
        }
    }
}

impl std::error::Error for TierTableError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shipped_table_is_valid() {
        assert_eq!(TierTable::default().validate(), Ok(()));
    }

    #[test]
    fn shipped_table_difficulty_never_decreases() {
        let table = TierTable::default();
        for pair in table.tiers.windows(2) {
            let (easier, harder) = (&pair[0], &pair[1]);
            assert!(harder.coin_chance >= easier.coin_chance);
            assert!(harder.enemy_chance >= easier.enemy_chance);
            assert!(harder.total >= easier.total);
            assert!(harder.gap_x >= easier.gap_x);
            assert!(harder.gap_y >= easier.gap_y);
            assert!(harder.width_diff >= easier.width_diff);
        }
    }

    #[test]
    fn shipped_table_platform_total() {
        assert_eq!(TierTable::default().platform_total(), 295);
    }

    #[test]
    fn empty_table_rejected() {
        let table = TierTable { tiers: Vec::new() };
        assert_eq!(table.validate(), Err(TierTableError::Empty));
    }

    #[test]
    fn negative_gap_rejected() {
        let mut table = TierTable::default();
        table.tiers[1].gap_y = -5.0;
        assert_eq!(
            table.validate(),
            Err(TierTableError::NegativeRange {
                tier: 1,
                field: "gap_y"
            })
        );
    }

    #[test]
    fn non_finite_range_rejected() {
        let mut table = TierTable::default();
        table.tiers[0].width_diff = f32::NAN;
        assert!(matches!(
            table.validate(),
            Err(TierTableError::NegativeRange { tier: 0, .. })
        ));
    }

    #[test]
    fn chance_outside_unit_interval_rejected() {
        let mut table = TierTable::default();
        table.tiers[2].enemy_chance = 1.2;
        assert!(matches!(
            table.validate(),
            Err(TierTableError::ChanceOutOfRange {
                tier: 2,
                field: "enemy_chance",
                ..
            })
        ));

        table.tiers[2].enemy_chance = -0.1;
        assert!(table.validate().is_err());
    }

    #[test]
    fn table_parses_from_toml() {
        let table: TierTable = toml::from_str(
            r#"
            [[tiers]]
            gap_x = 5.0
            gap_y = 20.0
            width_diff = 8.0
            total = 12
            coin_chance = 0.25
            enemy_chance = 0.1
            "#,
        )
        .unwrap();
        assert_eq!(table.tiers.len(), 1);
        assert_eq!(table.tiers[0].total, 12);
        assert_eq!(table.validate(), Ok(()));
    }
}
