use serde::{Deserialize, Serialize};

use crate::entity::{Bounded, Hero, Platform};
use crate::level_tiers::{TierTable, TierTableError};

/// Downward acceleration applied to the hero every tick.
pub const GRAVITY: f32 = 1.0;
/// Maximum downward speed; falling never gets faster than this.
pub const TERMINAL_VELOCITY: f32 = 5.0;
/// Descent speed pinned when the hero would otherwise pass through a
/// platform on the next integration. A fixed value, not a penetration
/// solve; the exact landing feel depends on it.
pub const LANDING_VELOCITY: f32 = 1.0;
/// Default visible play-field height; dropping past it ends the run.
pub const FIELD_HEIGHT: f32 = 600.0;

/// Runner configuration, loadable from TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Rate the external ticker is expected to drive the session at.
    pub tick_rate_hz: f32,
    /// Play-field height used for the fall-off check.
    pub field_height: f32,
    /// Fixed generation seed; `None` draws one from OS entropy.
    pub seed: Option<u64>,
    #[serde(flatten)]
    pub tiers: TierTable,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            tick_rate_hz: rush_core::time::TICK_RATE_HZ,
            field_height: FIELD_HEIGHT,
            seed: None,
            tiers: TierTable::default(),
        }
    }
}

impl RunnerConfig {
    /// Load config from a TOML file. A missing or unparseable file falls
    /// back to defaults; a tier table the generator cannot run over is
    /// rejected.
    pub fn load() -> Result<Self, TierTableError> {
        let path =
            std::env::var("RUSH_CONFIG").unwrap_or_else(|_| "config/rush.toml".to_string());
        let config = match std::fs::read_to_string(&path) {
            Ok(content) => match toml::from_str::<RunnerConfig>(&content) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("Failed to parse {path}: {e}, using defaults");
                    RunnerConfig::default()
                },
            },
            Err(_) => RunnerConfig::default(),
        };
        config.tiers.validate()?;
        Ok(config)
    }
}

/// Gravity and ground-contact pass for one tick. Accelerates the hero
/// downward (clamped at terminal), pins the velocity when the next
/// integration would tunnel through a platform, and settles onto the first
/// platform currently under the hero's feet. Returns the contacted
/// platform's tier when the hero settles this tick.
pub fn apply_gravity(hero: &mut Hero, platforms: &[Platform]) -> Option<usize> {
    hero.velocity_y = (hero.velocity_y + GRAVITY).min(TERMINAL_VELOCITY);

    if will_be_on_ground(hero, platforms) {
        hero.velocity_y = LANDING_VELOCITY;
    }

    if let Some(platform) = platform_under(hero, platforms)
        && hero.velocity_y > 0.0
    {
        let level = platform.level;
        hero.velocity_y = 0.0;
        hero.run();
        return Some(level);
    }
    None
}

/// Whether the hero's bottom edge lands inside some platform's vertical
/// band on the next integration.
pub fn will_be_on_ground(hero: &Hero, platforms: &[Platform]) -> bool {
    let next_bottom = hero.y + hero.height + hero.velocity_y;
    platforms
        .iter()
        .any(|platform| within_column(hero, platform) && within_band(next_bottom, platform))
}

/// First platform in storage order whose vertical band contains the hero's
/// bottom edge right now. Layout guarantees at most one plausible match,
/// but the ordering is part of the contract.
pub fn platform_under<'a>(hero: &Hero, platforms: &'a [Platform]) -> Option<&'a Platform> {
    let bottom = hero.y + hero.height;
    platforms
        .iter()
        .find(|platform| within_column(hero, platform) && within_band(bottom, platform))
}

fn within_column(hero: &Hero, platform: &Platform) -> bool {
    hero.x >= platform.x && hero.x < platform.right_edge()
}

fn within_band(bottom: f32, platform: &Platform) -> bool {
    bottom >= platform.y && bottom <= platform.y + platform.height
}

/// Overlap test used for enemy and coin contact: the stored positions must
/// be closer than half the summed extents on both axes. This is a distance
/// test on the position points, not an edge-intersection test, and it can
/// report a hit for unequal boxes whose edges never meet.
pub fn overlaps(a: &impl Bounded, b: &impl Bounded) -> bool {
    (a.x() - b.x()).abs() * 2.0 < a.width() + b.width()
        && (a.y() - b.y()).abs() * 2.0 < a.height() + b.height()
}

/// Index of the first object the hero overlaps, in storage order.
pub fn first_overlap<T: Bounded>(hero: &Hero, objects: &[T]) -> Option<usize> {
    objects.iter().position(|object| overlaps(hero, object))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Coin, Enemy, RUN_SPEED};

    #[test]
    fn first_tick_applies_one_unit_of_gravity() {
        let mut hero = Hero::new(100.0, 2.0);
        let landed = apply_gravity(&mut hero, &[]);
        assert_eq!(hero.velocity_y, 1.0);
        assert_eq!(landed, None);
    }

    #[test]
    fn falling_speed_clamps_at_terminal() {
        let mut hero = Hero::new(100.0, 2.0);
        for _ in 0..10 {
            apply_gravity(&mut hero, &[]);
            hero.integrate();
            assert!(hero.velocity_y <= TERMINAL_VELOCITY);
        }
        assert_eq!(hero.velocity_y, TERMINAL_VELOCITY);
    }

    #[test]
    fn tunneling_guard_pins_descent() {
        // Bottom edge at 96, falling at terminal speed: the next
        // integration would cross into the platform band at 100..120.
        let platform = Platform::new(80.0, 100.0, 100.0, 0);
        let mut hero = Hero::new(100.0, 36.0);
        hero.velocity_y = 4.0;

        let landed = apply_gravity(&mut hero, std::slice::from_ref(&platform));
        assert_eq!(hero.velocity_y, LANDING_VELOCITY);
        assert_eq!(landed, None, "Pinning is not yet contact");
    }

    #[test]
    fn settling_zeroes_velocity_and_reports_tier() {
        // Bottom edge exactly on the platform top.
        let platform = Platform::new(80.0, 62.0, 100.0, 3);
        let mut hero = Hero::new(100.0, 2.0);

        let landed = apply_gravity(&mut hero, std::slice::from_ref(&platform));
        assert_eq!(landed, Some(3));
        assert_eq!(hero.velocity_y, 0.0);
        assert!(hero.is_on_ground);
        assert_eq!(hero.velocity_x, RUN_SPEED, "Settling must start the run");
    }

    #[test]
    fn ascending_hero_passes_through_platform_band() {
        // Jumping up through a platform must not snap the hero onto it.
        let platform = Platform::new(80.0, 62.0, 100.0, 0);
        let mut hero = Hero::new(100.0, 2.0);
        hero.velocity_y = -13.0;

        let landed = apply_gravity(&mut hero, std::slice::from_ref(&platform));
        assert_eq!(landed, None);
        assert_eq!(hero.velocity_y, -12.0);
    }

    #[test]
    fn column_bounds_are_left_inclusive_right_exclusive() {
        let platform = Platform::new(100.0, 62.0, 50.0, 0);

        let mut on_left_edge = Hero::new(100.0, 2.0);
        assert!(platform_under(&on_left_edge, std::slice::from_ref(&platform)).is_some());

        on_left_edge.x = 150.0; // right edge
        assert!(platform_under(&on_left_edge, std::slice::from_ref(&platform)).is_none());
    }

    #[test]
    fn band_bounds_are_inclusive_on_both_ends() {
        let platform = Platform::new(80.0, 62.0, 100.0, 0);

        let top = Hero::new(100.0, 2.0); // bottom edge 62 == platform.y
        assert!(platform_under(&top, std::slice::from_ref(&platform)).is_some());

        let bottom = Hero::new(100.0, 22.0); // bottom edge 82 == platform.y + height
        assert!(platform_under(&bottom, std::slice::from_ref(&platform)).is_some());

        let below = Hero::new(100.0, 22.5);
        assert!(platform_under(&below, std::slice::from_ref(&platform)).is_none());
    }

    #[test]
    fn contact_picks_first_platform_in_storage_order() {
        // Two platforms share the hero's column and band; storage order
        // decides, not proximity.
        let platforms = [
            Platform::new(80.0, 62.0, 100.0, 4),
            Platform::new(80.0, 50.0, 100.0, 1),
        ];
        let hero = Hero::new(100.0, 2.0); // bottom edge 62, inside both bands
        let hit = platform_under(&hero, &platforms).unwrap();
        assert_eq!(hit.level, 4);
    }

    #[test]
    fn overlap_is_strict_at_the_exact_distance_bound() {
        let hero = Hero::new(0.0, 0.0);
        // |dx|*2 == hero.width + enemy.width exactly: no hit.
        let enemy = Enemy::new(35.0, 0.0);
        assert!(!overlaps(&hero, &enemy));
    }

    #[test]
    fn overlap_uses_position_distance_not_edges() {
        // Hero spans [0, 40]; a wide coin at x=52 spans [52, 112]. The
        // edges never meet, but the position distance (104) is under the
        // summed extents when the second box is wide enough.
        let hero = Hero::new(0.0, 0.0);
        let mut coin = Coin::new(52.0, 0.0);
        coin.width = 80.0;
        coin.height = 200.0;
        assert!(overlaps(&hero, &coin));
    }

    #[test]
    fn overlap_requires_both_axes() {
        let hero = Hero::new(100.0, 100.0);
        let close_x_far_y = Coin::new(110.0, 400.0);
        assert!(!overlaps(&hero, &close_x_far_y));

        let close_both = Coin::new(110.0, 110.0);
        assert!(overlaps(&hero, &close_both));
    }

    #[test]
    fn first_overlap_respects_storage_order() {
        let hero = Hero::new(100.0, 100.0);
        let coins = [
            Coin::new(500.0, 500.0),
            Coin::new(105.0, 105.0),
            Coin::new(102.0, 102.0),
        ];
        assert_eq!(first_overlap(&hero, &coins), Some(1));
    }

    #[test]
    fn config_defaults_are_valid() {
        let config = RunnerConfig::default();
        assert_eq!(config.tick_rate_hz, 70.0);
        assert_eq!(config.field_height, FIELD_HEIGHT);
        assert_eq!(config.seed, None);
        assert!(config.tiers.validate().is_ok());
    }

    #[test]
    fn partial_config_fills_in_defaults() {
        let config: RunnerConfig = toml::from_str("field_height = 480.0").unwrap();
        assert_eq!(config.field_height, 480.0);
        assert_eq!(config.tick_rate_hz, 70.0);
        assert_eq!(config.tiers, TierTable::default());
    }

    #[test]
    fn config_with_custom_tiers_parses() {
        let config: RunnerConfig = toml::from_str(
            r#"
            seed = 42

            [[tiers]]
            gap_x = 0.0
            gap_y = 10.0
            width_diff = 0.0
            total = 4
            coin_chance = 1.0
            enemy_chance = 0.0
            "#,
        )
        .unwrap();
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.tiers.tiers.len(), 1);
        assert!(config.tiers.validate().is_ok());
    }
}
