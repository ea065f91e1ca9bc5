use rand::Rng;

use crate::entity::{COIN_SIZE, ENEMY_SIZE, PLATFORM_WIDTH, Coin, Enemy, Platform};
use crate::level_tiers::TierTable;

/// Anchor of the first platform.
const FIRST_PLATFORM_X: f32 = 100.0;
const FIRST_PLATFORM_Y: f32 = 200.0;
/// Leading platforms kept enemy-free so every run has a safe start.
const SAFE_START_PLATFORMS: usize = 2;

/// Entity collections produced by one generation pass.
#[derive(Debug, Clone)]
pub struct GeneratedWorld {
    pub platforms: Vec<Platform>,
    pub coins: Vec<Coin>,
    pub enemies: Vec<Enemy>,
}

/// Lay out the whole course from the tier table, then scatter coins and
/// enemies onto the platform surfaces. Runs once, before the first tick.
pub fn generate_world<R: Rng>(tiers: &TierTable, rng: &mut R) -> GeneratedWorld {
    let platforms = lay_out_platforms(tiers, rng);
    let enemies = scatter_enemies(&platforms, tiers, rng);
    let coins = scatter_coins(&platforms, tiers, rng);
    tracing::debug!(
        platforms = platforms.len(),
        coins = coins.len(),
        enemies = enemies.len(),
        "world generated"
    );
    GeneratedWorld {
        platforms,
        coins,
        enemies,
    }
}

/// Walk the tiers in order, emitting each tier's platform run. Every
/// platform starts at the previous platform's right edge plus a random
/// gap, with a vertical drift centered on the previous height, so x is
/// strictly non-overlapping by construction.
fn lay_out_platforms<R: Rng>(tiers: &TierTable, rng: &mut R) -> Vec<Platform> {
    let mut platforms = Vec::with_capacity(tiers.platform_total());
    let mut next_x = FIRST_PLATFORM_X;
    let mut next_y = FIRST_PLATFORM_Y;
    for (level, tier) in tiers.tiers.iter().enumerate() {
        for _ in 0..tier.total {
            let width = PLATFORM_WIDTH - rng.random::<f32>() * tier.width_diff;
            let platform = Platform::new(next_x, next_y, width, level);
            next_x = platform.right_edge() + rng.random::<f32>() * tier.gap_x;
            next_y = platform.y + (rng.random::<f32>() - 0.5) * tier.gap_y;
            platforms.push(platform);
        }
    }
    platforms
}

/// One enemy per lucky platform, resting on the surface with its position
/// at the platform's horizontal midpoint. The first platforms never get
/// one.
fn scatter_enemies<R: Rng>(platforms: &[Platform], tiers: &TierTable, rng: &mut R) -> Vec<Enemy> {
    let mut enemies = Vec::new();
    for platform in platforms.iter().skip(SAFE_START_PLATFORMS) {
        let chance = tiers.tiers[platform.level].enemy_chance;
        if rng.random::<f64>() < chance {
            enemies.push(Enemy::new(
                platform.x + platform.width / 2.0,
                platform.y - ENEMY_SIZE,
            ));
        }
    }
    enemies
}

/// One coin per lucky platform, at a random x within the platform's span,
/// resting on the surface.
fn scatter_coins<R: Rng>(platforms: &[Platform], tiers: &TierTable, rng: &mut R) -> Vec<Coin> {
    let mut coins = Vec::new();
    for platform in platforms {
        let chance = tiers.tiers[platform.level].coin_chance;
        if rng.random::<f64>() < chance {
            let x = platform.x + rng.random::<f32>() * platform.width;
            coins.push(Coin::new(x, platform.y - COIN_SIZE));
        }
    }
    coins
}
