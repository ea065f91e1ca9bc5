pub mod entity;
pub mod level_tiers;
pub mod physics;
pub mod scoring;
pub mod world_gen;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use rush_core::events::RunEvent;
use rush_core::listener::{HighScoreStore, RunListener};

use entity::{Coin, Enemy, Hero, Platform};
use level_tiers::TierTable;
use physics::RunnerConfig;
use scoring::ScoreCalculator;
use world_gen::{GeneratedWorld, generate_world};

/// Hero spawn position.
const HERO_START_X: f32 = 100.0;
const HERO_START_Y: f32 = 2.0;

/// All simulation state for one run: the hero, the generated entity
/// collections, the score, and the camera scroll. The renderer reads this
/// read-only; nothing about rendering feeds back in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct World {
    pub hero: Hero,
    pub platforms: Vec<Platform>,
    pub coins: Vec<Coin>,
    pub enemies: Vec<Enemy>,
    /// Tier of the platform the hero last rested on. Non-decreasing over a
    /// run: platforms are laid out in increasing x and the hero only moves
    /// forward.
    pub current_level: usize,
    pub score: ScoreCalculator,
    /// Horizontal scroll the renderer applies to keep the hero anchored
    /// while the world slides beneath it.
    pub offset_x: f32,
    /// Dropping past this y ends the run.
    pub field_height: f32,
}

impl World {
    /// Generate a fresh world from the tier table. Generation runs once
    /// here and is never re-entered during the run.
    pub fn new(tiers: &TierTable, field_height: f32, rng: &mut impl Rng) -> Self {
        let GeneratedWorld {
            platforms,
            coins,
            enemies,
        } = generate_world(tiers, rng);
        Self {
            hero: Hero::new(HERO_START_X, HERO_START_Y),
            platforms,
            coins,
            enemies,
            current_level: 0,
            score: ScoreCalculator::new(),
            offset_x: 0.0,
            field_height,
        }
    }

    /// One simulation step. The order is fixed: gravity and ground contact,
    /// enemy collision, fall-off, coin pickup, camera scroll, and finally
    /// movement integration. Returns the tick's outcome events in that
    /// order; fatal events are reported, not acted on — stopping the tick
    /// stream is the session's call.
    pub fn tick(&mut self) -> Vec<RunEvent> {
        let mut events = Vec::new();

        if let Some(level) = physics::apply_gravity(&mut self.hero, &self.platforms) {
            self.current_level = level;
            events.push(RunEvent::GroundContact { level });
        }

        if physics::first_overlap(&self.hero, &self.enemies).is_some() {
            events.push(RunEvent::EnemyHit);
        }

        if self.hero.y > self.field_height {
            events.push(RunEvent::FellOff);
        }

        if let Some(index) = physics::first_overlap(&self.hero, &self.coins) {
            self.coins.remove(index);
            self.score.increase(self.current_level);
            events.push(RunEvent::CoinCollected {
                score: self.score.total(),
            });
        }

        // Camera follows the hero: the world scrolls left beneath it.
        self.offset_x -= self.hero.velocity_x;

        // Movement lands last; every check above ran on this frame's
        // positions.
        self.hero.integrate();
        for enemy in &mut self.enemies {
            enemy.patrol();
        }

        events
    }
}

/// One play session: owns the world and the injected collaborators, and
/// turns tick events into collaborator notifications. The session latches
/// on the first fatal event — later ticks are ignored and the game-over
/// notification cannot re-fire.
pub struct Runner<L: RunListener, S: HighScoreStore> {
    world: World,
    listener: L,
    scores: S,
    game_over: bool,
}

impl<L: RunListener, S: HighScoreStore> Runner<L, S> {
    /// Build a session from config: seed the generator, lay out the world,
    /// and wire the injected collaborators.
    pub fn new(config: &RunnerConfig, listener: L, scores: S) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            world: World::new(&config.tiers, config.field_height, &mut rng),
            listener,
            scores,
            game_over: false,
        }
    }

    /// One simulation step, driven by the external ticker. A finished run
    /// ignores further ticks.
    pub fn tick(&mut self) {
        if self.game_over {
            return;
        }
        for event in self.world.tick() {
            if self.game_over {
                // The first fatal event ended the run mid-tick; whatever
                // the world produced after it goes unheard.
                break;
            }
            match event {
                RunEvent::GroundContact { level } => self.listener.on_ground_contact(level),
                RunEvent::CoinCollected { score } => self.listener.on_coin_collected(score),
                RunEvent::EnemyHit => {
                    self.listener.on_enemy_hit();
                    self.end_run();
                },
                RunEvent::FellOff => {
                    self.listener.on_fall_off();
                    self.end_run();
                },
            }
        }
    }

    /// External input: make the hero jump. Only effective while the run is
    /// live and the hero is grounded.
    pub fn jump(&mut self) {
        if !self.game_over {
            self.world.hero.jump();
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    fn end_run(&mut self) {
        if self.game_over {
            return;
        }
        self.game_over = true;
        let final_score = self.world.score.total();
        self.scores.submit(final_score);
        self.listener.on_game_over(final_score);
        tracing::info!(final_score, "run over");
    }
}
