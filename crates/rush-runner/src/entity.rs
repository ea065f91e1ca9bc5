use serde::{Deserialize, Serialize};

/// Hero extents for collision.
pub const HERO_WIDTH: f32 = 40.0;
pub const HERO_HEIGHT: f32 = 60.0;
/// Forward speed once the hero starts running.
pub const RUN_SPEED: f32 = 2.0;
/// Initial vertical velocity of a jump (negative is up).
pub const JUMP_VELOCITY: f32 = -13.0;

/// Nominal platform width before the per-tier variance is shaved off.
pub const PLATFORM_WIDTH: f32 = 100.0;
pub const PLATFORM_HEIGHT: f32 = 20.0;

pub const COIN_SIZE: f32 = 20.0;

pub const ENEMY_SIZE: f32 = 30.0;
/// Patrol speed in units per tick.
pub const ENEMY_SPEED: f32 = 0.5;
/// Maximum patrol excursion from the spawn point.
pub const ENEMY_MAX_OFFSET: f32 = 10.0;

/// Axis-aligned bounds shared by every entity kind. Positions are top-left
/// corners in screen coordinates; y grows downward.
pub trait Bounded {
    fn x(&self) -> f32;
    fn y(&self) -> f32;
    fn width(&self) -> f32;
    fn height(&self) -> f32;
}

macro_rules! impl_bounded {
    ($($ty:ty),* $(,)?) => {$(
        impl Bounded for $ty {
            fn x(&self) -> f32 {
                self.x
            }

            fn y(&self) -> f32 {
                self.y
            }

            fn width(&self) -> f32 {
                self.width
            }

            fn height(&self) -> f32 {
                self.height
            }
        }
    )*};
}

impl_bounded!(Hero, Platform, Coin, Enemy);

/// Animation cue mirrored to the external renderer. The simulation never
/// reads it back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnimationState {
    #[default]
    Idle,
    Running,
    Jumping,
}

/// The player character. Exactly one per world; a fatal collision ends the
/// run but the hero persists until world teardown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hero {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub velocity_x: f32,
    pub velocity_y: f32,
    pub is_on_ground: bool,
    pub animation: AnimationState,
}

impl Hero {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            width: HERO_WIDTH,
            height: HERO_HEIGHT,
            velocity_x: 0.0,
            velocity_y: 0.0,
            is_on_ground: false,
            animation: AnimationState::Idle,
        }
    }

    /// Start the forward roll. The `is_on_ground` flag doubles as the run
    /// latch: the first contact after spawn or a jump sets the forward
    /// velocity and the run animation, later contacts leave both untouched.
    pub fn run(&mut self) {
        if !self.is_on_ground {
            self.velocity_x = RUN_SPEED;
            self.animation = AnimationState::Running;
            self.is_on_ground = true;
        }
    }

    /// External input: jump. Only effective while grounded; sets the upward
    /// velocity and clears the ground flag.
    pub fn jump(&mut self) {
        if self.is_on_ground {
            self.velocity_y = JUMP_VELOCITY;
            self.animation = AnimationState::Jumping;
            self.is_on_ground = false;
        }
    }

    /// Apply this tick's velocity to the position.
    pub fn integrate(&mut self) {
        self.x += self.velocity_x;
        self.y += self.velocity_y;
    }
}

/// A generated platform. Position and width are fixed after generation;
/// the width already includes the per-tier variance, so it is the
/// collision width.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Index of the tier this platform was generated for.
    pub level: usize,
}

impl Platform {
    pub fn new(x: f32, y: f32, width: f32, level: usize) -> Self {
        Self {
            x,
            y,
            width,
            height: PLATFORM_HEIGHT,
            level,
        }
    }

    pub fn right_edge(&self) -> f32 {
        self.x + self.width
    }
}

/// A collectible coin, resting on a platform surface until eaten.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Coin {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            width: COIN_SIZE,
            height: COIN_SIZE,
        }
    }
}

/// A patrolling enemy, oscillating around its spawn point. Never removed
/// during a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub velocity_x: f32,
    pub direction_x: f32,
    pub speed: f32,
    /// Accumulated displacement from the spawn point.
    pub offset_x: f32,
    pub max_offset: f32,
}

impl Enemy {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            width: ENEMY_SIZE,
            height: ENEMY_SIZE,
            velocity_x: 0.0,
            direction_x: -1.0,
            speed: ENEMY_SPEED,
            offset_x: 0.0,
            max_offset: ENEMY_MAX_OFFSET,
        }
    }

    /// Advance one patrol step: constant speed, direction flipping once the
    /// excursion passes `max_offset`. Independent of gravity and collision.
    pub fn patrol(&mut self) {
        self.velocity_x = self.speed * self.direction_x;
        self.offset_x += self.velocity_x;
        if self.offset_x.abs() > self.max_offset {
            self.direction_x = -self.direction_x;
        }
        self.x += self.velocity_x;
    }
}
