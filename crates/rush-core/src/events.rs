use serde::{Deserialize, Serialize};

/// Outcome events raised by the world during a single simulation tick,
/// in the order the tick produces them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RunEvent {
    /// The hero's bottom edge settled onto a platform of the given tier.
    /// Re-fires every tick the hero stays grounded.
    GroundContact { level: usize },
    /// A coin was eaten; carries the score after the pickup.
    CoinCollected { score: u32 },
    /// The hero touched a patrolling enemy. Fatal.
    EnemyHit,
    /// The hero dropped below the play field. Fatal.
    FellOff,
}

impl RunEvent {
    /// Whether this event ends the run.
    pub fn is_fatal(&self) -> bool {
        matches!(self, RunEvent::EnemyHit | RunEvent::FellOff)
    }
}
