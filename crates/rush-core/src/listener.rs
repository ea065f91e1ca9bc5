/// Collaborator notified of run outcomes (audio cues, HUD, scene
/// transitions). Methods default to no-ops so a collaborator implements
/// only the notifications it cares about.
///
/// The session owns its listener; there is no global event bus and no
/// shared singleton state.
pub trait RunListener {
    /// The hero landed on (or kept contact with) a platform of `level`.
    fn on_ground_contact(&mut self, _level: usize) {}

    /// A coin was collected; `score` is the total after the pickup.
    fn on_coin_collected(&mut self, _score: u32) {}

    /// The hero hit an enemy.
    fn on_enemy_hit(&mut self) {}

    /// The hero fell below the play field.
    fn on_fall_off(&mut self) {}

    /// The run ended. Fired exactly once per session.
    fn on_game_over(&mut self, _final_score: u32) {}
}

/// Boundary to the persisted high-score store. The core only reports the
/// final score; reading and writing storage happens on the other side.
pub trait HighScoreStore {
    fn submit(&mut self, score: u32);
}
