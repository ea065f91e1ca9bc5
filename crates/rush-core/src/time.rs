/// Nominal simulation rate, in ticks per second. The external ticker
/// drives the session at this rate; the core never schedules itself.
///
/// All velocities and accelerations in the simulation are per-tick
/// displacements, so there is no dt anywhere in the physics.
pub const TICK_RATE_HZ: f32 = 70.0;

/// Interval between ticks at the nominal rate, for external schedulers.
pub fn tick_interval() -> std::time::Duration {
    std::time::Duration::from_secs_f32(1.0 / TICK_RATE_HZ)
}
