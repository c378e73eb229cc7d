//! Macroscopic observables derived from the microscopic disc state.
//!
//! Everything here is a pure function of the particle set and the clock
//! scalars; nothing mutates simulation state. The reporting collaborator
//! consumes [`Snapshot`] rows every event and [`ParticleReport`] rows at
//! coarse checkpoints only.

use serde::Serialize;

use crate::core::particle::Particle;

/// Aggregate observables published after every event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Snapshot {
    /// Simulation clock.
    pub time: f64,
    /// Σ ½ m |v|² over all discs.
    pub kinetic_energy: f64,
    /// sqrt(Σ |v|² / N).
    pub rms_speed: f64,
    /// Accumulated wall impulse over circumference × time.
    pub pressure: f64,
    /// Total realized disc-disc collisions.
    pub ball_collisions: u64,
    /// Total realized disc-wall collisions.
    pub wall_collisions: u64,
}

/// Per-disc observables for the expensive start/end checkpoints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParticleReport {
    pub id: u32,
    pub speed: f64,
    pub kinetic_energy: f64,
    pub mean_free_path: f64,
    pub momentum_x: f64,
    pub momentum_y: f64,
}

/// Total kinetic energy of the population.
pub fn total_kinetic_energy(particles: &[Particle]) -> f64 {
    particles.iter().map(|p| p.kinetic_energy()).sum()
}

/// Root-mean-square speed, 0 for an empty population.
pub fn rms_speed(particles: &[Particle]) -> f64 {
    if particles.is_empty() {
        return 0.0;
    }
    let sum_sq: f64 = particles.iter().map(|p| p.speed_squared()).sum();
    (sum_sq / particles.len() as f64).sqrt()
}

/// Mean pressure on the container wall: momentum delivered per unit wall
/// length per unit time. Zero until the clock has advanced.
pub fn pressure(wall_impulse: f64, circumference: f64, time: f64) -> f64 {
    if time > 0.0 {
        wall_impulse / (circumference * time)
    } else {
        0.0
    }
}

/// The per-disc checkpoint row.
pub fn report(p: &Particle) -> ParticleReport {
    let momentum = p.momentum();
    ParticleReport {
        id: p.id,
        speed: p.speed(),
        kinetic_energy: p.kinetic_energy(),
        mean_free_path: p.mean_free_path(),
        momentum_x: momentum[0],
        momentum_y: momentum[1],
    }
}
