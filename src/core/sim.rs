use crate::core::event::{Event, EventKind};
use crate::core::observe::{self, ParticleReport, Snapshot};
use crate::core::particle::{dot, Particle, DIM};
use crate::core::table::CollisionTable;
use crate::error::{Error, Result};

/// The circular container: fixed radius, centered on the origin, immutable
/// for the run.
#[derive(Debug, Clone, Copy)]
pub struct Container {
    radius: f64,
}

impl Container {
    /// Create a container, validating the radius.
    pub fn new(radius: f64) -> Result<Self> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(Error::InvalidParam(
                "container radius must be finite and > 0".into(),
            ));
        }
        Ok(Self { radius })
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Wall length, the denominator of the 2-D pressure estimate.
    #[inline]
    pub fn circumference(&self) -> f64 {
        2.0 * std::f64::consts::PI * self.radius
    }
}

/// Event-driven simulation of hard elastic discs in a circular container.
///
/// The engine owns the disc population and the collision-time table and
/// replays contacts strictly in time order: pick the earliest table entry,
/// drift every disc exactly to that instant, resolve the contact's physics,
/// then repair only the table rows belonging to the one or two discs whose
/// velocities changed. Aggregate observables are refreshed after every
/// event. With a fixed initial configuration the replay is exactly
/// reproducible; there is no hidden randomness here.
#[derive(Debug)]
pub struct Simulation {
    container: Container,
    particles: Vec<Particle>,
    table: CollisionTable,
    time_now: f64,
    /// Cumulative |Δp| delivered to the wall, the numerator of the pressure
    /// estimate.
    wall_impulse: f64,
    ball_collisions: u64,
    wall_collisions: u64,
    kinetic_energy: f64,
    rms_speed: f64,
    pressure: f64,
}

impl Simulation {
    /// Build a simulation from an initial configuration.
    ///
    /// The configuration is trusted: positions must lie inside the container
    /// and be pairwise non-overlapping, or the predicted collision times are
    /// meaningless. Supplying them is the state collaborator's job
    /// ([`crate::state`]).
    pub fn new(container: Container, particles: Vec<Particle>) -> Result<Self> {
        if particles.is_empty() {
            return Err(Error::InvalidParam("particle set must not be empty".into()));
        }
        let mut table = CollisionTable::new(particles.len());
        table.rebuild_all(&particles, container.radius());

        let mut sim = Self {
            container,
            particles,
            table,
            time_now: 0.0,
            wall_impulse: 0.0,
            ball_collisions: 0,
            wall_collisions: 0,
            kinetic_energy: 0.0,
            rms_speed: 0.0,
            pressure: 0.0,
        };
        sim.update_state(0.0);
        Ok(sim)
    }

    /// Current simulation time.
    #[inline]
    pub fn time(&self) -> f64 {
        self.time_now
    }

    /// Number of discs.
    #[inline]
    pub fn num_particles(&self) -> usize {
        self.particles.len()
    }

    /// Read-only view of the disc population.
    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[inline]
    pub fn container(&self) -> Container {
        self.container
    }

    /// Total kinetic energy at the last event boundary.
    #[inline]
    pub fn kinetic_energy(&self) -> f64 {
        self.kinetic_energy
    }

    /// RMS speed at the last event boundary.
    #[inline]
    pub fn rms_speed(&self) -> f64 {
        self.rms_speed
    }

    /// Pressure estimate at the last event boundary.
    #[inline]
    pub fn pressure(&self) -> f64 {
        self.pressure
    }

    /// Cumulative |Δp| delivered to the wall so far.
    #[inline]
    pub fn wall_impulse(&self) -> f64 {
        self.wall_impulse
    }

    /// Total realized disc-disc collisions.
    #[inline]
    pub fn ball_collisions(&self) -> u64 {
        self.ball_collisions
    }

    /// Total realized disc-wall collisions.
    #[inline]
    pub fn wall_collisions(&self) -> u64 {
        self.wall_collisions
    }

    /// Aggregate observables at the last event boundary.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            time: self.time_now,
            kinetic_energy: self.kinetic_energy,
            rms_speed: self.rms_speed,
            pressure: self.pressure,
            ball_collisions: self.ball_collisions,
            wall_collisions: self.wall_collisions,
        }
    }

    /// Per-disc checkpoint rows. Expensive relative to [`Self::snapshot`];
    /// meant for the start and end of a run, not every event.
    pub fn particle_reports(&self) -> Vec<ParticleReport> {
        self.particles.iter().map(observe::report).collect()
    }

    /// Realize the next collision.
    ///
    /// Advances the clock and every disc to the event instant, resolves the
    /// contact, repairs the table rows of the participants and refreshes the
    /// aggregates. Returns the realized event.
    ///
    /// Errors with [`Error::Stalled`] when no future collision exists — all
    /// remaining trajectories are parallel and diverging, so the run cannot
    /// make progress and must terminate rather than loop.
    pub fn step(&mut self) -> Result<Event> {
        let ev = self.table.next_event()?;
        let dt = ev.time_f64();
        if !dt.is_finite() {
            return Err(Error::Stalled {
                time: self.time_now,
            });
        }

        self.table.decrement_all(dt);
        for p in &mut self.particles {
            p.advance(dt);
        }

        match ev.kind {
            EventKind::B2W { i } => self.resolve_wall(i),
            EventKind::B2B { i, j } => self.resolve_pair(i, j),
        }

        self.update_state(dt);
        Ok(ev)
    }

    /// Run a fixed number of events.
    pub fn run(&mut self, events: u64) -> Result<()> {
        for _ in 0..events {
            self.step()?;
        }
        Ok(())
    }

    // ============ Internal helpers ============

    fn resolve_wall(&mut self, i: usize) {
        let u = self.particles[i].v;
        let v = self.particles[i].velocity_after_wall_bounce();
        self.particles[i].v = v;

        let mut dv = [0.0; DIM];
        for k in 0..DIM {
            dv[k] = v[k] - u[k];
        }
        self.wall_impulse += self.particles[i].mass * dot(&dv, &dv).sqrt();

        self.particles[i].wall_collisions += 1;
        self.wall_collisions += 1;

        self.table
            .recompute_for(&[i], &self.particles, self.container.radius());
    }

    fn resolve_pair(&mut self, i: usize, j: usize) {
        let (v1, v2) = self.particles[i].velocity_after_ball_collision(&self.particles[j]);
        self.particles[i].v = v1;
        self.particles[j].v = v2;

        self.particles[i].ball_collisions += 1;
        self.particles[j].ball_collisions += 1;
        self.ball_collisions += 1;

        self.table
            .recompute_for(&[i, j], &self.particles, self.container.radius());
    }

    /// Refresh the cached aggregates. The clock advances first: the pressure
    /// quotient uses the post-event time.
    fn update_state(&mut self, dt: f64) {
        self.time_now += dt;
        self.kinetic_energy = observe::total_kinetic_energy(&self.particles);
        self.rms_speed = observe::rms_speed(&self.particles);
        self.pressure = observe::pressure(
            self.wall_impulse,
            self.container.circumference(),
            self.time_now,
        );
    }
}
