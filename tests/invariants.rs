use snooker::core::{Container, Particle, Simulation};
use snooker::error::{Error, Result};
use snooker::state;

/// Geometric tolerance for contact checks at event boundaries.
const GEOM_EPS: f64 = 1e-9;

/// At every event boundary no disc may poke through the wall and no pair
/// may interpenetrate beyond floating-point tolerance.
#[test]
fn no_interpenetration_or_wall_escape() -> Result<()> {
    let container_radius = 10.0;
    let discs = state::generate(container_radius, 12, 0.5, 1.0, 3.0, Some(4242))?;
    let mut sim = Simulation::new(Container::new(container_radius)?, discs)?;

    for event in 0..500 {
        sim.step()?;
        let particles = sim.particles();

        for p in particles {
            let dist = (p.r[0] * p.r[0] + p.r[1] * p.r[1]).sqrt();
            assert!(
                dist + p.radius <= container_radius + GEOM_EPS,
                "disc {} outside the wall after event {}: |r| + radius = {}",
                p.id,
                event,
                dist + p.radius
            );
        }

        for i in 0..particles.len() {
            for j in (i + 1)..particles.len() {
                let dx = particles[i].r[0] - particles[j].r[0];
                let dy = particles[i].r[1] - particles[j].r[1];
                let dist = (dx * dx + dy * dy).sqrt();
                let r_sum = particles[i].radius + particles[j].radius;
                assert!(
                    dist >= r_sum - GEOM_EPS,
                    "discs {i} and {j} interpenetrate after event {event}: {dist} < {r_sum}"
                );
            }
        }
    }
    Ok(())
}

/// Distance travelled only grows, and the clock is strictly monotone across
/// events (every realized event is strictly in the future).
#[test]
fn clocks_and_odometers_are_monotone() -> Result<()> {
    let container_radius = 10.0;
    let discs = state::generate(container_radius, 8, 0.5, 1.0, 3.0, Some(99))?;
    let mut sim = Simulation::new(Container::new(container_radius)?, discs)?;

    let mut last_time = 0.0;
    let mut last_distance: Vec<f64> = sim.particles().iter().map(|p| p.distance_travelled).collect();

    for _ in 0..300 {
        sim.step()?;
        assert!(sim.time() > last_time);
        last_time = sim.time();
        for (p, last) in sim.particles().iter().zip(&mut last_distance) {
            assert!(p.distance_travelled >= *last);
            *last = p.distance_travelled;
        }
    }
    Ok(())
}

/// A lone disc with zero velocity can never collide with anything: the
/// engine must refuse to spin and surface the stall as a diagnosable error.
#[test]
fn stalled_configuration_is_a_clean_error() -> Result<()> {
    let discs = vec![Particle::new(0, [2.0, -1.0], [0.0, 0.0], 0.5, 1.0)?];
    let mut sim = Simulation::new(Container::new(10.0)?, discs)?;

    match sim.step() {
        Err(Error::Stalled { time }) => {
            assert_eq!(time, 0.0);
        }
        other => panic!("expected Error::Stalled, got {other:?}"),
    }
    Ok(())
}

/// A moving lone disc never stalls: wall bounces keep producing events
/// forever (chords across the circle).
#[test]
fn lone_moving_disc_keeps_bouncing() -> Result<()> {
    let discs = vec![Particle::new(0, [1.0, 2.0], [1.5, -0.5], 0.5, 1.0)?];
    let mut sim = Simulation::new(Container::new(10.0)?, discs)?;
    sim.run(200)?;
    assert_eq!(sim.wall_collisions(), 200);
    assert_eq!(sim.ball_collisions(), 0);
    Ok(())
}
