//! Initial-configuration collaborator: parse a persisted state file, write
//! one back, or procedurally generate a non-overlapping layout.
//!
//! The state file is headerless CSV with one disc per row:
//! `x, y, vx, vy, mass, radius`. The core trusts the geometry of parsed
//! configurations (in-bounds, non-overlapping); only [`generate`] guarantees
//! it.

use std::io;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::core::particle::{dot, Particle, DIM};
use crate::error::{Error, Result};

/// Attempts to place one disc before giving up on the layout as too dense.
const MAX_PLACEMENT_ATTEMPTS: usize = 500;

/// One row of the state file.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct BallRecord {
    x: f64,
    y: f64,
    vx: f64,
    vy: f64,
    mass: f64,
    radius: f64,
}

/// Parse an initial configuration. Rows become discs in file order, with
/// ids assigned by row index. Construction validation (finite, positive
/// mass and radius) applies per row.
pub fn read_state<R: io::Read>(reader: R) -> Result<Vec<Particle>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(reader);
    let mut particles = Vec::new();
    for (i, record) in rdr.deserialize::<BallRecord>().enumerate() {
        let rec = record?;
        particles.push(Particle::new(
            i as u32,
            [rec.x, rec.y],
            [rec.vx, rec.vy],
            rec.radius,
            rec.mass,
        )?);
    }
    Ok(particles)
}

/// Write a configuration in the same headerless format [`read_state`]
/// parses, so a generated layout can be replayed later.
pub fn write_state<W: io::Write>(writer: W, particles: &[Particle]) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    for p in particles {
        wtr.serialize(BallRecord {
            x: p.r[0],
            y: p.r[1],
            vx: p.v[0],
            vy: p.v[1],
            mass: p.mass,
            radius: p.radius,
        })?;
    }
    wtr.flush()?;
    Ok(())
}

/// Procedurally generate `count` identical discs inside a container of the
/// given radius.
///
/// Positions are rejection-sampled uniformly until they are inside the wall
/// and clear of every previously placed disc; a layout too dense to place
/// within 500 tries per disc is an error. Every disc
/// gets the same speed `rms_speed` with a uniformly random x component and
/// a random sign on the remaining y component, so the population's initial
/// RMS speed equals `rms_speed` exactly. A fixed `seed` makes the layout
/// reproducible.
pub fn generate(
    container_radius: f64,
    count: usize,
    ball_radius: f64,
    mass: f64,
    rms_speed: f64,
    seed: Option<u64>,
) -> Result<Vec<Particle>> {
    if count == 0 {
        return Err(Error::InvalidParam("count must be > 0".into()));
    }
    if !container_radius.is_finite() || container_radius <= 0.0 {
        return Err(Error::InvalidParam(
            "container radius must be finite and > 0".into(),
        ));
    }
    if !ball_radius.is_finite() || ball_radius <= 0.0 || ball_radius >= container_radius {
        return Err(Error::InvalidParam(
            "ball radius must be finite, > 0 and smaller than the container".into(),
        ));
    }
    if !mass.is_finite() || mass <= 0.0 {
        return Err(Error::InvalidParam("mass must be finite and > 0".into()));
    }
    if !rms_speed.is_finite() || rms_speed <= 0.0 {
        return Err(Error::InvalidParam(
            "rms speed must be finite and > 0".into(),
        ));
    }

    let mut rng: StdRng = match seed {
        Some(s) => SeedableRng::seed_from_u64(s),
        None => SeedableRng::seed_from_u64(rand::rng().random()),
    };

    let bounds = container_radius - ball_radius;
    let mut particles: Vec<Particle> = Vec::with_capacity(count);
    for id in 0..(count as u32) {
        let mut attempts = 0usize;
        let r = loop {
            if attempts >= MAX_PLACEMENT_ATTEMPTS {
                return Err(Error::InvalidParam(format!(
                    "failed to place disc {id} without overlap; use a larger container or fewer discs"
                )));
            }
            attempts += 1;
            let candidate = [
                rng.random_range(-bounds..=bounds),
                rng.random_range(-bounds..=bounds),
            ];
            if inside_container(&candidate, ball_radius, container_radius)
                && !overlaps_existing(&particles, &candidate, ball_radius)
            {
                break candidate;
            }
        };

        let vx = rng.random_range(-rms_speed..=rms_speed);
        let vy_mag = (rms_speed * rms_speed - vx * vx).sqrt();
        let vy = if rng.random_bool(0.5) { vy_mag } else { -vy_mag };

        particles.push(Particle::new(id, r, [vx, vy], ball_radius, mass)?);
    }
    Ok(particles)
}

fn inside_container(position: &[f64; DIM], ball_radius: f64, container_radius: f64) -> bool {
    dot(position, position).sqrt() + ball_radius < container_radius
}

fn overlaps_existing(existing: &[Particle], position: &[f64; DIM], ball_radius: f64) -> bool {
    existing.iter().any(|p| {
        let mut d = [0.0; DIM];
        for k in 0..DIM {
            d[k] = p.r[k] - position[k];
        }
        dot(&d, &d).sqrt() <= p.radius + ball_radius
    })
}
