use crate::error::{Error, Result};

/// Fixed spatial dimension (2D).
pub const DIM: usize = 2;

/// Positive-time floor for collision-root selection. Roots at or below this
/// are floating-point re-detections of the contact that was just resolved
/// and must not be scheduled again.
pub const TIME_FLOOR: f64 = 1e-12;

/// A hard elastic disc confined to the circular container.
///
/// Fields:
/// - `id`: stable identifier (row order of the initial configuration)
/// - `r`: position of the center of mass relative to the container center
/// - `v`: velocity
/// - `radius`: disc radius (> 0)
/// - `mass`: disc mass (> 0)
/// - `distance_travelled`: cumulative path length, for mean-free-path estimates
/// - `ball_collisions`, `wall_collisions`: realized-collision counters
#[derive(Debug, Clone)]
pub struct Particle {
    /// Stable particle identifier.
    pub id: u32,
    /// Position (x, y) relative to the container center.
    pub r: [f64; DIM],
    /// Velocity (vx, vy).
    pub v: [f64; DIM],
    /// Disc radius (> 0).
    pub radius: f64,
    /// Mass (> 0).
    pub mass: f64,
    /// Total path length travelled since the start of the run.
    pub distance_travelled: f64,
    /// Number of realized collisions with other discs.
    pub ball_collisions: u64,
    /// Number of realized collisions with the container wall.
    pub wall_collisions: u64,
}

impl Particle {
    /// Create a new particle after validating invariants.
    ///
    /// Errors:
    /// - `Error::InvalidParam` if `radius` or `mass` is non-positive or any
    ///   component is NaN/inf.
    pub fn new(id: u32, r: [f64; DIM], v: [f64; DIM], radius: f64, mass: f64) -> Result<Self> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(Error::InvalidParam("radius must be finite and > 0".into()));
        }
        if !mass.is_finite() || mass <= 0.0 {
            return Err(Error::InvalidParam("mass must be finite and > 0".into()));
        }
        if !r.iter().all(|x| x.is_finite()) {
            return Err(Error::InvalidParam("position must be finite".into()));
        }
        if !v.iter().all(|x| x.is_finite()) {
            return Err(Error::InvalidParam("velocity must be finite".into()));
        }
        Ok(Self {
            id,
            r,
            v,
            radius,
            mass,
            distance_travelled: 0.0,
            ball_collisions: 0,
            wall_collisions: 0,
        })
    }

    /// Drift along the current velocity for `dt` and accumulate the
    /// travelled distance. `dt` must be non-negative.
    pub fn advance(&mut self, dt: f64) {
        debug_assert!(dt >= 0.0);
        let mut step_sq = 0.0;
        for (r_k, &v_k) in self.r.iter_mut().zip(&self.v) {
            let dr = v_k * dt;
            *r_k += dr;
            step_sq += dr * dr;
        }
        self.distance_travelled += step_sq.sqrt();
    }

    /// |v|².
    #[inline]
    pub fn speed_squared(&self) -> f64 {
        dot(&self.v, &self.v)
    }

    /// |v|.
    #[inline]
    pub fn speed(&self) -> f64 {
        self.speed_squared().sqrt()
    }

    /// Kinetic energy: 1/2 m |v|².
    #[inline]
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.speed_squared()
    }

    /// Momentum vector m·v.
    #[inline]
    pub fn momentum(&self) -> [f64; DIM] {
        [self.v[0] * self.mass, self.v[1] * self.mass]
    }

    /// Average distance travelled between disc-disc collisions, or 0 before
    /// the first one.
    pub fn mean_free_path(&self) -> f64 {
        if self.ball_collisions > 0 {
            self.distance_travelled / self.ball_collisions as f64
        } else {
            0.0
        }
    }

    /// Time until this disc next touches the container wall, or infinity.
    ///
    /// Contact happens when `|r + v t| = R - radius`, a quadratic in `t` with
    /// `a = v·v`, `b = 2 r·v`, `c = r·r - (R - radius)²`.
    pub fn next_wall_collision(&self, container_radius: f64) -> f64 {
        let a = dot(&self.v, &self.v);
        let b = 2.0 * dot(&self.r, &self.v);
        let reach = container_radius - self.radius;
        let c = dot(&self.r, &self.r) - reach * reach;
        predict_collision_time(a, b, c)
    }

    /// Time until this disc next touches `other`, or infinity.
    ///
    /// Same quadratic as the wall case in the relative frame: contact when
    /// `|Δr + Δv t| = radius + other.radius`.
    pub fn next_ball_collision(&self, other: &Particle) -> f64 {
        let mut dr = [0.0; DIM];
        let mut dv = [0.0; DIM];
        for k in 0..DIM {
            dr[k] = self.r[k] - other.r[k];
            dv[k] = self.v[k] - other.v[k];
        }
        let a = dot(&dv, &dv);
        let b = 2.0 * dot(&dr, &dv);
        let r_sum = self.radius + other.radius;
        let c = dot(&dr, &dr) - r_sum * r_sum;
        predict_collision_time(a, b, c)
    }

    /// Rebound velocity after touching the wall: specular reflection about
    /// the radius vector through the contact point.
    pub fn velocity_after_wall_bounce(&self) -> [f64; DIM] {
        let scale = 2.0 * dot(&self.v, &self.r) / dot(&self.r, &self.r);
        let mut v = [0.0; DIM];
        for k in 0..DIM {
            v[k] = self.v[k] - self.r[k] * scale;
        }
        v
    }

    /// Rebound velocities `(v1, v2)` for an elastic collision with `other`,
    /// exchanging momentum along the line of centers. Conserves total
    /// momentum and kinetic energy for any mass ratio.
    pub fn velocity_after_ball_collision(&self, other: &Particle) -> ([f64; DIM], [f64; DIM]) {
        let mut dr = [0.0; DIM];
        let mut dv = [0.0; DIM];
        for k in 0..DIM {
            dr[k] = self.r[k] - other.r[k];
            dv[k] = self.v[k] - other.v[k];
        }
        let s = 2.0 * dot(&dr, &dv) / ((self.mass + other.mass) * dot(&dr, &dr));

        let mut v1 = [0.0; DIM];
        let mut v2 = [0.0; DIM];
        for k in 0..DIM {
            v1[k] = self.v[k] - dr[k] * other.mass * s;
            v2[k] = other.v[k] + dr[k] * self.mass * s;
        }
        (v1, v2)
    }
}

/// Smallest admissible root of `a t² + b t + c = 0`, or infinity.
///
/// Admissible means real and strictly greater than [`TIME_FLOOR`]. A zero
/// leading coefficient degenerates to the linear (or empty) case rather than
/// dividing by zero; a negative discriminant means the trajectories never
/// intersect. Never panics and never returns NaN for finite inputs.
pub fn predict_collision_time(a: f64, b: f64, c: f64) -> f64 {
    if a == 0.0 {
        if b == 0.0 {
            return f64::INFINITY;
        }
        let t = -c / b;
        return if t > TIME_FLOOR { t } else { f64::INFINITY };
    }

    let disc = b * b - 4.0 * a * c;
    if disc < 0.0 {
        return f64::INFINITY;
    }
    let sqrt_disc = disc.sqrt();

    let t1 = (-b - sqrt_disc) / (2.0 * a);
    let t2 = (-b + sqrt_disc) / (2.0 * a);
    let (lo, hi) = if t1 <= t2 { (t1, t2) } else { (t2, t1) };

    if lo > TIME_FLOOR {
        lo
    } else if hi > TIME_FLOOR {
        hi
    } else {
        f64::INFINITY
    }
}

#[inline]
pub(crate) fn dot(a: &[f64; DIM], b: &[f64; DIM]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}
