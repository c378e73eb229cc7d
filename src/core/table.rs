use crate::core::event::{Event, EventKind};
use crate::core::particle::Particle;
use crate::error::Result;

/// Pairwise collision-time table.
///
/// Holds the predicted time until every possible next contact, stored as a
/// countdown relative to the current simulation clock: `b2w[i]` for disc `i`
/// against the wall, and one cell per unordered disc pair in a flat
/// upper-triangular array addressed by the canonical `(min, max)` index.
/// There is no mirrored lower half to keep consistent. `f64::INFINITY` marks
/// a pair (or wall approach) with no future intersection on the current
/// trajectories.
///
/// After any operation, every cell equals the true remaining time to that
/// contact under constant-velocity motion; advancing the clock is a uniform
/// decrement, and a resolved event invalidates only the rows of its one or
/// two participants.
#[derive(Debug, Clone)]
pub struct CollisionTable {
    n: usize,
    b2w: Vec<f64>,
    b2b: Vec<f64>,
}

impl CollisionTable {
    /// An all-infinite table for `n` discs.
    pub fn new(n: usize) -> Self {
        Self {
            n,
            b2w: vec![f64::INFINITY; n],
            b2b: vec![f64::INFINITY; n * n.saturating_sub(1) / 2],
        }
    }

    /// Number of discs the table is sized for.
    #[inline]
    pub fn len(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Flat slot of the unordered pair `{i, j}`. Row `lo` holds the cells
    /// `(lo, lo+1) .. (lo, n-1)` and starts after the lengths of all
    /// previous rows.
    #[inline]
    fn pair_slot(&self, i: usize, j: usize) -> usize {
        debug_assert!(i != j && i < self.n && j < self.n);
        let (lo, hi) = if i < j { (i, j) } else { (j, i) };
        lo * (2 * self.n - lo - 1) / 2 + (hi - lo - 1)
    }

    /// Countdown until discs `i` and `j` touch.
    #[inline]
    pub fn pair_time(&self, i: usize, j: usize) -> f64 {
        self.b2b[self.pair_slot(i, j)]
    }

    /// Countdown until disc `i` touches the wall.
    #[inline]
    pub fn wall_time(&self, i: usize) -> f64 {
        self.b2w[i]
    }

    /// Recompute every cell from the current particle states. O(N²); used at
    /// initialization only.
    pub fn rebuild_all(&mut self, particles: &[Particle], container_radius: f64) {
        debug_assert_eq!(particles.len(), self.n);
        for i in 0..self.n {
            self.b2w[i] = particles[i].next_wall_collision(container_radius);
            for j in (i + 1)..self.n {
                let slot = self.pair_slot(i, j);
                self.b2b[slot] = particles[i].next_ball_collision(&particles[j]);
            }
        }
    }

    /// Advance every countdown by `dt`. Infinite cells stay infinite (IEEE
    /// `inf - finite = inf`; `dt` is finite because the engine refuses to
    /// realize a non-finite event).
    pub fn decrement_all(&mut self, dt: f64) {
        debug_assert!(dt.is_finite());
        for t in &mut self.b2w {
            *t -= dt;
        }
        for t in &mut self.b2b {
            *t -= dt;
        }
    }

    /// Refresh the cells of the discs whose trajectories just changed: the
    /// wall cell of each id and its pair cell against every other disc,
    /// written into the canonical slot. O(N) per id; all other cells remain
    /// valid under the uniform decrement alone.
    pub fn recompute_for(&mut self, ids: &[usize], particles: &[Particle], container_radius: f64) {
        for &i in ids {
            self.b2w[i] = particles[i].next_wall_collision(container_radius);
            for j in 0..self.n {
                if j == i {
                    continue;
                }
                let slot = self.pair_slot(i, j);
                self.b2b[slot] = particles[i].next_ball_collision(&particles[j]);
            }
        }
    }

    /// The earliest pending event.
    ///
    /// Scans both stores for their first minimum in row-major order. The wall
    /// candidate wins only when strictly earlier; an exact tie resolves to
    /// the disc-disc event. An all-infinite table produces an event with
    /// infinite countdown — classifying that as a stall is the engine's job.
    pub fn next_event(&self) -> Result<Event> {
        let mut wall_time = f64::INFINITY;
        let mut wall_idx = 0usize;
        for (i, &t) in self.b2w.iter().enumerate() {
            if t < wall_time {
                wall_time = t;
                wall_idx = i;
            }
        }

        let mut pair_time = f64::INFINITY;
        let mut pair = (0usize, 1usize);
        for i in 0..self.n {
            for j in (i + 1)..self.n {
                let t = self.b2b[self.pair_slot(i, j)];
                if t < pair_time {
                    pair_time = t;
                    pair = (i, j);
                }
            }
        }

        if self.n < 2 || wall_time < pair_time {
            Event::new(wall_time, EventKind::B2W { i: wall_idx })
        } else {
            Event::new(pair_time, EventKind::B2B { i: pair.0, j: pair.1 })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn disc(id: u32, r: [f64; 2], v: [f64; 2]) -> Particle {
        Particle::new(id, r, v, 0.5, 1.0).expect("valid test disc")
    }

    #[test]
    fn pair_slot_is_canonical() {
        let table = CollisionTable::new(6);
        assert_eq!(table.pair_slot(2, 5), table.pair_slot(5, 2));
        // All slots distinct and in range
        let mut seen = vec![false; 15];
        for i in 0..6 {
            for j in (i + 1)..6 {
                let s = table.pair_slot(i, j);
                assert!(!seen[s], "slot {s} assigned twice");
                seen[s] = true;
            }
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn rebuild_fills_wall_and_pair_times() -> Result<()> {
        // Disc 0 heads for the wall, discs 1 and 2 head for each other.
        let particles = vec![
            disc(0, [0.0, 0.0], [2.0, 0.0]),
            disc(1, [-4.0, 3.0], [1.0, 0.0]),
            disc(2, [4.0, 3.0], [-1.0, 0.0]),
        ];
        let mut table = CollisionTable::new(3);
        table.rebuild_all(&particles, 10.0);

        // Radius 0.5 from the origin at speed 2: (10 - 0.5) / 2.
        assert!((table.wall_time(0) - 4.75).abs() < 1e-12);
        // Gap 8 - 1 closed at relative speed 2.
        assert!((table.pair_time(1, 2) - 3.5).abs() < 1e-12);
        // Parallel movers never meet.
        assert_eq!(table.pair_time(0, 1), f64::INFINITY);
        Ok(())
    }

    #[test]
    fn decrement_saturates_infinity() {
        let mut table = CollisionTable::new(2);
        table.b2w[0] = 3.0;
        table.decrement_all(1.25);
        assert!((table.wall_time(0) - 1.75).abs() < 1e-12);
        assert_eq!(table.wall_time(1), f64::INFINITY);
        assert_eq!(table.pair_time(0, 1), f64::INFINITY);
    }

    #[test]
    fn next_event_picks_global_minimum() -> Result<()> {
        let mut table = CollisionTable::new(3);
        table.b2w[1] = 2.0;
        let slot = table.pair_slot(0, 2);
        table.b2b[slot] = 1.5;
        let ev = table.next_event()?;
        assert_eq!(ev.kind, EventKind::B2B { i: 0, j: 2 });
        assert!((ev.time_f64() - 1.5).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn exact_tie_resolves_to_ball_event() -> Result<()> {
        let mut table = CollisionTable::new(2);
        table.b2w[0] = 2.0;
        let slot = table.pair_slot(0, 1);
        table.b2b[slot] = 2.0;
        let ev = table.next_event()?;
        assert_eq!(ev.kind, EventKind::B2B { i: 0, j: 1 });
        Ok(())
    }

    #[test]
    fn strictly_earlier_wall_event_wins() -> Result<()> {
        let mut table = CollisionTable::new(2);
        table.b2w[1] = 1.0;
        let slot = table.pair_slot(0, 1);
        table.b2b[slot] = 2.0;
        let ev = table.next_event()?;
        assert_eq!(ev.kind, EventKind::B2W { i: 1 });
        Ok(())
    }

    #[test]
    fn single_disc_table_has_only_wall_events() -> Result<()> {
        let mut table = CollisionTable::new(1);
        table.b2w[0] = 0.5;
        let ev = table.next_event()?;
        assert_eq!(ev.kind, EventKind::B2W { i: 0 });
        Ok(())
    }

    #[test]
    fn all_infinite_table_yields_infinite_event() -> Result<()> {
        let table = CollisionTable::new(3);
        let ev = table.next_event()?;
        assert!(!ev.time_f64().is_finite());
        Ok(())
    }

    #[test]
    fn recompute_updates_only_requested_rows() -> Result<()> {
        let particles = vec![
            disc(0, [-4.0, 0.0], [1.0, 0.0]),
            disc(1, [4.0, 0.0], [-1.0, 0.0]),
            disc(2, [0.0, 4.0], [0.0, -1.0]),
        ];
        let mut table = CollisionTable::new(3);
        table.rebuild_all(&particles, 10.0);

        // Poison a cell not owned by disc 0 and recompute disc 0 only; the
        // poisoned cell must survive.
        let slot_12 = table.pair_slot(1, 2);
        table.b2b[slot_12] = -99.0;
        table.recompute_for(&[0], &particles, 10.0);
        assert_eq!(table.pair_time(1, 2), -99.0);
        // Disc 0's own cells were refreshed from geometry.
        assert!((table.pair_time(0, 1) - 3.5).abs() < 1e-12);
        Ok(())
    }
}
