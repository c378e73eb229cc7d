use crate::error::{Error, Result};
use ordered_float::NotNan;
use std::cmp::Ordering;

/// Kinds of events the scheduler can realize.
///
/// Tie-breaking for deterministic ordering prefers `B2B` < `B2W` when times
/// are equal: a wall event is only selected when it is strictly earlier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// Collision between discs `i` and `j`, canonical order `i < j`.
    B2B { i: usize, j: usize },
    /// Collision between disc `i` and the container wall.
    B2W { i: usize },
}

impl EventKind {
    #[inline]
    fn order_key(&self) -> (u8, usize, usize) {
        match *self {
            EventKind::B2B { i, j } => (0, i, j),
            EventKind::B2W { i } => (1, i, 0),
        }
    }

    /// Indices of the discs whose trajectories the event changes.
    pub fn participants(&self) -> Vec<usize> {
        match *self {
            EventKind::B2B { i, j } => vec![i, j],
            EventKind::B2W { i } => vec![i],
        }
    }
}

/// A predicted collision, tagged with the time until it occurs.
///
/// `time` is a countdown relative to the current simulation clock, not an
/// absolute timestamp. Infinity is representable ("no such event"; the
/// engine turns it into a stall diagnostic); NaN is rejected at
/// construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    pub time: NotNan<f64>,
    pub kind: EventKind,
}

impl Event {
    /// Create a new event, validating that the time is not NaN.
    pub fn new(time: f64, kind: EventKind) -> Result<Self> {
        let time =
            NotNan::new(time).map_err(|_| Error::MathError("event time cannot be NaN".into()))?;
        Ok(Self { time, kind })
    }

    /// Returns the raw f64 countdown.
    #[inline]
    pub fn time_f64(&self) -> f64 {
        self.time.into_inner()
    }
}

impl Ord for Event {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.time.cmp(&other.time) {
            Ordering::Equal => self.kind.order_key().cmp(&other.kind.order_key()),
            o => o,
        }
    }
}

impl PartialOrd for Event {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
