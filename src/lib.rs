//! Event-driven simulation of a closed two-dimensional gas of hard elastic
//! discs in a circular container.
//!
//! The engine advances collision-by-collision instead of on a fixed
//! timestep. A pairwise table of predicted collision times — one wall entry
//! per disc, one cell per unordered disc pair — selects the next geometric
//! contact; every disc drifts exactly to that instant; the contact's
//! elastic physics is resolved; and only the table rows of the one or two
//! participants are recomputed. Macroscopic observables (total kinetic
//! energy, RMS speed, pressure from the accumulated wall impulse) are
//! derived from the microscopic state after every event.
//!
//! ```
//! use snooker::core::{Container, Simulation};
//! use snooker::state;
//!
//! # fn main() -> snooker::error::Result<()> {
//! let container = Container::new(10.0)?;
//! let discs = state::generate(10.0, 8, 0.5, 1.0, 3.0, Some(42))?;
//! let mut sim = Simulation::new(container, discs)?;
//! sim.run(100)?;
//! assert!(sim.snapshot().kinetic_energy > 0.0);
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod error;
pub mod output;
pub mod state;

pub use crate::core::{Container, Event, EventKind, Particle, Simulation};
pub use crate::error::{Error, Result};
