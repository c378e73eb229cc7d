//! Reporting collaborator: accumulates the per-event observable series in
//! memory and writes CSV at the end of the run. The format and timing here
//! are this module's concern alone; the core only hands over snapshots.

use std::io;

use crate::core::observe::{ParticleReport, Snapshot};
use crate::error::Result;

/// In-memory time series of aggregate snapshots, one row per event plus the
/// initial t = 0 row.
#[derive(Debug, Default)]
pub struct Recorder {
    rows: Vec<Snapshot>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one row.
    pub fn record(&mut self, snapshot: Snapshot) {
        self.rows.push(snapshot);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Snapshot] {
        &self.rows
    }

    /// Write the accumulated series as CSV, header row included.
    pub fn save<W: io::Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        for row in &self.rows {
            wtr.serialize(row)?;
        }
        wtr.flush()?;
        Ok(())
    }
}

/// Writer for the expensive per-disc checkpoint measurements, taken at the
/// start and end of a run rather than every event.
pub struct ReportWriter<W: io::Write> {
    wtr: csv::Writer<W>,
}

impl<W: io::Write> ReportWriter<W> {
    pub fn new(writer: W) -> Result<Self> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record([
            "time",
            "id",
            "speed",
            "kinetic_energy",
            "mean_free_path",
            "momentum_x",
            "momentum_y",
        ])?;
        Ok(Self { wtr })
    }

    /// Append one row per disc, stamped with the checkpoint time.
    pub fn write_checkpoint(&mut self, time: f64, reports: &[ParticleReport]) -> Result<()> {
        for r in reports {
            self.wtr.write_record(&[
                time.to_string(),
                r.id.to_string(),
                r.speed.to_string(),
                r.kinetic_energy.to_string(),
                r.mean_free_path.to_string(),
                r.momentum_x.to_string(),
                r.momentum_y.to_string(),
            ])?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.wtr.flush()?;
        Ok(())
    }
}
