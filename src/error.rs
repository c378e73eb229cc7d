use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type shared by the simulation core and its I/O collaborators.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid construction or configuration parameter.
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    /// Every table entry is infinite: no future collision is geometrically
    /// possible and the run cannot make progress. Fatal, never retried.
    #[error("simulation stalled at t = {time}: no particle is on a colliding trajectory")]
    Stalled { time: f64 },

    /// A NaN showed up where a number was required.
    #[error("numerical error: {0}")]
    MathError(String),

    /// Malformed state or output file.
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// Propagated I/O errors from the file collaborators.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_is_informative() {
        let e = Error::InvalidParam("radius must be > 0".to_string());
        let msg = format!("{e}");
        assert!(msg.contains("invalid parameter"));
        assert!(msg.contains("radius"));
    }

    #[test]
    fn stalled_identifies_physical_stall() {
        let e = Error::Stalled { time: 3.25 };
        let msg = format!("{e}");
        assert!(msg.contains("stalled"));
        assert!(msg.contains("3.25"));
    }
}
