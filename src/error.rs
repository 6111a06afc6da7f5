//! Top-level error type and process exit codes.
//!
//! | Code | Meaning                                   |
//! |------|-------------------------------------------|
//! | 0    | Success                                   |
//! | 100  | Cell coordinate out of range              |
//! | 101  | Grid memory allocation failed             |
//! | 102  | Invalid arguments or configuration        |
//! | 104  | Reading input or writing to the terminal  |
//! | 105  | Usage or version information was printed  |

use std::io;

use crate::compute::{GridError, SimulationError};
use crate::schema::{ConfigError, SeedError};

pub const EXIT_OK: i32 = 0;
pub const EXIT_OUT_OF_RANGE: i32 = 100;
pub const EXIT_ALLOCATION: i32 = 101;
pub const EXIT_ARGUMENTS: i32 = 102;
pub const EXIT_IO: i32 = 104;
pub const EXIT_USAGE: i32 = 105;

/// Anything that ends the program with a non-zero status.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Seed(#[from] SeedError),
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    Simulation(#[from] SimulationError),
    #[error("Failed reading starting input: {0}")]
    StartingInput(#[source] io::Error),
    #[error("Terminal setup failed: {0}")]
    Terminal(#[source] io::Error),
    #[error("Failed installing signal handler: {0}")]
    Signal(#[from] ctrlc::Error),
}

impl AppError {
    /// The grid fault behind this error, if any.
    pub fn grid_error(&self) -> Option<&GridError> {
        match self {
            AppError::Grid(e)
            | AppError::Seed(SeedError::Grid(e))
            | AppError::Simulation(SimulationError::Grid(e)) => Some(e),
            _ => None,
        }
    }

    pub fn exit_code(&self) -> i32 {
        if let Some(grid_error) = self.grid_error() {
            return match grid_error {
                GridError::OutOfRange { .. } => EXIT_OUT_OF_RANGE,
                GridError::Allocation { .. } => EXIT_ALLOCATION,
                GridError::InvalidDimensions { .. } => EXIT_ARGUMENTS,
            };
        }

        match self {
            AppError::Config(_) | AppError::Seed(_) => EXIT_ARGUMENTS,
            AppError::Simulation(_)
            | AppError::StartingInput(_)
            | AppError::Terminal(_)
            | AppError::Signal(_) => EXIT_IO,
            AppError::Grid(_) => EXIT_ARGUMENTS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::Axis;

    fn out_of_range() -> GridError {
        GridError::OutOfRange {
            axis: Axis::Row,
            row: 69,
            col: 0,
            rows: 69,
            cols: 69,
        }
    }

    #[test]
    fn test_grid_faults_have_distinct_codes() {
        let range = AppError::from(out_of_range());
        let alloc = AppError::from(GridError::Allocation { rows: 1, cols: 1 });
        assert_eq!(range.exit_code(), EXIT_OUT_OF_RANGE);
        assert_eq!(alloc.exit_code(), EXIT_ALLOCATION);
        assert_ne!(range.exit_code(), alloc.exit_code());
        assert_ne!(range.exit_code(), EXIT_OK);
    }

    #[test]
    fn test_wrapped_grid_faults_keep_their_code() {
        let seeded = AppError::from(SeedError::Grid(out_of_range()));
        assert_eq!(seeded.exit_code(), EXIT_OUT_OF_RANGE);

        let stepped = AppError::from(SimulationError::Grid(GridError::Allocation {
            rows: 3,
            cols: 3,
        }));
        assert_eq!(stepped.exit_code(), EXIT_ALLOCATION);
    }

    #[test]
    fn test_other_codes() {
        let config = AppError::from(ConfigError::InvalidCatchUp);
        assert_eq!(config.exit_code(), EXIT_ARGUMENTS);

        let input = AppError::StartingInput(io::Error::new(io::ErrorKind::UnexpectedEof, "eof"));
        assert_eq!(input.exit_code(), EXIT_IO);

        let render = AppError::from(SimulationError::Render(io::Error::other("closed")));
        assert_eq!(render.exit_code(), EXIT_IO);
    }

    #[test]
    fn test_message_names_axis_and_coordinate() {
        let msg = AppError::from(out_of_range()).to_string();
        assert!(msg.contains("row coordinate is too big"), "{}", msg);
        assert!(msg.contains("row 69"), "{}", msg);
    }
}
