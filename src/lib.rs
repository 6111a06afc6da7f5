//! Conway's Game of Life on a bounded grid.
//!
//! The grid is a finite plane: cells on the edges simply have fewer
//! neighbours, nothing wraps around. Generations are computed by building a
//! brand-new grid from the previous one, and a simulation loop paces them
//! either on a fixed timestep or one key press at a time.
//!
//! # Architecture
//!
//! - `compute`: the engine (grid, transition rule, timestep, simulation loop)
//! - `schema`: configuration and seeding types
//! - `render`: terminal rendering and keyboard input
//! - `error`: top-level error type and exit codes
//!
//! # Example
//!
//! ```rust
//! use conway_life::{
//!     compute::{Grid, Simulation},
//!     schema::{Pattern, Preset, Seed},
//! };
//!
//! let mut grid = Grid::new(8, 8).unwrap();
//! let seed = Seed {
//!     patterns: vec![Pattern::Preset {
//!         preset: Preset::Blinker,
//!         origin: (3, 2),
//!     }],
//! };
//! seed.apply(&mut grid).unwrap();
//!
//! let mut simulation = Simulation::new(grid);
//! simulation.run(2).unwrap();
//!
//! // A blinker has period 2.
//! assert!(simulation.grid().get(3, 2).unwrap());
//! assert_eq!(simulation.grid().population(), 3);
//! ```

pub mod compute;
pub mod error;
pub mod render;
pub mod schema;

// Re-export commonly used types
pub use compute::{CancellationToken, Grid, GridError, Simulation, step};
pub use error::AppError;
pub use schema::{Pattern, Preset, Seed, SimulationConfig};
