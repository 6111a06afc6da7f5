//! Compute module - the cellular-automaton engine.

mod grid;
mod rules;
mod simulation;
mod timestep;

pub use grid::*;
pub use rules::*;
pub use simulation::*;
pub use timestep::*;
