//! Terminal front-end: renders frames and turns key presses into commands.

mod input;
mod terminal;

pub use input::*;
pub use terminal::*;
