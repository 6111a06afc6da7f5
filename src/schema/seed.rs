//! Seed types for initializing Game of Life grids.

use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::compute::{Grid, GridError};

/// Patterns applied in order onto a dead grid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Seed {
    #[serde(default)]
    pub patterns: Vec<Pattern>,
}

/// A single seeding instruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Pattern {
    /// Explicit (row, col) coordinates to mark alive.
    Cells { cells: Vec<(usize, usize)> },
    /// A named pattern placed with its top-left corner at `origin`.
    Preset {
        preset: Preset,
        #[serde(default)]
        origin: (usize, usize),
    },
    /// Uniform random fill, deterministic for a given seed.
    Random {
        /// Probability of each cell being alive (0.0-1.0).
        density: f64,
        seed: u64,
    },
}

/// Well-known Game of Life patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    GliderGun,
    Glider,
    Blinker,
    Block,
    Beacon,
    Toad,
    Pulsar,
    RPentomino,
}

// Gosper glider gun, laid out for the top-left corner of the grid.
#[rustfmt::skip]
const GLIDER_GUN: &[(usize, usize)] = &[
    (5, 1), (5, 2), (6, 1), (6, 2),
    (3, 13), (3, 14), (4, 12), (4, 16), (5, 11), (5, 17), (6, 11), (6, 15),
    (6, 17), (6, 18), (7, 17), (7, 11), (8, 12), (8, 16), (9, 13), (9, 14),
    (1, 25), (2, 23), (2, 25), (3, 21), (3, 22), (4, 21), (4, 22), (5, 21),
    (5, 22), (6, 23), (6, 25), (7, 25),
    (3, 35), (3, 36), (4, 35), (4, 36),
];

const GLIDER: &[(usize, usize)] = &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)];

const BLINKER: &[(usize, usize)] = &[(0, 0), (0, 1), (0, 2)];

const BLOCK: &[(usize, usize)] = &[(0, 0), (0, 1), (1, 0), (1, 1)];

#[rustfmt::skip]
const BEACON: &[(usize, usize)] = &[
    (0, 0), (0, 1), (1, 0), (1, 1),
    (2, 2), (2, 3), (3, 2), (3, 3),
];

const TOAD: &[(usize, usize)] = &[(0, 1), (0, 2), (0, 3), (1, 0), (1, 1), (1, 2)];

#[rustfmt::skip]
const PULSAR: &[(usize, usize)] = &[
    // Top half
    (0, 2), (0, 3), (0, 4), (0, 8), (0, 9), (0, 10),
    (2, 0), (2, 5), (2, 7), (2, 12),
    (3, 0), (3, 5), (3, 7), (3, 12),
    (4, 0), (4, 5), (4, 7), (4, 12),
    (5, 2), (5, 3), (5, 4), (5, 8), (5, 9), (5, 10),
    // Bottom half (mirrored)
    (7, 2), (7, 3), (7, 4), (7, 8), (7, 9), (7, 10),
    (8, 0), (8, 5), (8, 7), (8, 12),
    (9, 0), (9, 5), (9, 7), (9, 12),
    (10, 0), (10, 5), (10, 7), (10, 12),
    (12, 2), (12, 3), (12, 4), (12, 8), (12, 9), (12, 10),
];

const R_PENTOMINO: &[(usize, usize)] = &[(0, 1), (0, 2), (1, 0), (1, 1), (2, 1)];

impl Preset {
    pub const ALL: [Preset; 8] = [
        Preset::GliderGun,
        Preset::Glider,
        Preset::Blinker,
        Preset::Block,
        Preset::Beacon,
        Preset::Toad,
        Preset::Pulsar,
        Preset::RPentomino,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Preset::GliderGun => "glider-gun",
            Preset::Glider => "glider",
            Preset::Blinker => "blinker",
            Preset::Block => "block",
            Preset::Beacon => "beacon",
            Preset::Toad => "toad",
            Preset::Pulsar => "pulsar",
            Preset::RPentomino => "r-pentomino",
        }
    }

    /// Alive cells relative to the pattern's top-left corner.
    pub fn cells(self) -> &'static [(usize, usize)] {
        match self {
            Preset::GliderGun => GLIDER_GUN,
            Preset::Glider => GLIDER,
            Preset::Blinker => BLINKER,
            Preset::Block => BLOCK,
            Preset::Beacon => BEACON,
            Preset::Toad => TOAD,
            Preset::Pulsar => PULSAR,
            Preset::RPentomino => R_PENTOMINO,
        }
    }

    /// Bounding box as (rows, cols).
    pub fn extent(self) -> (usize, usize) {
        self.cells()
            .iter()
            .fold((0, 0), |(rows, cols), &(r, c)| (rows.max(r + 1), cols.max(c + 1)))
    }

    /// Smallest area, measured from the placement origin, the preset needs.
    ///
    /// The glider gun wants a margin below and to the right of its bounding
    /// box so the first gliders have room to leave; every other preset only
    /// needs its extent.
    pub fn min_grid(self) -> (usize, usize) {
        match self {
            Preset::GliderGun => (12, 38),
            _ => self.extent(),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = SeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::ALL
            .into_iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| SeedError::UnknownPreset(s.to_string()))
    }
}

/// Seeding errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SeedError {
    #[error("Coordinate in \"{0}\" is too large")]
    NumberTooLarge(String),
    #[error("Unknown preset \"{0}\"")]
    UnknownPreset(String),
    #[error("Random density {0} must be within 0.0 and 1.0")]
    InvalidDensity(f64),
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Parse a starting input of the form `"<row>,<col> <row>,<col> ..."`.
///
/// Tokens are separated by single spaces. Inside a token, digits before the
/// first comma form the row and digits after it form the column; any other
/// characters are ignored, so `"(2,3)"` reads as `2,3`. Tokens missing
/// either number are skipped.
pub fn parse_starting_input(input: &str) -> Result<Vec<(usize, usize)>, SeedError> {
    let mut cells = Vec::new();

    for token in input.split(' ') {
        let mut numbers: [Option<usize>; 2] = [None, None];
        let mut idx = 0;

        for c in token.chars() {
            if let Some(digit) = c.to_digit(10) {
                let value = numbers[idx]
                    .unwrap_or(0)
                    .checked_mul(10)
                    .and_then(|n| n.checked_add(digit as usize))
                    .ok_or_else(|| SeedError::NumberTooLarge(token.to_string()))?;
                numbers[idx] = Some(value);
            } else if c == ',' {
                idx = 1;
            }
        }

        match numbers {
            [Some(row), Some(col)] => cells.push((row, col)),
            [None, None] => {}
            _ => log::warn!("Skipping incomplete coordinate {:?}", token),
        }
    }

    Ok(cells)
}

impl Seed {
    /// Seed made of explicit coordinates.
    pub fn from_cells(cells: Vec<(usize, usize)>) -> Self {
        Self {
            patterns: vec![Pattern::Cells { cells }],
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn push(&mut self, pattern: Pattern) {
        self.patterns.push(pattern);
    }

    /// Mark every seeded cell alive on `grid`. Returns the number of cells set.
    ///
    /// Coordinates outside the grid fail with [`GridError::OutOfRange`].
    pub fn apply(&self, grid: &mut Grid) -> Result<usize, SeedError> {
        let mut set = 0;

        for pattern in &self.patterns {
            match pattern {
                Pattern::Cells { cells } => {
                    for &(row, col) in cells {
                        grid.set(row, col, true)?;
                        set += 1;
                    }
                }
                Pattern::Preset { preset, origin } => {
                    for &(r, c) in preset.cells() {
                        grid.set(origin.0.saturating_add(r), origin.1.saturating_add(c), true)?;
                        set += 1;
                    }
                }
                Pattern::Random { density, seed } => {
                    if !(0.0..=1.0).contains(density) {
                        return Err(SeedError::InvalidDensity(*density));
                    }
                    let mut rng = StdRng::seed_from_u64(*seed);
                    for row in 0..grid.rows() {
                        for col in 0..grid.cols() {
                            if rng.gen_bool(*density) {
                                grid.set(row, col, true)?;
                                set += 1;
                            }
                        }
                    }
                }
            }
        }

        log::debug!("Seeded {} cells", set);
        Ok(set)
    }
}
