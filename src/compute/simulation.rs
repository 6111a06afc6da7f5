//! Simulation driver - owns the live grid and paces generation advancement.
//!
//! Two run modes are supported:
//!
//! - **Automatic**: a [`FixedTimestep`] converts wall-clock time into due
//!   generations; every due generation is stepped and rendered.
//! - **Manual**: the current grid is rendered and the loop blocks on a
//!   [`StepInput`] for the next [`Command`].
//!
//! Both loops check a [`CancellationToken`] at the top of every iteration, so
//! an in-flight step or render always completes before the loop exits.

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use super::{FixedTimestep, Grid, GridError, step};

/// Longest single sleep of the automatic loop (~60 Hz polling), so a
/// cancellation is noticed promptly even at low generation rates.
pub const MAX_IDLE: Duration = Duration::from_micros(16_667);

/// Shared stop signal. Cloned into whatever watches for quit requests.
#[derive(Debug, Clone)]
pub struct CancellationToken {
    running: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self {
            running: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Request the simulation to stop after the current tick.
    pub fn cancel(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}

/// Receives every frame the simulation publishes.
pub trait Renderer {
    fn render(&mut self, grid: &Grid, generation: u64) -> io::Result<()>;
}

/// Discrete control signal for manual stepping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Advance exactly one generation.
    Advance,
    /// Stop the simulation without stepping.
    Quit,
}

/// Blocking source of manual-mode commands.
pub trait StepInput {
    fn next_command(&mut self) -> io::Result<Command>;
}

/// Time source for the automatic loop.
pub trait Clock {
    fn now(&self) -> Instant;
    fn sleep(&mut self, duration: Duration);
}

/// Wall clock backed by [`Instant`] and [`std::thread::sleep`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Errors that end a simulation run.
#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error("Rendering failed: {0}")]
    Render(#[source] io::Error),
    #[error("Reading step input failed: {0}")]
    Input(#[source] io::Error),
}

/// Outcome of a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Generations advanced during this run.
    pub steps: u64,
    /// Generation number of the final grid.
    pub generation: u64,
    /// Alive cells in the final grid.
    pub population: usize,
}

/// Snapshot of where a simulation currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationStats {
    pub generation: u64,
    pub population: usize,
}

/// Simulation state container: the live grid plus its generation number.
#[derive(Debug, Clone)]
pub struct Simulation {
    grid: Grid,
    generation: u64,
}

impl Simulation {
    /// Start a simulation at generation 0 from a seeded grid.
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            generation: 0,
        }
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn stats(&self) -> SimulationStats {
        SimulationStats {
            generation: self.generation,
            population: self.grid.population(),
        }
    }

    /// Replace the live grid with its successor.
    ///
    /// On failure the current generation is left untouched.
    pub fn advance(&mut self) -> Result<(), GridError> {
        self.grid = step(&self.grid)?;
        self.generation += 1;
        Ok(())
    }

    /// Advance `n` generations without rendering.
    pub fn run(&mut self, n: u64) -> Result<(), GridError> {
        for _ in 0..n {
            self.advance()?;
        }
        Ok(())
    }

    /// Consume the simulation and hand back the live grid.
    pub fn into_grid(self) -> Grid {
        self.grid
    }

    fn summary(&self, steps: u64) -> RunSummary {
        let stats = self.stats();
        RunSummary {
            steps,
            generation: stats.generation,
            population: stats.population,
        }
    }

    fn publish<R: Renderer>(&self, renderer: &mut R) -> Result<(), SimulationError> {
        renderer
            .render(&self.grid, self.generation)
            .map_err(SimulationError::Render)
    }

    /// Step on a fixed timestep until `token` is cancelled.
    ///
    /// The seeded grid is rendered once before the first step; after that
    /// every due generation is stepped and rendered. Between ticks the loop
    /// sleeps until the next step is due, capped at [`MAX_IDLE`].
    pub fn run_automatic<C, R>(
        &mut self,
        timestep: &mut FixedTimestep,
        clock: &mut C,
        renderer: &mut R,
        token: &CancellationToken,
    ) -> Result<RunSummary, SimulationError>
    where
        C: Clock,
        R: Renderer,
    {
        log::info!(
            "Automatic run on {}x{} grid, period {:?}",
            self.grid.rows(),
            self.grid.cols(),
            timestep.period()
        );

        self.publish(renderer)?;

        let mut steps = 0u64;
        let mut last_tick = clock.now();
        while token.is_running() {
            let now = clock.now();
            let due = timestep.accumulate(now.saturating_duration_since(last_tick));
            last_tick = now;

            for _ in 0..due {
                self.advance()?;
                steps += 1;
                self.publish(renderer)?;
            }

            clock.sleep(timestep.until_next_step().min(MAX_IDLE));
        }

        let summary = self.summary(steps);
        log::info!(
            "Stopped after {} steps at generation {}",
            summary.steps,
            summary.generation
        );
        Ok(summary)
    }

    /// Step once per [`Command::Advance`] until quit or cancellation.
    ///
    /// The grid is rendered before every wait, so each advance is followed
    /// by exactly one re-render. [`Command::Quit`] cancels `token` and ends
    /// the loop without stepping.
    pub fn run_manual<I, R>(
        &mut self,
        input: &mut I,
        renderer: &mut R,
        token: &CancellationToken,
    ) -> Result<RunSummary, SimulationError>
    where
        I: StepInput,
        R: Renderer,
    {
        log::info!(
            "Manual run on {}x{} grid",
            self.grid.rows(),
            self.grid.cols()
        );

        let mut steps = 0u64;
        while token.is_running() {
            self.publish(renderer)?;

            match input.next_command().map_err(SimulationError::Input)? {
                Command::Advance => {
                    self.advance()?;
                    steps += 1;
                }
                Command::Quit => {
                    token.cancel();
                    break;
                }
            }
        }

        let summary = self.summary(steps);
        log::info!(
            "Stopped after {} steps at generation {}",
            summary.steps,
            summary.generation
        );
        Ok(summary)
    }
}
