//! Conway CLI - simulate the Game of Life in the terminal.

use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use clap::error::ErrorKind;

use conway_life::{
    compute::{CancellationToken, Grid, Renderer, Simulation, SystemClock},
    error::{AppError, EXIT_ARGUMENTS, EXIT_USAGE},
    render::{
        KeyInput, TerminalRenderer, TerminalSession, prompt_starting_input, spawn_quit_watcher,
    },
    schema::{
        ColorScheme, Pattern, Preset, Seed, SimulationConfig, StepMode, parse_starting_input,
    },
};

#[derive(Parser)]
#[command(name = "conway")]
#[command(version)]
#[command(about = "Simulate Conway's Game of Life in the terminal")]
struct Cli {
    /// Number of grid rows
    #[arg(long, value_name = "N")]
    grid_rows: Option<usize>,

    /// Number of grid columns
    #[arg(long, value_name = "N")]
    grid_cols: Option<usize>,

    /// Step manually by pressing SPACE
    #[arg(long)]
    step_manually: bool,

    /// Start with Gosper's glider gun in the top left
    #[arg(long)]
    glider_gun: bool,

    /// Start with a named pattern in the middle of the grid
    /// (glider-gun, glider, blinker, block, beacon, toad, pulsar, r-pentomino)
    #[arg(long, value_name = "NAME")]
    preset: Option<Preset>,

    /// Starting cells as "<row>,<col> <row>,<col> ..."
    #[arg(long, value_name = "INPUT")]
    starting_input: Option<String>,

    /// Fill the grid randomly with the given density (0.0-1.0)
    #[arg(long, value_name = "DENSITY")]
    random: Option<f64>,

    /// Seed for --random (random if omitted)
    #[arg(long, value_name = "SEED", requires = "random")]
    random_seed: Option<u64>,

    /// Color scheme (default, hacker)
    #[arg(long, value_name = "SCHEME")]
    color_scheme: Option<ColorScheme>,

    /// Target generations per second in automatic mode
    #[arg(long, value_name = "N")]
    generations_per_second: Option<u32>,

    /// Most generations a single late frame may catch up
    #[arg(long, value_name = "N")]
    max_catch_up: Option<u32>,

    /// JSON configuration file; command line options override it
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the resulting configuration as JSON and exit
    #[arg(long)]
    print_config: bool,
}

fn main() {
    env_logger::init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = parse_exit_code(&e);
            if let Err(io_err) = e.print() {
                log::warn!("Failed to print usage: {}", io_err);
            }
            process::exit(code);
        }
    };

    if let Err(e) = run(cli) {
        eprintln!("[ERROR] {}", e);
        process::exit(e.exit_code());
    }
}

/// Exit code for a command line that did not parse into a run.
fn parse_exit_code(e: &clap::Error) -> i32 {
    match e.kind() {
        ErrorKind::DisplayHelp
        | ErrorKind::DisplayVersion
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => EXIT_USAGE,
        _ => EXIT_ARGUMENTS,
    }
}

/// Merge the optional config file with command line overrides.
fn build_config(cli: &Cli) -> Result<SimulationConfig, AppError> {
    let mut config = match &cli.config {
        Some(path) => SimulationConfig::from_json_file(path)?,
        None => SimulationConfig::default(),
    };

    if let Some(rows) = cli.grid_rows {
        config.rows = rows;
    }
    if let Some(cols) = cli.grid_cols {
        config.cols = cols;
    }
    if cli.step_manually {
        config.step_mode = StepMode::Manual;
    }
    if let Some(scheme) = cli.color_scheme {
        config.color_scheme = scheme;
    }
    if let Some(rate) = cli.generations_per_second {
        config.target_generations_per_second = rate;
    }
    if cli.max_catch_up.is_some() {
        config.max_catch_up_steps = cli.max_catch_up;
    }

    if let Some(input) = &cli.starting_input {
        let cells = parse_starting_input(input)?;
        config.seed.push(Pattern::Cells { cells });
    }
    if cli.glider_gun {
        config.seed.push(Pattern::Preset {
            preset: Preset::GliderGun,
            origin: (0, 0),
        });
    }
    if let Some(preset) = cli.preset {
        let (height, width) = preset.min_grid();
        config.seed.push(Pattern::Preset {
            preset,
            origin: (
                config.rows.saturating_sub(height) / 2,
                config.cols.saturating_sub(width) / 2,
            ),
        });
    }
    if let Some(density) = cli.random {
        let seed = cli.random_seed.unwrap_or_else(rand::random);
        log::info!("Random fill with density {} and seed {}", density, seed);
        config.seed.push(Pattern::Random { density, seed });
    }

    Ok(config)
}

fn run(cli: Cli) -> Result<(), AppError> {
    let config = build_config(&cli)?;

    if cli.print_config {
        println!("{}", config.to_json_pretty()?);
        return Ok(());
    }

    config.validate()?;

    let mut grid = Grid::new(config.rows, config.cols)?;
    config.seed.apply(&mut grid)?;

    let token = CancellationToken::new();
    {
        let token = token.clone();
        ctrlc::set_handler(move || token.cancel())?;
    }

    let mut renderer = TerminalRenderer::new(
        BufWriter::new(io::stdout()),
        config.color_scheme,
        config.step_mode,
    );

    if config.seed.is_empty() {
        renderer.render(&grid, 0).map_err(AppError::Terminal)?;
        let line = prompt_starting_input(&mut io::stdin().lock(), &mut io::stdout())
            .map_err(AppError::StartingInput)?;
        Seed::from_cells(parse_starting_input(&line)?).apply(&mut grid)?;
    }

    let mut simulation = Simulation::new(grid);
    let session = TerminalSession::enter().map_err(AppError::Terminal)?;

    let result = match config.step_mode {
        StepMode::Automatic => {
            let watcher = spawn_quit_watcher(token.clone()).map_err(AppError::Terminal)?;
            let result = simulation.run_automatic(
                &mut config.timestep(),
                &mut SystemClock,
                &mut renderer,
                &token,
            );
            token.cancel();
            if watcher.join().is_err() {
                log::warn!("Quit watcher panicked");
            }
            result
        }
        StepMode::Manual => {
            let mut input = KeyInput::new(token.clone());
            simulation.run_manual(&mut input, &mut renderer, &token)
        }
    };

    drop(session);
    let summary = result?;
    log::info!(
        "Finished at generation {} with {} alive cells",
        summary.generation,
        summary.population
    );
    Ok(())
}
