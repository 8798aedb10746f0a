use anyhow::Context;
use clap::{Parser, Subcommand};
use craftris_common::{Coord, CubeType, Transform};
use craftris_control::{Outcome, Session, SessionConfig, SessionError};
use craftris_grid::{Combos, Cube, Grid, GridElement, GridSummary};
use craftris_input::Key;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "craftris-cli", about = "CLI tool for the craftris voxel grid core")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Smallest combo that gets cleared
    #[arg(long, default_value = "3", global = true)]
    min_combo: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Play a scripted session with random key presses
    Demo {
        /// RNG seed for fragments and key presses
        #[arg(short, long, default_value = "42")]
        seed: u64,
        /// Number of key presses
        #[arg(short = 'n', long, default_value = "200")]
        steps: usize,
        /// Print the final report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Detect combos on the reference board (red cross, green split, cyan line, blue ring)
    Combos {
        /// Print the combos as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Serialize)]
struct DemoReport {
    seed: u64,
    steps: usize,
    fragments_settled: u64,
    score: u64,
    game_over: bool,
    grid: GridSummary,
}

/// Keys the demo presses. Moving down is weighted so fragments reach the pile.
const DEMO_KEYS: [Key; 12] = [
    Key::A,
    Key::D,
    Key::W,
    Key::S,
    Key::ArrowUp,
    Key::ArrowLeft,
    Key::Q,
    Key::CtrlLeft,
    Key::CtrlLeft,
    Key::CtrlLeft,
    Key::CtrlLeft,
    Key::Space,
];

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("craftris-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("cube types: {}", CubeType::ALL.len());
            println!("default min combo: {}", SessionConfig::default().min_combo_size);
        }
        Commands::Demo { seed, steps, json } => {
            let config = SessionConfig {
                seed,
                min_combo_size: cli.min_combo,
                ..SessionConfig::default()
            };
            let mut session = Session::new(config).context("failed to start session")?;
            let mut keys = StdRng::seed_from_u64(seed.wrapping_add(1));

            for step in 0..steps {
                let key = DEMO_KEYS[keys.gen_range(0..DEMO_KEYS.len())];
                match session.press(key) {
                    Err(SessionError::GameOver { at }) => {
                        tracing::info!(step, cells = at.len(), "spawn blocked, game over");
                        break;
                    }
                    Err(e) => return Err(e.into()),
                    Ok(Outcome::Settled { placed, cleared }) => {
                        let cleared_cubes: usize = cleared.iter().map(|c| c.len()).sum();
                        tracing::info!(
                            step,
                            placed = placed.len(),
                            combos = cleared.len(),
                            cleared = cleared_cubes,
                            "fragment settled"
                        );
                    }
                    Ok(Outcome::Blocked { at }) => {
                        tracing::debug!(step, ?key, cells = at.len(), "blocked");
                    }
                    Ok(_) => {}
                }
            }

            let report = DemoReport {
                seed,
                steps,
                fragments_settled: session.fragments_settled(),
                score: session.score(),
                game_over: session.is_over(),
                grid: session.grid().summary(),
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!(
                    "Demo: seed={} steps={} settled={} score={} game_over={}",
                    report.seed,
                    report.steps,
                    report.fragments_settled,
                    report.score,
                    report.game_over
                );
                println!("{}", report.grid);
            }
        }
        Commands::Combos { json } => {
            let (grid, seeds) = reference_board()?;
            let combos = Combos::detect(&grid, seeds);
            if json {
                println!("{}", serde_json::to_string_pretty(&combos)?);
            } else {
                println!("{}", grid.summary());
                for combo in combos.found() {
                    let cells: Vec<String> = combo.coords().map(|c| c.to_string()).collect();
                    let marker = if combo.len() >= cli.min_combo { "*" } else { " " };
                    println!(
                        "{marker} {:<8} x{:<2} {}",
                        combo.kind.name(),
                        combo.len(),
                        cells.join(" ")
                    );
                }
            }
        }
    }

    Ok(())
}

/// Reference combo board; seeds are the second cell of each group.
fn reference_board() -> anyhow::Result<(Grid, Vec<Coord>)> {
    let setup: [(CubeType, &[[i32; 3]]); 4] = [
        (
            CubeType::Red,
            &[[0, 0, 0], [0, 1, 0], [0, -1, 0], [0, 0, -1], [-1, 0, 0]],
        ),
        (
            CubeType::Green,
            &[[-5, 0, 0], [-5, 0, 1], [-5, 1, 2], [-5, -1, 2], [-5, 0, 2]],
        ),
        (
            CubeType::Cyan,
            &[
                [3, 0, 0],
                [3, 0, 1],
                [3, 0, 2],
                [3, 0, 3],
                [3, 0, 4],
                [3, 0, 5],
                [3, 0, 6],
                [3, 0, -1],
                [3, 0, -2],
            ],
        ),
        (
            CubeType::Blue,
            &[
                [0, 3, 0],
                [0, 3, 1],
                [0, 3, 2],
                [1, 3, 2],
                [2, 3, 2],
                [2, 3, 1],
                [2, 3, 0],
                [1, 3, 0],
            ],
        ),
    ];

    let mut grid = Grid::new();
    let mut seeds = Vec::new();
    for (kind, positions) in setup {
        for p in positions {
            let coord = Coord::from(*p);
            let cube = Cube::new(kind, Transform::from_position(coord.to_world()));
            grid.push(coord, GridElement::new(cube))
                .with_context(|| format!("building reference board at {coord}"))?;
        }
        seeds.push(Coord::from(positions[1]));
    }
    Ok((grid, seeds))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["craftris-cli", "demo", "-v", "--min-combo", "4"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.min_combo, 4);
        assert!(matches!(cli.command, Commands::Demo { .. }));

        let cli = Cli::try_parse_from(["craftris-cli", "--verbose", "combos"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.min_combo, 3);
    }
}
