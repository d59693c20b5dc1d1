use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context};
use clap::{ArgAction, Parser};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use slider_search::{report, search, Move, PuzzleState, Strategy};

#[derive(Parser)]
#[command(
    name = "slider-search",
    about = "Solve the sliding-tile puzzle with breadth-first, depth-first or A* search"
)]
struct Cli {
    /// Search strategy: bfs, dfs or ast
    strategy: Strategy,

    /// Comma separated board in row-major order, 0 is the blank (e.g. 1,2,5,3,4,0,6,7,8)
    board: Option<PuzzleState>,

    /// Search a random solvable N x N board instead of BOARD
    #[arg(long, value_name = "N", conflicts_with = "board")]
    scramble: Option<usize>,

    /// Seed for --scramble
    #[arg(long, requires = "scramble")]
    seed: Option<u64>,

    /// Where to write the solution record
    #[arg(short, long, default_value = "output.txt")]
    output: PathBuf,

    /// Also print the solution record as JSON
    #[arg(long)]
    json: bool,

    /// Print the board after every move of the solution
    #[arg(long)]
    steps: bool,

    /// Do not print the initial board
    #[arg(long)]
    no_board: bool,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG wins
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_millis()
        .init();
}

fn initial_state(cli: &Cli) -> anyhow::Result<PuzzleState> {
    match (&cli.board, cli.scramble) {
        (Some(board), _) => Ok(board.clone()),
        (None, Some(n)) => {
            if n < 2 {
                bail!("--scramble needs a board width of at least 2, got {n}");
            }
            if n.checked_mul(n).and_then(|len| u32::try_from(len).ok()).is_none() {
                bail!("--scramble width {n} is too large");
            }
            let mut rng = match cli.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            Ok(PuzzleState::scrambled(n, &mut rng))
        }
        (None, None) => bail!("provide a BOARD or --scramble N"),
    }
}

/// Replays `path` from `root`, printing each move and the board it leaves.
fn print_steps<W: Write>(out: &mut W, root: &PuzzleState, path: &[Move]) -> anyhow::Result<()> {
    let mut board = root.clone();
    for (step, &mv) in path.iter().enumerate() {
        if !board.apply_move(mv) {
            bail!("move {} ({mv}) of the solution leaves the board", step + 1);
        }
        writeln!(out, "{mv}")?;
        report::print_board(out, &board)?;
        writeln!(out)?;
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let root = initial_state(&cli)?;
    let mut stdout = io::stdout();

    if !cli.no_board {
        println!("Initial board:");
        report::print_board(&mut stdout, &root)?;
    }

    let start_time = Instant::now();
    let solution = search(cli.strategy, root.clone());
    let end_time = Instant::now();

    match solution {
        Some(solution) => {
            println!(
                "Found a solution with {} moves ({} nodes expanded)",
                solution.cost_of_path, solution.nodes_expanded
            );

            report::write_output_file(&cli.output, &solution)
                .with_context(|| format!("failed to write {}", cli.output.display()))?;

            if cli.json {
                println!("{}", report::to_json(&solution)?);
            }

            if cli.steps {
                print_steps(&mut stdout, &root, &solution.path_to_goal)?;
            }
        }
        None => {
            info!("no output written");
            println!("No solution found: the reachable state space was exhausted");
        }
    }

    println!(
        "Program completed in {:.3} second(s)",
        (end_time - start_time).as_secs_f64()
    );
    Ok(())
}
