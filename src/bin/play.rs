use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use log::{error, info};
use owo_colors::OwoColorize;
use rand::prelude::*;

use seeker::agents::Agent;
use seeker::game::GameState;
use seeker::logging;
use seeker::maze::*;
use seeker::Error;

#[derive(Debug, Parser)]
#[command(name = "seeker play", about = "Play a chase against random ghosts.")]
struct Opts {
    /// Layout file.
    layout: PathBuf,
    /// Agent configuration as json.
    #[arg(long, default_value_t)]
    config: Agent,
    /// Evaluation of the tree leafs: score or chase.
    #[arg(long, default_value_t)]
    eval: ChaseEval,
    /// Maximal number of turns.
    #[arg(long, default_value = "500")]
    turns: usize,
    /// Seed of the ghost moves.
    #[arg(long, default_value = "0")]
    seed: u64,
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    logging();

    match run(Opts::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(opts: Opts) -> Result<(), Error> {
    let Opts {
        layout,
        mut config,
        eval,
        turns,
        seed,
        verbose,
    } = opts;

    let maze = Maze::load(&layout)?;
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut state = Chase::new(&maze);
    info!("{config} eval={eval} {state:?}");

    let start = Instant::now();
    let mut turn = 0;
    while turn < turns && !state.is_win() && !state.is_lose() {
        let Some(action) = config.action(&state, &eval)? else {
            break;
        };
        state = state.successor(0, &action);

        for ghost in 1..state.num_agents() {
            if state.is_win() || state.is_lose() {
                break;
            }
            if let Some(action) = state.legal_actions(ghost).choose(&mut rng) {
                state = state.successor(ghost, action);
            }
        }

        if verbose {
            println!("{turn}: {action:?} {state:?}");
        }
        turn += 1;
    }

    let outcome = if state.is_win() {
        "Win".bright_green().to_string()
    } else if state.is_lose() {
        "Loss".bright_red().to_string()
    } else {
        "Draw".bright_yellow().to_string()
    };
    println!(
        "{}: {} after {} turns, score {} {}ms",
        "Finish Game".bright_green(),
        outcome,
        turn,
        state.score(),
        start.elapsed().as_millis()
    );
    Ok(())
}
