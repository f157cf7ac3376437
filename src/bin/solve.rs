use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, ValueEnum};
use log::{error, info};
use owo_colors::OwoColorize;

use seeker::logging;
use seeker::maze::*;
use seeker::search::*;
use seeker::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Estimate {
    Manhattan,
    Null,
}

#[derive(Debug, Parser)]
#[command(name = "seeker solve", about = "Find a path through a maze.")]
struct Opts {
    /// Layout file.
    layout: PathBuf,
    /// One of dfs, bfs, ucs or astar.
    #[arg(long, default_value_t = SearchAlgorithm::AStar)]
    algorithm: SearchAlgorithm,
    /// Heuristic for A*.
    #[arg(long, value_enum, default_value_t = Estimate::Manhattan)]
    heuristic: Estimate,
    /// Target cell as `x,y`, defaults to the first food.
    #[arg(long, conflicts_with = "all_food")]
    goal: Option<Pos>,
    /// Find a path that eats all food instead.
    #[arg(long)]
    all_food: bool,
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
    let maze = Maze::load(&opts.layout)?;
    info!("{maze:?}");

    let start = Instant::now();
    let (path, cost, expanded) = if opts.all_food {
        let problem = FoodProblem::new(&maze)?;
        let heuristic: &dyn Heuristic<FoodProblem<'_>> = match opts.heuristic {
            Estimate::Manhattan => &food_heuristic,
            Estimate::Null => &NullHeuristic,
        };
        let path = opts.algorithm.run(&problem, heuristic);
        let cost = problem.cost_of_actions(&path);
        (path, cost, None)
    } else {
        let goal = opts
            .goal
            .or_else(|| maze.food.first().copied())
            .unwrap_or(maze.start);
        let problem = PositionProblem::new(&maze, goal);
        let heuristic: &dyn Heuristic<PositionProblem<'_>> = match opts.heuristic {
            Estimate::Manhattan => &manhattan_heuristic,
            Estimate::Null => &NullHeuristic,
        };
        let path = opts.algorithm.run(&problem, heuristic);
        let cost = problem.cost_of_actions(&path);
        (path, cost, Some(problem.expanded()))
    };
    let elapsed = start.elapsed();

    println!(
        "{}: {} {:?}",
        "Path".bright_green(),
        path.len(),
        path
    );
    println!("{}: {}", "Cost".bright_green(), cost);
    if let Some(expanded) = expanded {
        println!("{}: {}", "Expanded".bright_green(), expanded);
    }
    println!(
        "{}: {} {}us",
        "Search".bright_green(),
        opts.algorithm,
        elapsed.as_micros()
    );
    Ok(())
}
