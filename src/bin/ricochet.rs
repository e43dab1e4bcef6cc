use std::fs::File;
use std::io::{self, BufReader};

use anyhow::{anyhow, Result};
use lazy_static::lazy_static;

use ricochet::{render, replay, Config, Move, Puzzle, Solution, Solver, SolverMode};

lazy_static! {
    static ref JSON_OUTPUT: bool = std::env::var("RICOCHET_JSON").is_ok();
}

fn stringify_moves(moves: &[Move]) -> String {
    moves
        .iter()
        .map(|m| format!("  {m}"))
        .collect::<Vec<_>>()
        .join("\n")
}

// Usage: ricochet [board-file] [s|p]
// Without a file the board is read from stdin
fn main() -> Result<()> {
    env_logger::init();

    let mut config = Config::from_env()?;
    let args = std::env::args().skip(1).collect::<Vec<_>>();

    let puzzle = match args.first() {
        Some(path) if path != "-" => {
            let file = File::open(path).map_err(|e| anyhow!("Could not open {path}: {e}"))?;
            Puzzle::read(&mut BufReader::new(file))?
        }
        _ => Puzzle::read(&mut io::stdin().lock())?,
    };

    if let Some(mode) = args.get(1) {
        config.mode = SolverMode::try_from(mode.as_str())?;
    }

    let mut solver = Solver::new(puzzle.board.clone(), &puzzle.robots)?;
    solver.set_mode(config.mode).set_threads(config.threads);

    log::info!(
        "Initial state:\n{}",
        render::stringify(solver.board(), solver.palette(), &puzzle.robots)
    );

    let solution = solver.solve()?;

    if let Solution::Solved(moves) = &solution {
        let end = replay(solver.board(), solver.palette(), &puzzle.robots, moves)?;
        log::info!(
            "Solved state:\n{}",
            render::stringify(solver.board(), solver.palette(), &end)
        );

        if let Some(target) = solver.board().target() {
            let index = solver.palette().index_of(target.color);
            if index.map(|i| end[i]) != Some(target.point) {
                log::warn!("Solution does not end on the target");
            }
        }
    }

    if *JSON_OUTPUT {
        println!("{}", serde_json::to_string_pretty(&solution)?);
    } else {
        match &solution {
            Solution::Solved(moves) => println!(
                "{}: solution in {} moves ({} seconds):\n{}",
                solver.mode(),
                moves.len(),
                solver.time_spent(),
                stringify_moves(moves)
            ),
            Solution::AlreadySolved => println!("{}: already solved", solver.mode()),
            Solution::Unreachable => {}
        }
    }

    log::info!(
        "{} states, depth {}, {} seconds",
        solver.states_checked(),
        solver.depth(),
        solver.time_spent()
    );

    if solution == Solution::Unreachable {
        return Err(anyhow!("No solution found"));
    }

    Ok(())
}
