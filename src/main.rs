use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;

use dfsmaze::{
    BacktrackPolicy, Coord, Solver,
    generators::generate_maze,
    renderer::{RenderStyle, render},
    solvers::solve_maze,
};

/// Generate a perfect maze and draw it with its solution.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Maze height in cells
    height: usize,
    /// Maze width in cells
    width: usize,
    /// Seed for a reproducible maze
    #[arg(long)]
    seed: Option<u64>,
    /// Cell carving starts from, as ROW,COL
    #[arg(long, value_parser = parse_coord)]
    start: Option<Coord>,
    /// Entrance of the solution path, as ROW,COL
    #[arg(long, value_parser = parse_coord, default_value = "0,0")]
    entrance: Coord,
    /// Exit of the solution path, as ROW,COL [default: bottom-right cell]
    #[arg(long, value_parser = parse_coord)]
    exit: Option<Coord>,
    /// Where carving resumes after a dead end: newest, oldest or middle
    #[arg(long, default_value_t = BacktrackPolicy::Newest)]
    policy: BacktrackPolicy,
    /// Path search: bfs or dfs
    #[arg(long, default_value = "bfs")]
    solver: Solver,
    /// Draw with ASCII characters only
    #[arg(long)]
    plain: bool,
    /// Draw the maze without its solution
    #[arg(long)]
    no_solution: bool,
    /// Also print the solution as a list of ROW,COL cells
    #[arg(long)]
    print_path: bool,
    /// Log level: trace, debug, info, warn or error
    #[arg(long, default_value_t = tracing::Level::WARN)]
    log_level: tracing::Level,
    /// Append logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn parse_coord(s: &str) -> Result<Coord, String> {
    let (row, col) = s
        .split_once(',')
        .ok_or_else(|| format!("expected ROW,COL, got '{s}'"))?;
    let row = row
        .trim()
        .parse::<usize>()
        .map_err(|e| format!("invalid row '{row}': {e}"))?;
    let col = col
        .trim()
        .parse::<usize>()
        .map_err(|e| format!("invalid column '{col}': {e}"))?;
    Ok((row, col))
}

/// Installs the fmt subscriber. Logs are flushed when the returned guard is dropped.
fn init_logging(level: tracing::Level, log_file: Option<&Path>) -> anyhow::Result<WorkerGuard> {
    let (writer, guard) = match log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open log file {}", path.display()))?;
            tracing_appender::non_blocking(file)
        }
        None => tracing_appender::non_blocking(std::io::stderr()),
    };
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_max_level(level)
        .with_ansi(log_file.is_none())
        .init();
    Ok(guard)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = init_logging(cli.log_level, cli.log_file.as_deref())?;

    tracing::info!(
        "[main] generating {}x{} maze (seed {:?}, {} policy)",
        cli.height,
        cli.width,
        cli.seed,
        cli.policy
    );
    let maze = generate_maze(cli.height, cli.width, cli.seed, cli.start, cli.policy)
        .context("maze generation failed")?;

    let path = if cli.no_solution {
        None
    } else {
        let exit = cli
            .exit
            .unwrap_or((maze.height() - 1, maze.width() - 1));
        let path = solve_maze(&maze, cli.entrance, exit, cli.solver)
            .with_context(|| format!("cannot solve maze from {:?} to {:?}", cli.entrance, exit))?;
        tracing::info!("[main] solution has {} cells", path.len());
        Some(path)
    };

    let style = if cli.plain {
        RenderStyle::Plain
    } else {
        RenderStyle::Color
    };
    print!("{}", render(&maze, path.as_deref(), style));

    if let Some(path) = path.filter(|_| cli.print_path) {
        let cells = path
            .iter()
            .map(|(row, col)| format!("{row},{col}"))
            .collect::<Vec<_>>();
        println!("{}", cells.join(" -> "));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coord() {
        assert_eq!(parse_coord("3,4"), Ok((3, 4)));
        assert_eq!(parse_coord(" 0 , 12 "), Ok((0, 12)));
        assert!(parse_coord("3").is_err());
        assert!(parse_coord("-1,2").is_err());
        assert!(parse_coord("a,b").is_err());
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["dfsmaze", "4", "6"]).unwrap();
        assert_eq!((cli.height, cli.width), (4, 6));
        assert_eq!(cli.entrance, (0, 0));
        assert_eq!(cli.exit, None);
        assert_eq!(cli.policy, BacktrackPolicy::Newest);
        assert_eq!(cli.solver, Solver::Bfs);
        assert_eq!(cli.log_level, tracing::Level::WARN);
    }

    #[test]
    fn test_cli_options() {
        let cli = Cli::try_parse_from([
            "dfsmaze", "8", "8", "--seed", "42", "--exit", "7,0", "--policy", "middle",
            "--solver", "dfs", "--plain",
        ])
        .unwrap();
        assert_eq!(cli.seed, Some(42));
        assert_eq!(cli.exit, Some((7, 0)));
        assert_eq!(cli.policy, BacktrackPolicy::Middle);
        assert_eq!(cli.solver, Solver::Dfs);
        assert!(cli.plain);
        assert!(Cli::try_parse_from(["dfsmaze", "8", "8", "--start", "x"]).is_err());
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
