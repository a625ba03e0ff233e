#![warn(clippy::pedantic)]

mod config;
mod display;

use std::{
    path::PathBuf,
    thread,
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use cfop::{CannedSolver, CfopPlan, Planner, Solver, TwophaseProcess, to_facelets};
use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::eyre;
use cube_core::{CubeState, Move, format_moves, invert_moves, parse_moves, random_scramble};
use env_logger::TimestampPrecision;
use log::{LevelFilter, info};
use owo_colors::OwoColorize;
use playback::{Player, SystemClock, Timeline};

use crate::{
    config::Config,
    display::{ConsoleEvents, LoggingFrame, print_plan},
};

const FRAME: Duration = Duration::from_millis(16);

/// Scrambles, solves and replays a 3x3x3 cube stage by stage
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Configuration file in TOML format
    #[arg(long, short = 'c', value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a seeded random scramble
    Scramble {
        /// Number of moves; defaults to the configured length
        #[arg(long, short = 'n')]
        length: Option<usize>,
        /// Defaults to the current time
        #[arg(long, short)]
        seed: Option<u64>,
    },
    /// Print the facelet string of the cube after a move sequence
    Facelets {
        /// The moves to apply to a solved cube, e.g. "R U' F2"
        moves: String,
    },
    /// Solve a cube and print the CFOP breakdown
    Solve(CubeArgs),
    /// Solve a cube and play the solution back in real time
    Play(CubeArgs),
    /// Run the move algebra and planner self checks
    SelfCheck,
}

#[derive(Args)]
struct CubeArgs {
    /// Moves that scramble the cube, e.g. "R U' F2"; takes precedence over --seed
    #[arg(long)]
    scramble: Option<String>,
    /// Seed of a random scramble of the configured length
    #[arg(long, short)]
    seed: Option<u64>,
    /// Answer with the inverted scramble instead of asking rob-twophase
    #[arg(long)]
    inverse: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(match cli.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .format_timestamp(Some(TimestampPrecision::Millis))
        .init();

    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Scramble { length, seed } => {
            let seed = seed.unwrap_or_else(time_seed);
            let scramble = random_scramble(length.unwrap_or(config.scramble.length), seed);
            println!("{} {}", "Seed:".bold(), seed);
            println!("{}", format_moves(&scramble.moves));
            println!("{}", to_facelets(&scramble.state));
        }
        Commands::Facelets { moves } => {
            let moves = parse_basic_moves(&moves)?;
            println!("{}", to_facelets(&CubeState::solved().apply_moves(&moves)));
        }
        Commands::Solve(args) => {
            let (scramble, plan) = plan(&args, &config)?;
            println!("{} {}", "Scramble:".bold(), format_moves(&scramble));
            print_plan(&plan);
        }
        Commands::Play(args) => {
            let (scramble, plan) = plan(&args, &config)?;
            play(&config, &scramble, &plan);
        }
        Commands::SelfCheck => {
            let report = cfop::self_check::run_self_checks();
            for check in &report.checks {
                if check.passed {
                    println!("{} {}", "pass".green(), check.name);
                } else {
                    println!("{} {}", "FAIL".red().bold(), check.name);
                }
            }

            let failed = report.failures().count();
            if failed > 0 {
                return Err(eyre!("{failed} self checks failed"));
            }
        }
    }

    Ok(())
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs() ^ u64::from(d.subsec_nanos()))
}

fn parse_basic_moves(text: &str) -> color_eyre::Result<Vec<Move>> {
    Ok(parse_moves(text)
        .map(str::parse)
        .collect::<Result<Vec<Move>, _>>()?)
}

fn scramble_moves(args: &CubeArgs, config: &Config) -> color_eyre::Result<Vec<Move>> {
    if let Some(text) = &args.scramble {
        return parse_basic_moves(text);
    }

    let seed = args.seed.unwrap_or_else(time_seed);
    info!("Scrambling with seed {seed}");
    Ok(random_scramble(config.scramble.length, seed).moves)
}

fn plan(args: &CubeArgs, config: &Config) -> color_eyre::Result<(Vec<Move>, CfopPlan)> {
    let scramble = scramble_moves(args, config)?;
    let state = CubeState::solved().apply_moves(&scramble);

    let plan = if args.inverse {
        let mut solver = CannedSolver::new();
        solver.learn(&state, &invert_moves(&scramble));
        plan_with(solver, &state)?
    } else {
        plan_with(TwophaseProcess::new(config.solver.clone()), &state)?
    };

    Ok((scramble, plan))
}

fn plan_with<S: Solver>(solver: S, state: &CubeState) -> color_eyre::Result<CfopPlan> {
    Ok(Planner::new(solver).plan(state)?)
}

fn play(config: &Config, scramble: &[Move], plan: &CfopPlan) {
    let start = CubeState::solved();

    let mut player = Player::new(
        start.clone(),
        SystemClock::default(),
        LoggingFrame::default(),
        ConsoleEvents::new("Scramble", scramble.len()),
        config.playback.clone(),
    );
    player.play_moves(scramble);
    run(&mut player);

    let scrambled = player.cube().clone();
    let mut player = Player::new(
        scrambled.clone(),
        SystemClock::default(),
        LoggingFrame::default(),
        ConsoleEvents::new("Solve", plan.step_count()),
        config.playback.clone(),
    );
    player.load(Timeline::from_plan(scrambled, plan));
    run(&mut player);

    if player.cube().is_solved() {
        println!("{}", "Solved".green().bold());
    } else {
        println!("{}", "The solution did not solve the cube".red());
    }
}

fn run(player: &mut Player<SystemClock, LoggingFrame, ConsoleEvents>) {
    while !player.is_finished() {
        player.tick();
        thread::sleep(FRAME);
    }
}
