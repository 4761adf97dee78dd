//! Game balance simulator CLI.
//!
//! Run Monte Carlo simulations to analyze game balance.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                       # Default: 1000 warrior runs to floor 10
//!   cargo run --bin simulate -- -n 100 -f 5       # 100 runs to floor 5
//!   cargo run --bin simulate -- -c rogue -d hard  # Rogue on hard
//!   cargo run --bin simulate -- --seed 42         # Reproducible run

use heroes::build_info;
use heroes::config::GameConfig;
use heroes::simulator::{run_simulation, SimConfig};
use std::env;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

struct CliArgs {
    config: SimConfig,
    game_config: Option<String>,
    write_json: bool,
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    let cli = parse_args(&args);
    let config = cli.config;

    // RUST_LOG wins; otherwise warnings only, or per-run lines with -v
    let default_directive = if config.verbosity >= 2 { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_directive)),
        )
        .with_writer(std::io::stderr)
        .init();

    let game = match &cli.game_config {
        Some(path) => match GameConfig::load(path) {
            Ok(game) => game,
            Err(err) => {
                eprintln!("Failed to load game config {}: {}", path, err);
                return ExitCode::FAILURE;
            }
        },
        None => GameConfig::default(),
    };

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              PATH OF HEROES BALANCE SIMULATOR                 ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!("  {}", build_info::version_line());
    println!();
    println!("Configuration:");
    println!("  Runs:           {}", config.num_runs);
    println!("  Target Floor:   {}", config.max_floor);
    println!("  Class:          {}", config.class);
    println!("  Difficulty:     {}", config.difficulty);
    println!("  Max Rounds:     {}", config.max_rounds_per_battle);
    println!("  Auto Equip:     {}", config.auto_equip);
    if let Some(path) = &cli.game_config {
        println!("  Game Config:    {}", path);
    }
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();
    println!("Running simulation...");
    println!();

    let report = match run_simulation(Arc::new(game), &config) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("Simulation failed: {}", err);
            return ExitCode::FAILURE;
        }
    };

    println!("{}", report.to_text());

    if cli.write_json {
        let filename = format!(
            "sim_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        if let Err(err) = std::fs::write(&filename, report.to_json()) {
            eprintln!("Failed to write JSON report: {}", err);
            return ExitCode::FAILURE;
        }
        println!("JSON report saved to: {}", filename);
    }

    ExitCode::SUCCESS
}

fn parse_args(args: &[String]) -> CliArgs {
    let mut config = SimConfig::default();
    let mut game_config = None;
    let mut write_json = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--runs" => {
                if i + 1 < args.len() {
                    config.num_runs = args[i + 1].parse().unwrap_or(1000);
                    i += 1;
                }
            }
            "-f" | "--floor" => {
                if i + 1 < args.len() {
                    config.max_floor = args[i + 1].parse().unwrap_or(10);
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "-c" | "--class" => {
                if i + 1 < args.len() {
                    config.class = args[i + 1].clone();
                    i += 1;
                }
            }
            "-d" | "--difficulty" => {
                if i + 1 < args.len() {
                    config.difficulty = args[i + 1].clone();
                    i += 1;
                }
            }
            "-r" | "--rounds" => {
                if i + 1 < args.len() {
                    config.max_rounds_per_battle = args[i + 1].parse().unwrap_or(100);
                    i += 1;
                }
            }
            "--config" => {
                if i + 1 < args.len() {
                    game_config = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--no-equip" => {
                config.auto_equip = false;
            }
            "-v" | "--verbose" => {
                config.verbosity = 2;
            }
            "--json" => {
                write_json = true;
            }
            "--quick" => {
                config = SimConfig::quick_check();
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            other => {
                eprintln!("Ignoring unknown option: {}", other);
            }
        }
        i += 1;
    }

    CliArgs {
        config,
        game_config,
        write_json,
    }
}

fn print_help() {
    println!("Path of Heroes Balance Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --runs <N>        Number of simulated campaigns (default: 1000)");
    println!("    -f, --floor <F>       Floor a run must clear (default: 10)");
    println!("    -s, --seed <S>        Random seed for reproducibility");
    println!("    -c, --class <ID>      Class id (default: warrior)");
    println!("    -d, --difficulty <ID> Difficulty id (default: normal)");
    println!("    -r, --rounds <R>      Max rounds per battle (default: 100)");
    println!("    --config <PATH>       Load game content from a JSON file");
    println!("    --no-equip            Never equip dropped gear");
    println!("    -v, --verbose         Log every run to stderr");
    println!("    --json                Save JSON report");
    println!("    --quick               Quick check (100 runs to floor 5)");
    println!("    -h, --help            Show this help");
    println!();
    println!("EXAMPLES:");
    println!("    cargo run --bin simulate                       # Default run");
    println!("    cargo run --bin simulate -- -n 100 -f 5       # 100 runs to floor 5");
    println!("    cargo run --bin simulate -- -c sorceress -d hard");
    println!("    cargo run --bin simulate -- --seed 42 --json  # Reproducible, saved");
}
