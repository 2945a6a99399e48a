//! Game balance simulator CLI.
//!
//! Run Monte Carlo simulations of whole sessions to analyze game balance.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                                  # 200 runs to Crypt of Bones
//!   cargo run --bin simulate -- -n 100 --target "Inferno Keep"
//!   cargo run --bin simulate -- --seed 42                     # Reproducible run

use dungeon_quest::character::HeroClass;
use dungeon_quest::dungeons::get_dungeon;
use dungeon_quest::simulator::{run_simulation, SimConfig};
use std::env;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let config = parse_args(&args);

    if get_dungeon(&config.target_dungeon).is_none() {
        eprintln!("Unknown dungeon: {}", config.target_dungeon);
        std::process::exit(2);
    }

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              DUNGEON QUEST BALANCE SIMULATOR                  ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Runs:           {}", config.num_runs);
    println!("  Target Dungeon: {}", config.target_dungeon);
    println!("  Class:          {}", config.class.name());
    println!("  Auto-manage:    {}", config.auto_manage);
    println!("  Max Ticks:      {}", config.max_ticks_per_run);
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();
    println!("Running simulation...");
    println!();

    let report = run_simulation(&config);

    println!("{}", report.to_text());

    if args.iter().any(|a| a == "--json") {
        let json = report.to_json();
        let filename = format!(
            "sim_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        match std::fs::write(&filename, json) {
            Ok(()) => println!("JSON report saved to: {}", filename),
            Err(e) => eprintln!("Failed to write JSON report: {}", e),
        }
    }
}

fn parse_args(args: &[String]) -> SimConfig {
    let mut config = SimConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--runs" => {
                if i + 1 < args.len() {
                    config.num_runs = args[i + 1].parse().unwrap_or(200);
                    i += 1;
                }
            }
            "--target" => {
                if i + 1 < args.len() {
                    config.target_dungeon = args[i + 1].clone();
                    i += 1;
                }
            }
            "--class" => {
                if i + 1 < args.len() {
                    config.class = HeroClass::from_name(&args[i + 1]).unwrap_or_default();
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "-t" | "--ticks" => {
                if i + 1 < args.len() {
                    config.max_ticks_per_run = args[i + 1].parse().unwrap_or(100_000);
                    i += 1;
                }
            }
            "--manual" => {
                config.auto_manage = false;
            }
            "-v" | "--verbose" => {
                config.verbosity = 2;
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "--quick" => {
                config = SimConfig::first_dungeon_test();
            }
            "--full" => {
                config = SimConfig::full_progression_test();
            }
            _ => {}
        }
        i += 1;
    }

    config
}

fn print_help() {
    println!("Dungeon Quest Balance Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --runs <N>       Number of simulation runs (default: 200)");
    println!("    --target <DUNGEON>   Dungeon whose boss ends a run (default: Crypt of Bones)");
    println!("    --class <CLASS>      Warrior or Mage (default: Warrior)");
    println!("    -s, --seed <S>       Random seed for reproducibility");
    println!("    -t, --ticks <T>      Max ticks per run (default: 100,000)");
    println!("    --manual             Never equip, sell, train or claim quests");
    println!("    -v, --verbose        Verbose output");
    println!("    --json               Save JSON report");
    println!("    --quick              Quick test (50 runs, Cave of Slimes)");
    println!("    --full               Full test (20 runs, Abyss)");
    println!("    -h, --help           Show this help");
}
