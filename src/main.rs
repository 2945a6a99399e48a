//! Headless runner: loads (or creates) the saved hero, applies any queued
//! commands, runs the loop for a number of ticks and saves again.
//!
//! Usage:
//!   dungeon-quest [--name NAME] [--class CLASS] [--ticks N] [--seed S]
//!                 [--realtime] [--new] [-c COMMAND]...

use std::env;
use std::thread;

use dungeon_quest::character::{HeroClass, SaveManager};
use dungeon_quest::core::{BalanceOverrides, Command, GameLoop, GameSession, DEFAULT_HERO_NAME};
use dungeon_quest::utils::persistence::{load_json, FileStore};
use rand::rngs::StdRng;
use rand::SeedableRng;

const BALANCE_FILE: &str = "balance.json";

struct Args {
    name: String,
    class: HeroClass,
    ticks: u64,
    seed: Option<u64>,
    realtime: bool,
    fresh: bool,
    commands: Vec<String>,
}

fn parse_args(args: &[String]) -> Args {
    let mut parsed = Args {
        name: DEFAULT_HERO_NAME.to_string(),
        class: HeroClass::Warrior,
        ticks: 60,
        seed: None,
        realtime: false,
        fresh: false,
        commands: Vec::new(),
    };

    let mut i = 1;
    while i < args.len() {
        let value = args.get(i + 1);
        match (args[i].as_str(), value) {
            ("--name", Some(v)) => {
                parsed.name = v.clone();
                i += 1;
            }
            ("--class", Some(v)) => {
                parsed.class = HeroClass::from_name(v).unwrap_or_default();
                i += 1;
            }
            ("--ticks", Some(v)) => {
                parsed.ticks = v.parse().unwrap_or(60);
                i += 1;
            }
            ("--seed", Some(v)) => {
                parsed.seed = v.parse().ok();
                i += 1;
            }
            ("-c" | "--command", Some(v)) => {
                parsed.commands.push(v.clone());
                i += 1;
            }
            ("--realtime", _) => parsed.realtime = true,
            ("--new", _) => parsed.fresh = true,
            ("-h" | "--help", _) => {
                print_help();
                std::process::exit(0);
            }
            (other, _) => eprintln!("Ignoring argument: {}", other),
        }
        i += 1;
    }
    parsed
}

fn print_help() {
    println!("Dungeon Quest");
    println!();
    println!("OPTIONS:");
    println!("    --name <NAME>      Hero name for a new save (default: Hero)");
    println!("    --class <CLASS>    Warrior or Mage for a new save");
    println!("    --ticks <N>        Ticks to run (default: 60)");
    println!("    --seed <S>         Seed the combat RNG");
    println!("    --realtime         Wait one tick interval between ticks");
    println!("    --new              Ignore the existing save");
    println!("    -c <COMMAND>       Run a command first, e.g. -c \"buy health_potion\"");
}

fn main() {
    env_logger::init();
    let args = parse_args(&env::args().collect::<Vec<_>>());

    let store = match FileStore::new() {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Cannot open data directory: {}", e);
            std::process::exit(1);
        }
    };
    let overrides: Option<BalanceOverrides> = load_json(store.dir(), BALANCE_FILE);
    let mut saves = SaveManager::new(store);

    let mut session = match saves.load_or_none() {
        Some(state) if !args.fresh => {
            println!("Welcome back, {}!", state.hero.name);
            GameSession::from_saved(state)
        }
        _ => {
            println!("A new {} named {} sets out.", args.class.name(), args.name);
            GameSession::new(args.name.clone(), args.class)
        }
    };
    if let Some(overrides) = overrides {
        log::info!("Applying {}", BALANCE_FILE);
        session.apply_balance_overrides(&overrides);
    }

    let mut game = GameLoop::new(session);
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    for text in &args.commands {
        match text.parse::<Command>() {
            Ok(command) => match game.execute(command) {
                Ok(outcome) => {
                    println!("> {}", outcome);
                    for event in &outcome.events {
                        println!("  {}", event);
                    }
                }
                Err(e) => println!("> {}: {}", text, e),
            },
            Err(e) => println!("> {}: {}", text, e),
        }
    }

    if !game.is_running() {
        game.start();
    }
    for _ in 0..args.ticks {
        match game.tick(&mut rng) {
            Ok(result) => {
                for event in &result.events {
                    println!("{}", event);
                }
            }
            Err(_) => break,
        }
        if args.realtime {
            thread::sleep(game.interval());
        }
    }

    let hero = game.session.hero_snapshot();
    let progress = game.session.progress_snapshot();
    println!();
    println!(
        "{} the {} - Level {} - {}/{} HP - {} gold",
        hero.name, hero.class, hero.level, hero.current_hp, hero.max_hp, hero.gold
    );
    println!(
        "{} floor {}/{} ({}%)",
        progress.dungeon, progress.floor, progress.floors, progress.percent
    );

    if let Err(e) = saves.save(&game.session.to_saved()) {
        eprintln!("Failed to save: {}", e);
        std::process::exit(1);
    }
}
