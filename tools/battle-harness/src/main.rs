//! battle-harness: run a headless battle with a scripted spawn policy.
//!
//! Usage:
//!   battle-harness --level 3 --ticks 7200 --seed 42 --progress progress.json

use std::path::PathBuf;
use std::process;

use anyhow::{bail, Context, Result};

use evowar_core::commands::PlayerCommand;
use evowar_core::enums::TickOutcome;
use evowar_progression::persistence::{load_or_default, JsonFileStore, ProgressStore};
use evowar_progression::PlayerProgress;
use evowar_sim::{SimConfig, SimulationEngine};

/// Ticks between scripted spawn attempts (one second at 60 Hz).
const SPAWN_EVERY_TICKS: u64 = 60;

struct Options {
    level: u32,
    ticks: u64,
    seed: u64,
    progress: Option<PathBuf>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "help" || a == "--help" || a == "-h") {
        print_usage();
        return;
    }

    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {e}");
            print_usage();
            process::exit(1);
        }
    };

    if let Err(e) = run(options) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn print_usage() {
    eprintln!(
        "battle-harness: EVOWAR headless battle runner\n\
         \n\
           --level <N>        Level to fight, 1 to 20 (default: 1)\n\
           --ticks <N>        Maximum ticks to simulate (default: 7200)\n\
           --seed <N>         RNG seed (default: 42)\n\
           --progress <path>  Player progress JSON, saved after the battle\n\
         \n\
         Example:\n\
         \n\
           battle-harness --level 6 --ticks 18000 --progress save/progress.json\n"
    );
}

fn parse_args(args: &[String]) -> Result<Options> {
    let mut options = Options {
        level: 1,
        ticks: 7200,
        seed: 42,
        progress: None,
    };
    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        let Some(value) = args.get(i + 1) else {
            bail!("{flag} needs a value");
        };
        match flag {
            "--level" => options.level = value.parse().context("--level")?,
            "--ticks" => options.ticks = value.parse().context("--ticks")?,
            "--seed" => options.seed = value.parse().context("--seed")?,
            "--progress" => options.progress = Some(PathBuf::from(value)),
            other => bail!("unknown option: {other}"),
        }
        i += 2;
    }
    Ok(options)
}

fn run(options: Options) -> Result<()> {
    let mut store = options.progress.as_ref().map(JsonFileStore::new);
    let progress = match &store {
        Some(store) => load_or_default(store),
        None => PlayerProgress::default(),
    };
    let roster = progress.available_roster();

    let mut engine = SimulationEngine::new(SimConfig {
        seed: options.seed,
        level: options.level,
        progress,
        ..Default::default()
    })?;

    let mut next = 0;
    let mut outcome = TickOutcome::Continues;
    for tick in 0..options.ticks {
        if tick % SPAWN_EVERY_TICKS == 0 && !roster.is_empty() {
            engine.queue_command(PlayerCommand::SpawnUnit {
                archetype: roster[next % roster.len()],
            });
            next += 1;
        }
        outcome = engine.tick();
        if outcome != TickOutcome::Continues {
            break;
        }
    }

    let snapshot = engine.snapshot();
    log::info!(
        "finished after {} ticks ({:.1} s): {:?}; {} units on the field, seeds {:.1}, xp {}",
        snapshot.time.tick,
        snapshot.time.elapsed_ms / 1000.0,
        outcome,
        snapshot.units.len(),
        snapshot.seeds,
        snapshot.xp
    );
    for building in &snapshot.buildings {
        log::info!(
            "{:?} {:?}: {:.0}/{:.0}",
            building.side,
            building.kind,
            building.health,
            building.max_health
        );
    }

    if let Some(store) = store.as_mut() {
        store
            .save(engine.progress())
            .with_context(|| format!("saving progress to {}", store.path().display()))?;
        log::info!("progress saved to {}", store.path().display());
    }
    Ok(())
}
