use std::io::{self, BufRead, Write};
use std::path::Path;

use colored::Colorize;
use tracing::info;

use oracle_engine::{EngineConfig, GameEngine, Reply, SharedEngine, WeeklySchedule};

use crate::console::Console;

pub fn run(
    seed: Option<u64>,
    offset: i32,
    catalog: Option<&Path>,
    auto_reset: bool,
) -> Result<(), String> {
    let catalog = super::load_catalog(catalog)?;
    let mut config = EngineConfig::default().with_utc_offset(offset);
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }

    let effects = catalog.len();
    let engine =
        GameEngine::new(catalog, config).map_err(|e| format!("failed to start engine: {e}"))?;
    let schedule = auto_reset.then(WeeklySchedule::default);
    let mut console = Console::new(SharedEngine::new(engine), schedule);

    info!(effects, offset, auto_reset, "oracle console started");
    println!("  {} Oracle Draw", "Starting".bold());
    match seed {
        Some(seed) => println!("  Effects: {effects} | UTC{offset:+} | Seed: {seed}"),
        None => println!("  Effects: {effects} | UTC{offset:+}"),
    }
    println!("  Type 'reset' to start a cycle, 'help' for commands, 'quit' to exit.\n");

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        if let Some(announcement) = console.tick() {
            println!("{announcement}\n");
        }

        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break, // EOF
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match console.process(input) {
            Reply::Public(text) => println!("{text}\n"),
            Reply::Private(text) => println!("{}\n", text.yellow()),
        }
        if input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("q") {
            break;
        }
    }

    Ok(())
}
