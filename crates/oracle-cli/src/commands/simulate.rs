use std::path::Path;
use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use oracle_engine::{DrawKind, DrawOutcome, EngineConfig, GameEngine, ManualClock, ParticipantId};

/// Running totals for one scripted participant across all cycles.
#[derive(Default)]
struct Tally {
    draws: u32,
    wins: u32,
    rewards: i64,
    tokens: i64,
    streak_bonuses: u32,
}

pub fn run(cycles: u32, participants: u32, seed: u64, catalog: Option<&Path>) -> Result<(), String> {
    if participants == 0 {
        println!("  No participants. Nothing to simulate.");
        return Ok(());
    }

    let catalog = super::load_catalog(catalog)?;
    let effects = catalog.len();

    // Thursday 2024-05-02, 10:00 at UTC+9.
    let start = Utc
        .with_ymd_and_hms(2024, 5, 2, 1, 0, 0)
        .single()
        .ok_or("invalid simulation start")?;
    let clock = Arc::new(ManualClock::new(start));
    let mut engine = GameEngine::with_clock(
        catalog,
        EngineConfig::default().with_seed(seed),
        clock.clone(),
    )
    .map_err(|e| format!("failed to start engine: {e}"))?;

    let players: Vec<(ParticipantId, String)> = (1..=participants)
        .map(|n| (ParticipantId::from(u64::from(n)), format!("Player {n}")))
        .collect();
    let mut tallies: Vec<Tally> = players.iter().map(|_| Tally::default()).collect();

    println!(
        "  {} {}",
        "Simulation".bold(),
        format!("({cycles} cycles, {participants} participants, {effects} effects, seed={seed})")
            .dimmed()
    );
    println!();

    for cycle in 0..cycles {
        clock.set(start + Duration::days(7 * i64::from(cycle)));
        let announcement = engine.advance_cycle();
        let mut winner: Option<(usize, DrawOutcome)> = None;

        'week: for day in 0..7 {
            if day > 0 {
                clock.advance(Duration::days(1));
            }
            let kind = if day == 0 {
                DrawKind::Boosted
            } else {
                DrawKind::Standard
            };
            for (i, (id, name)) in players.iter().enumerate() {
                for kind in [kind, DrawKind::Bonus] {
                    let Ok(outcome) = engine.draw(id, name, kind) else {
                        continue;
                    };
                    tallies[i].draws += 1;
                    if kind == DrawKind::Bonus {
                        tallies[i].tokens -= 1;
                    }
                    if outcome.is_win() {
                        winner = Some((i, outcome));
                        break 'week;
                    }
                }
            }
        }

        let label = format!("[cycle {:>3}]", announcement.cycle_index).dimmed();
        match winner {
            Some((i, outcome)) => {
                let attempts = engine.summary().rows.iter().map(|r| r.attempts).sum::<u32>();
                let mut line = format!(
                    "{label} {} drawn by {} ({} draw, {attempts} draws this week)",
                    announcement.target.bold(),
                    outcome.display_name.green(),
                    outcome.kind
                );
                if let Some(win) = &outcome.win {
                    tallies[i].wins += 1;
                    tallies[i].rewards += win.reward.total();
                    if win.reward.streak_bonus.is_some() {
                        tallies[i].streak_bonuses += 1;
                        line.push_str(&format!(" {}", "streak bonus!".yellow()));
                    }
                }
                println!("  {line}");
            }
            None => println!(
                "  {label} {} was never drawn",
                announcement.target.bold()
            ),
        }
    }

    println!();
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Participant", "Draws", "Wins", "Streak bonuses", "Rewards", "Net"]);
    for ((_, name), tally) in players.iter().zip(&tallies) {
        table.add_row(vec![
            name.clone(),
            tally.draws.to_string(),
            tally.wins.to_string(),
            tally.streak_bonuses.to_string(),
            tally.rewards.to_string(),
            format!("{:+}", tally.rewards + tally.tokens),
        ]);
    }
    println!("{table}");

    Ok(())
}
