//! Resilience Engine - headless round runner
//!
//! Loads a scenario, then either previews a single round-1 allocation or plays
//! a whole plan file through a game session, printing text or JSON.

use clap::Parser;
use resilience_engine::core::error::{EngineError, Result};
use resilience_engine::core::types::Allocation;
use resilience_engine::difficulty::DifficultyId;
use resilience_engine::engine::RoundResult;
use resilience_engine::rules::load_scenario;
use resilience_engine::session::{GameSession, RoundRecord, SessionSummary};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Headless runner for the round-effect engine
#[derive(Parser, Debug)]
#[command(name = "resilience-engine")]
#[command(about = "Compute round effects for a scenario, one round or a full plan")]
struct Args {
    /// Scenario TOML file
    #[arg(long, default_value = "data/scenario.toml")]
    scenario: PathBuf,

    /// Difficulty preset: easy, normal or hard
    #[arg(long, default_value = "normal")]
    difficulty: String,

    /// Plan TOML with one [[rounds]] table per round
    #[arg(long, conflicts_with = "alloc")]
    plan: Option<PathBuf>,

    /// Round-1 allocation entry as card=tokens (repeatable)
    #[arg(long, short = 'a')]
    alloc: Vec<String>,

    /// Output format: text or json
    #[arg(long, default_value = "text", value_parser = ["text", "json"])]
    format: String,
}

/// Plan file layout
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PlanFile {
    rounds: Vec<PlannedRound>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PlannedRound {
    #[serde(default)]
    allocations: Allocation,
}

/// JSON output for a full playthrough
#[derive(Serialize)]
struct PlaythroughOutput<'a> {
    rounds: &'a [RoundRecord],
    summary: SessionSummary,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("resilience_engine=info")),
        )
        .init();

    let args = Args::parse();
    let difficulty: DifficultyId = args.difficulty.parse()?;
    let json = args.format == "json";

    let config = load_scenario(&args.scenario)?;
    let mut session = GameSession::new(&config, difficulty);

    match &args.plan {
        Some(plan_path) => {
            let plan = load_plan(plan_path)?;
            for planned in plan.rounds {
                let record = session.play_round(planned.allocations)?;
                if !json {
                    print_round(record.round, &record.result);
                }
            }
            if json {
                let output = PlaythroughOutput {
                    rounds: session.history(),
                    summary: session.summary(),
                };
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                print_summary(&session.summary());
            }
        }
        None => {
            let allocation = parse_allocation(&args.alloc)?;
            let result = session.preview(&allocation)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_round(session.current_round(), &result);
            }
        }
    }

    Ok(())
}

fn load_plan(path: &Path) -> Result<PlanFile> {
    let content = std::fs::read_to_string(path)?;
    let plan: PlanFile = toml::from_str(&content)?;
    tracing::info!("Loaded plan {} with {} rounds", path.display(), plan.rounds.len());
    Ok(plan)
}

/// Parse `card=tokens` pairs; a card given twice keeps the last count
fn parse_allocation(entries: &[String]) -> Result<Allocation> {
    let mut allocation = Allocation::new();
    for entry in entries {
        let (card, tokens) = entry.split_once('=').ok_or_else(|| {
            EngineError::InvalidAllocation(format!("expected card=tokens, got {:?}", entry))
        })?;
        let tokens: u32 = tokens.trim().parse().map_err(|_| {
            EngineError::InvalidAllocation(format!("bad token count in {:?}", entry))
        })?;
        allocation.set(card.trim(), tokens);
    }
    Ok(allocation)
}

fn print_round(round: u32, result: &RoundResult) {
    let m = &result.metrics_after;
    println!("\n=== ROUND {} ===", round);
    println!(
        "  visibility {:>6.1} | efficiency {:>6.1} | sustainability {:>6.1}",
        m.visibility, m.efficiency, m.sustainability
    );
    println!(
        "  early warning {:>6.1} | complexity {:>6.1}",
        m.early_warning, m.complexity
    );
    for synergy in &result.active_synergies {
        println!(
            "  + synergy {}: {:+.1} {} (x{})",
            synergy.id, synergy.scaled_bonus, synergy.target, synergy.scale
        );
    }
    for disaster in &result.triggered_disasters {
        println!(
            "  ! disaster {}: {} {:.1} >= {:.1}",
            disaster.id, disaster.trigger, disaster.observed, disaster.threshold
        );
    }
    if !result.has_events() {
        println!("  (no events)");
    }
}

fn print_summary(summary: &SessionSummary) {
    println!("\n=== SUMMARY ({}) ===", summary.difficulty);
    println!(
        "  {} rounds, {} synergies, {} disasters",
        summary.rounds_played, summary.synergies_fired, summary.disasters_fired
    );
    for (metric, level) in &summary.feedback {
        println!(
            "  {:<15} {:>6.1}  {:?}",
            metric.key(),
            summary.final_metrics.get(*metric),
            level
        );
    }
}
