//! ReelCore session simulator
//!
//! Usage:
//!   rc-sim run                        - spin the built-in demo game
//!   rc-sim run --config game.json     - spin a custom math document
//!   rc-sim run --record draws.json    - capture the draw sequence
//!   rc-sim run --replay draws.json    - replay a captured sequence
//!   rc-sim export                     - print the demo document as JSON

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rand::rngs::StdRng;

use rc_cycle::{BetLedger, InstantPresentation, SlotState, SpinCycle, TickEvent};
use rc_math::{
    DrawSource, MathConfig, MathModel, RecordingDraws, ReplayDraws, RngDraws, SlotGroupModel,
};

mod demo;

/// Free spins granted per bonus trigger
const FREE_SPIN_COUNT: u32 = 5;

#[derive(Parser)]
#[command(name = "rc-sim", about = "Headless ReelCore session simulator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a batch of spin cycles and report session statistics
    Run(RunArgs),
    /// Write the built-in demo math document as pretty JSON
    Export {
        /// Output path; stdout when omitted
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

#[derive(Args)]
struct RunArgs {
    /// Math document (.json / .yaml); the built-in demo when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of spins to attempt
    #[arg(short, long, default_value_t = 10_000)]
    spins: u64,

    /// Draw source seed
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Credits wagered per line
    #[arg(long, default_value_t = 1)]
    line_bet: u32,

    /// Lines bought per spin; the full payline set when omitted
    #[arg(long)]
    lines: Option<u32>,

    /// Starting bankroll
    #[arg(long, default_value_t = 100_000)]
    credits: u64,

    /// Strip set to spin; the document's first when omitted
    #[arg(long)]
    strip_set: Option<String>,

    /// Paytable set to score against; the document's first when omitted
    #[arg(long)]
    paytable_set: Option<String>,

    /// Record every draw to this JSON file
    #[arg(long)]
    record: Option<PathBuf>,

    /// Replay draws from a recorded JSON file instead of the RNG
    #[arg(long, conflicts_with = "record")]
    replay: Option<PathBuf>,
}

/// Draw source picked on the command line
enum SessionDraws {
    Rng(RngDraws<StdRng>),
    Recording(RecordingDraws<RngDraws<StdRng>>),
    Replay(ReplayDraws),
}

impl SessionDraws {
    /// Laps of the replayed recording consumed so far; None outside
    /// replay mode
    fn replay_laps(&self) -> Option<u32> {
        match self {
            SessionDraws::Replay(source) => Some(source.laps()),
            _ => None,
        }
    }
}

impl DrawSource for SessionDraws {
    fn draw(&mut self, total_weight: u32) -> u32 {
        match self {
            SessionDraws::Rng(source) => source.draw(total_weight),
            SessionDraws::Recording(source) => source.draw(total_weight),
            SessionDraws::Replay(source) => source.draw(total_weight),
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    match Cli::parse().command {
        Commands::Run(args) => run(args),
        Commands::Export { out } => export(out),
    }
}

fn run(args: RunArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => MathConfig::load(path)
            .with_context(|| format!("loading math document {}", path.display()))?,
        None => demo::demo_config(),
    };
    let model = config.build().context("building math model")?;

    let strip_set = match args.strip_set {
        Some(id) => id,
        None => model
            .strip_set_ids()
            .next()
            .map(str::to_owned)
            .context("math document has no strip sets")?,
    };
    let paytable_set = match args.paytable_set {
        Some(id) => id,
        None => model
            .paytable_set_ids()
            .next()
            .map(str::to_owned)
            .context("math document has no paytable sets")?,
    };
    let lines = match args.lines {
        Some(count) => count,
        None => model.active_payline_set()?.line_count() as u32,
    };

    let mut ledger = BetLedger::new();
    ledger.set_credits(args.credits);
    ledger.set_line_bet(args.line_bet);
    ledger.set_total_lines(lines);
    let line_bet = u64::from(args.line_bet);
    let total_bet = ledger.total_bet();

    let mut cycle = SpinCycle::new(ledger);
    cycle.add_group(SlotGroupModel::new(&model, &strip_set, &paytable_set)?);

    // The feature respins on its own reels so the base stops stay
    // untouched for the award show
    let mut bonus_reels = SlotGroupModel::new(&model, &strip_set, &paytable_set)?;

    let mut draws = match (&args.replay, &args.record) {
        (Some(path), _) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading recorded draws {}", path.display()))?;
            let recorded: Vec<u32> = serde_json::from_str(&text)
                .with_context(|| format!("parsing recorded draws {}", path.display()))?;
            log::info!("replaying {} recorded draws", recorded.len());
            SessionDraws::Replay(ReplayDraws::new(recorded))
        }
        (None, Some(_)) => SessionDraws::Recording(RecordingDraws::new(RngDraws::seeded(args.seed))),
        (None, None) => SessionDraws::Rng(RngDraws::seeded(args.seed)),
    };
    let mut presentation = InstantPresentation::new();

    log::info!(
        "simulating {} spins of '{}': {} per line over {lines} lines, {} credits",
        args.spins,
        model.id(),
        args.line_bet,
        args.credits
    );

    'session: for _ in 0..args.spins {
        cycle.request_spin()?;
        loop {
            let event = cycle.advance(&model, &mut draws, &mut presentation)?;
            if event == TickEvent::PlayRejected {
                log::info!(
                    "bankroll exhausted after {} spins: {} credits below wager {total_bet}",
                    cycle.stats().spins,
                    cycle.ledger().credits()
                );
                break 'session;
            }
            if cycle.state() == SlotState::Bonus {
                run_free_spins(
                    &mut cycle,
                    &model,
                    &mut bonus_reels,
                    &mut draws,
                    line_bet,
                    total_bet,
                )?;
            }
            if cycle.state() == SlotState::Idle {
                break;
            }
        }
    }

    if let Some(laps) = draws.replay_laps() {
        if laps > 0 {
            log::warn!(
                "recording too short, wrapped {laps} time(s): statistics no longer \
                 describe the recorded session"
            );
        }
    }

    let stats = *cycle.stats();
    println!(
        "session: {} spins, {} wagered, {} won, {} bonus triggers",
        stats.spins, stats.total_wagered, stats.total_won, stats.bonus_triggers
    );
    println!(
        "rtp {:.4}  hit rate {:.4}  (declared percentage {:.1})",
        stats.rtp(),
        stats.hit_rate(),
        model.percentage()
    );
    println!(
        "credits: {} -> {}",
        args.credits,
        cycle.ledger().credits()
    );

    if let Some(path) = &args.record {
        if let SessionDraws::Recording(recording) = draws {
            let recorded = recording.into_recorded();
            let text = serde_json::to_string(&recorded).context("serializing recorded draws")?;
            fs::write(path, text)
                .with_context(|| format!("writing recorded draws {}", path.display()))?;
            log::info!("recorded {} draws to {}", recorded.len(), path.display());
        }
    }
    Ok(())
}

/// Scripted free-spins feature: a fixed number of extra evaluations
/// appended to the cycle as their own pass while it waits in the bonus
/// state.
fn run_free_spins(
    cycle: &mut SpinCycle,
    model: &MathModel,
    reels: &mut SlotGroupModel,
    draws: &mut SessionDraws,
    line_bet: u64,
    total_bet: u64,
) -> Result<()> {
    log::debug!("free spins: {FREE_SPIN_COUNT} plays");
    for _ in 0..FREE_SPIN_COUNT {
        reels.generate_stops(draws)?;
        let play = cycle.create_play_result()?;
        reels.evaluate(model, line_bet, total_bet, play)?;
    }
    Ok(())
}

fn export(out: Option<PathBuf>) -> Result<()> {
    let text = demo::demo_config().to_json()?;
    match out {
        Some(path) => {
            fs::write(&path, &text)
                .with_context(|| format!("writing demo document {}", path.display()))?;
            log::info!("demo math document written to {}", path.display());
        }
        None => println!("{text}"),
    }
    Ok(())
}
