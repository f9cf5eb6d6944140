//! station-run: headless driver for the pipe-repair simulation.
//!
//! Usage:
//!   station-run layout
//!   station-run run --seed 7 --skill sloppy --reaction 1.5
//!   station-run run --config balance.json --json > trace.jsonl

mod autopilot;

use std::path::PathBuf;

use anyhow::{ensure, Context};
use clap::{Parser, Subcommand};

use station_core::commands::PlayerCommand;
use station_core::config::SessionConfig;
use station_core::constants::DEFAULT_FRAME_RATE;
use station_core::enums::{SessionState, WallSide};
use station_core::events::SessionEvent;
use station_sim::world_setup::LayoutPattern;
use station_sim::{SessionController, SimConfig};

use autopilot::{Autopilot, Skill};

#[derive(Parser)]
#[command(name = "station-run")]
#[command(about = "Run pipe-repair sessions without a headset", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the segment table of the default corridor
    Layout,

    /// Play one session with the autopilot
    Run {
        /// RNG seed for failures and part placement
        #[arg(short, long, default_value_t = 42)]
        seed: u64,

        /// Simulated frames per second
        #[arg(short, long, default_value_t = DEFAULT_FRAME_RATE as f64)]
        fps: f64,

        /// Session config (JSON); defaults when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Seconds the autopilot waits before each grab and each placement
        #[arg(short, long, default_value_t = 1.0)]
        reaction: f64,

        /// How accurately parts are held
        #[arg(long, value_enum, default_value_t = Skill::Perfect)]
        skill: Skill,

        /// Print one JSON snapshot per simulated second
        #[arg(long)]
        json: bool,
    },
}

/// Running totals over a session.
#[derive(Debug, Default)]
struct Tally {
    failures: u32,
    pickups: u32,
    repairs: u32,
    drops: u32,
}

impl Tally {
    fn record(&mut self, events: &[SessionEvent]) {
        for event in events {
            match event {
                SessionEvent::SegmentBroken { .. } => self.failures += 1,
                SessionEvent::PartPickedUp { .. } => self.pickups += 1,
                SessionEvent::SegmentRepaired { .. } => self.repairs += 1,
                SessionEvent::PartDropped { .. } => self.drops += 1,
                _ => {}
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Layout => cmd_layout(),
        Commands::Run {
            seed,
            fps,
            config,
            reaction,
            skill,
            json,
        } => cmd_run(seed, fps, config, reaction, skill, json),
    }
}

fn cmd_layout() -> anyhow::Result<()> {
    let placements = LayoutPattern::default().placements();

    println!("{:>4}  {:<5}  {:<10}  {:>22}  {:>6}", "id", "side", "kind", "center", "length");
    for (id, p) in placements.iter().enumerate() {
        let side = match p.side {
            WallSide::Left => "left",
            WallSide::Right => "right",
        };
        let kind = if p.vertical { "connector" } else { "run" };
        println!(
            "{:>4}  {:<5}  {:<10}  ({:>6.2}, {:>5.2}, {:>6.2})  {:>6.2}",
            id, side, kind, p.center.x, p.center.y, p.center.z, p.length
        );
    }

    let vertical = placements.iter().filter(|p| p.vertical).count();
    println!("\n{} segments, {} vertical", placements.len(), vertical);
    Ok(())
}

fn cmd_run(
    seed: u64,
    fps: f64,
    config: Option<PathBuf>,
    reaction: f64,
    skill: Skill,
    json: bool,
) -> anyhow::Result<()> {
    ensure!(fps.is_finite() && fps > 0.0, "--fps must be positive, got {fps}");

    let session = match &config {
        Some(path) => SessionConfig::load(path)
            .with_context(|| format!("loading session config {}", path.display()))?,
        None => SessionConfig::default(),
    };

    // Upper bound on frames; a session cannot outlast its clock.
    let max_frames = ((session.session_length_secs + 1.0) * fps).ceil() as u64;
    let dt = 1.0 / fps;

    let mut controller = SessionController::new(SimConfig {
        seed,
        session,
        ..Default::default()
    });
    let mut pilot = Autopilot::new(skill, reaction, seed);
    let mut tally = Tally::default();

    log::info!("running seed {seed} at {fps} fps, skill {skill:?}");
    controller.queue_command(PlayerCommand::Start);
    let mut snap = controller.tick(0.0);
    let mut next_report = 0.0;

    for _ in 0..max_frames {
        if snap.state != SessionState::Playing {
            break;
        }
        controller.queue_commands(pilot.step(&snap, dt));
        snap = controller.tick(dt);
        tally.record(&snap.events);

        if json && snap.time.elapsed_secs >= next_report {
            println!("{}", serde_json::to_string(&snap)?);
            next_report += 1.0;
        }
    }

    if json {
        println!("{}", serde_json::to_string(&snap)?);
        return Ok(());
    }

    let outcome = match snap.state {
        SessionState::Win => "survived",
        SessionState::Loss => "lost",
        SessionState::Menu | SessionState::Playing => "unfinished",
    };
    println!(
        "{outcome}: {} ({:.1}s left, oxygen {}%)",
        controller.end_reason().unwrap_or("-"),
        snap.time_remaining,
        snap.hud.oxygen_percent
    );
    println!(
        "failures {}, pickups {}, repairs {}, drops {}",
        tally.failures, tally.pickups, tally.repairs, tally.drops
    );
    Ok(())
}
