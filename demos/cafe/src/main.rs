//! cafe: a few minutes of customers at a small café.
//!
//! Customers walk in, queue at the counter, get served, sit down, eat and
//! leave.  Pass a JSON file to override the defaults:
//!
//! ```text
//! cargo run -p cafe -- demo.json
//! RUST_LOG=cafe_behavior=debug cargo run -p cafe
//! ```
//!
//! ```json
//! { "sim": { "seed": 7, "max_agents": 6 }, "behavior": { "service_secs": 2.0 } }
//! ```

mod floor;

use std::time::Instant;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{info, trace};
use tracing_subscriber::EnvFilter;

use cafe_behavior::{AgentStore, DebugSink, MandateKind, SimulationContext};
use cafe_core::{AgentId, BehaviorConfig, NodeId, SimConfig, Tick, Vec2};
use cafe_sim::{DespawnReason, SimBuilder, SimObserver};

use floor::build_floor;

// ── Configuration ─────────────────────────────────────────────────────────────

#[derive(Default, Deserialize)]
#[serde(default)]
struct DemoConfig {
    sim:      SimConfig,
    behavior: BehaviorConfig,
}

fn load_config() -> Result<DemoConfig> {
    let Some(path) = std::env::args().nth(1) else {
        return Ok(DemoConfig::default());
    };
    let text = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {path}"))
}

// ── Observer ──────────────────────────────────────────────────────────────────

/// Logs lifecycle events and keeps a few counters for the summary.
#[derive(Default)]
struct CafeLog {
    spawned:     usize,
    served:      usize,
    seated:      usize,
    exited:      usize,
    faulted:     usize,
    peak_queue:  usize,
    peak_agents: usize,
}

impl SimObserver for CafeLog {
    fn on_spawn(&mut self, agent: AgentId, now: f64) {
        self.spawned += 1;
        info!(agent = %agent, t = format_args!("{now:.1}"), "spawned");
    }

    fn on_transition(&mut self, agent: AgentId, from: MandateKind, to: MandateKind, now: f64) {
        match to {
            MandateKind::Served => self.served += 1,
            MandateKind::ConsumeSitting => self.seated += 1,
            _ => {}
        }
        info!(agent = %agent, %from, %to, t = format_args!("{now:.1}"), "mandate");
    }

    fn on_despawn(&mut self, agent: AgentId, reason: DespawnReason, now: f64) {
        match reason {
            DespawnReason::Exited => self.exited += 1,
            DespawnReason::Faulted => self.faulted += 1,
        }
        info!(agent = %agent, ?reason, t = format_args!("{now:.1}"), "despawned");
    }

    fn on_tick_end(&mut self, _tick: Tick, agents: &AgentStore, ctx: &SimulationContext) {
        self.peak_agents = self.peak_agents.max(agents.len());
        let longest = ctx
            .queues
            .nodes()
            .into_iter()
            .filter_map(|n| ctx.queues.peek(n).map(|q| q.len()))
            .max()
            .unwrap_or(0);
        self.peak_queue = self.peak_queue.max(longest);
    }
}

/// Forwards path and slot previews to the trace log.
struct TraceSink;

impl DebugSink for TraceSink {
    fn path(&mut self, agent: AgentId, points: &[Vec2]) {
        trace!(agent = %agent, points = points.len(), "path");
    }

    fn queue_slots(&mut self, node: NodeId, slots: &[Vec2]) {
        trace!(node = %node, slots = slots.len(), "queue slots");
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .compact()
        .init();

    let config = load_config()?;
    let (floor, counter, seats) = build_floor();

    println!("=== cafe: counter {counter}, {} seats ===", seats.len());
    println!(
        "Ticks: {} × {:.3} s  |  Seed: {}  |  Spawn every {} s (max {})",
        config.sim.total_ticks,
        config.sim.tick_secs,
        config.sim.seed,
        config.sim.spawn_interval_secs,
        config.sim.max_agents,
    );
    println!();

    let mut sim = SimBuilder::with_floor(config.sim, config.behavior, floor)
        .debug_sink(TraceSink)
        .build()?;

    let mut log = CafeLog::default();
    let t0 = Instant::now();
    sim.run(&mut log);
    let elapsed = t0.elapsed();

    println!("Simulated {:.0} s in {:.3} s", sim.now(), elapsed.as_secs_f64());
    println!("  spawned     : {}", log.spawned);
    println!("  served      : {}", log.served);
    println!("  seated      : {}", log.seated);
    println!("  left        : {}", log.exited);
    println!("  removed     : {}", log.faulted);
    println!("  peak queue  : {}", log.peak_queue);
    println!("  peak inside : {}", log.peak_agents);
    println!();

    println!("{:<12} {:<16} {:>8} {:>8}", "Agent", "Mandate", "x", "y");
    println!("{}", "-".repeat(48));
    for agent in sim.agents.iter() {
        println!(
            "{:<12} {:<16} {:>8.1} {:>8.1}",
            agent.id.to_string(),
            agent.mandate.kind().to_string(),
            agent.position.x,
            agent.position.y,
        );
    }

    Ok(())
}
