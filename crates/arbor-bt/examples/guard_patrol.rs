//! Guards patrolling waypoints until an intruder shows up on their blackboard.
//!
//! ```text
//! cargo run -p arbor-bt --example guard_patrol -- --guards 3 --ticks 12 --intruder-at 5
//! RUST_LOG=arbor=trace cargo run -p arbor-bt --example guard_patrol
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use arbor_bt::leaves::{HasKey, Task, Wait};
use arbor_bt::{tick_brains, Brain, EvalContext, NodeSpec, NodeState, TreeAsset};
use arbor_core::{BbKey, BrainConfig, RestartPolicy, TickContext};
use arbor_tools::{TraceSink, TracingSink, TRACE_SINK};

const INTRUDER: BbKey<u32> = BbKey::new("intruder");
const WAYPOINT: BbKey<usize> = BbKey::new("waypoint");
const CAUGHT: BbKey<u32> = BbKey::new("caught");

const WAYPOINTS: usize = 4;

#[derive(Parser)]
#[command(name = "guard_patrol")]
#[command(about = "Runs a few guard behavior trees side by side")]
struct Cli {
    /// Number of guards
    #[arg(long, default_value_t = 3)]
    guards: u32,

    /// Ticks to simulate
    #[arg(long, default_value_t = 12)]
    ticks: u64,

    /// Tick at which guard 1 spots an intruder
    #[arg(long, default_value_t = 5)]
    intruder_at: u64,

    /// Guards think every N ticks
    #[arg(long, default_value_t = 1)]
    think_every: u32,

    /// Forward tree trace events to the log
    #[arg(short, long)]
    verbose: bool,
}

fn advance_waypoint(ctx: &mut EvalContext<'_>) -> NodeState {
    let next = ctx.blackboard.get(WAYPOINT).map_or(0, |w| (w + 1) % WAYPOINTS);
    ctx.blackboard.set(WAYPOINT, next);
    let seconds = ctx.tick.tick as f32 * ctx.tick.dt_seconds;
    tracing::info!(node = ctx.node_name(), waypoint = next, seconds, "reached waypoint");
    NodeState::Success
}

fn catch_intruder(ctx: &mut EvalContext<'_>) -> NodeState {
    let Some(intruder) = ctx.blackboard.remove(INTRUDER) else {
        return NodeState::Failure;
    };
    ctx.blackboard.set(CAUGHT, intruder);
    tracing::info!(intruder, tick = ctx.tick.tick, "caught intruder");
    NodeState::Success
}

fn guard_asset() -> TreeAsset {
    TreeAsset::from_spec(
        "guard",
        NodeSpec::selector(
            "Guard",
            vec![
                NodeSpec::sequence(
                    "Respond",
                    vec![
                        NodeSpec::leaf("SeesIntruder", HasKey::new(INTRUDER)),
                        NodeSpec::leaf("Chase", Wait::new(1)),
                        NodeSpec::leaf("Catch", Task::new(catch_intruder)),
                    ],
                ),
                NodeSpec::composite(
                    "Patrol",
                    arbor_bt::CompositeKind::MemSequence,
                    vec![
                        NodeSpec::leaf("Walk", Wait::new(2)),
                        NodeSpec::leaf("Arrive", Task::new(advance_waypoint)),
                    ],
                ),
            ],
        ),
    )
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if cli.verbose { "arbor=trace,info" } else { "info" })
    });
    fmt().with_env_filter(filter).with_target(false).init();

    let config = BrainConfig {
        think_every_ticks: cli.think_every,
        ..BrainConfig::default()
    }
    .with_restart(RestartPolicy::OnFinish);
    config.validate()?;

    let asset = guard_asset();
    asset.validate()?;

    let mut brains = Vec::new();
    for guard in 0..cli.guards {
        let mut brain = Brain::spawn(guard, &asset)?.with_config(config);
        if cli.verbose {
            let sink: Box<dyn TraceSink> = Box::new(TracingSink::new(format!("guard-{guard}")));
            brain.tree_mut().blackboard_mut().set(TRACE_SINK, sink);
        }
        brains.push(brain);
    }

    let mut ctx = TickContext::new(0, 0.1);
    for _ in 0..cli.ticks {
        if ctx.tick == cli.intruder_at {
            if let Some(brain) = brains.iter_mut().find(|b| b.agent == 1) {
                brain.tree_mut().blackboard_mut().set(INTRUDER, 42);
            }
        }
        tick_brains(&ctx, &mut brains);
        ctx = ctx.next();
    }

    for brain in &brains {
        let bb = brain.tree().blackboard();
        println!(
            "guard {}: status={} waypoint={:?} caught={:?} updates={}",
            brain.agent,
            brain.last_status(),
            bb.get(WAYPOINT),
            bb.get(CAUGHT),
            brain.tree().updates()
        );
    }

    Ok(())
}
