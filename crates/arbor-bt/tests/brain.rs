use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use arbor_bt::leaves::Task;
use arbor_bt::{tick_brains, Brain, NodeSpec, NodeState, TreeAsset, ValidationError};
use arbor_core::{BbKey, BrainConfig, RestartPolicy, TickContext};

const SELF: BbKey<u64> = BbKey::new("self");

fn ctx(tick: u64) -> TickContext {
    TickContext::new(tick, 0.1)
}

fn counting(result: NodeState, hits: &Arc<AtomicUsize>) -> TreeAsset {
    let hits = Arc::clone(hits);
    TreeAsset::from_spec(
        "counting",
        NodeSpec::leaf(
            "Count",
            Task::new(move |_ctx| {
                hits.fetch_add(1, Ordering::SeqCst);
                result
            }),
        ),
    )
}

#[test]
fn brain_only_thinks_on_its_cadence() {
    let hits = Arc::new(AtomicUsize::new(0));
    let asset = counting(NodeState::Running, &hits);
    let mut brain = Brain::spawn(7u64, &asset)
        .expect("valid tree")
        .with_config(BrainConfig {
            think_every_ticks: 3,
            ..BrainConfig::default()
        });

    for tick in 0..7 {
        brain.tick(&ctx(tick));
    }

    // Ticks 0, 3 and 6.
    assert_eq!(hits.load(Ordering::SeqCst), 3);
    assert_eq!(brain.last_status(), NodeState::Running);
}

#[test]
fn deterministic_config_offsets_by_agent_id() {
    let config = BrainConfig::deterministic(3u64, 2);
    assert_eq!(config.think_offset_ticks, 1);
    assert!(!config.should_think(0));
    assert!(config.should_think(1));
    assert!(config.should_think(3));
}

#[test]
fn finished_tree_stays_finished_without_restart_policy() {
    let hits = Arc::new(AtomicUsize::new(0));
    let mut brain = Brain::spawn(1u64, &counting(NodeState::Success, &hits)).expect("valid tree");

    for tick in 0..4 {
        assert_eq!(brain.tick(&ctx(tick)), NodeState::Success);
    }
    assert_eq!(hits.load(Ordering::SeqCst), 1);
    assert_eq!(brain.tree().updates(), 1);
}

#[test]
fn restart_on_finish_runs_the_tree_again() {
    let hits = Arc::new(AtomicUsize::new(0));
    let mut brain = Brain::spawn(1u64, &counting(NodeState::Failure, &hits))
        .expect("valid tree")
        .with_config(BrainConfig::default().with_restart(RestartPolicy::OnFinish));

    for tick in 0..4 {
        assert_eq!(brain.tick(&ctx(tick)), NodeState::Failure);
    }
    assert_eq!(hits.load(Ordering::SeqCst), 4);
}

#[test]
fn brains_tick_in_stable_agent_order() {
    let order = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&order);
    let asset = TreeAsset::from_spec(
        "report",
        NodeSpec::leaf(
            "Report",
            Task::new(move |ctx| {
                if let Some(agent) = ctx.blackboard.get(SELF).copied() {
                    log.lock().unwrap().push(agent);
                }
                NodeState::Running
            }),
        ),
    );

    let mut brains = [30u64, 10, 20]
        .into_iter()
        .map(|agent| {
            let mut brain = Brain::spawn(agent, &asset).expect("valid tree");
            brain.tree_mut().blackboard_mut().set(SELF, agent);
            brain
        })
        .collect::<Vec<_>>();

    tick_brains(&ctx(0), &mut brains);
    tick_brains(&ctx(1), &mut brains);

    assert_eq!(*order.lock().unwrap(), vec![10, 20, 30, 10, 20, 30]);
    assert_eq!(
        brains.iter().map(|b| b.agent).collect::<Vec<_>>(),
        vec![10, 20, 30]
    );
}

#[test]
fn spawn_rejects_invalid_templates() {
    let asset = TreeAsset::new("empty");
    assert_eq!(
        Brain::spawn(1u32, &asset).map(|b| b.agent).unwrap_err(),
        ValidationError::NoRoot
    );
}
