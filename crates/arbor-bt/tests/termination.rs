use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use arbor_bt::leaves::Task;
use arbor_bt::{NodeSpec, NodeState, TreeAsset};
use arbor_core::TickContext;

fn ctx(tick: u64) -> TickContext {
    TickContext::new(tick, 0.1)
}

fn counting_tree(result: NodeState, hits: &Arc<AtomicUsize>) -> TreeAsset {
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
fn finished_tree_ignores_further_updates() {
    for result in [NodeState::Success, NodeState::Failure] {
        let hits = Arc::new(AtomicUsize::new(0));
        let mut tree = counting_tree(result, &hits)
            .instantiate()
            .expect("valid tree");

        assert_eq!(tree.update(&ctx(0)), result);
        for tick in 1..5 {
            assert_eq!(tree.update(&ctx(tick)), result);
        }

        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(tree.updates(), 1);
        assert_eq!(tree.state(), result);
    }
}

#[test]
fn running_tree_is_evaluated_every_update() {
    let hits = Arc::new(AtomicUsize::new(0));
    let mut tree = counting_tree(NodeState::Running, &hits)
        .instantiate()
        .expect("valid tree");

    for tick in 0..4 {
        assert_eq!(tree.update(&ctx(tick)), NodeState::Running);
    }
    assert_eq!(hits.load(Ordering::SeqCst), 4);
    assert_eq!(tree.updates(), 4);
}

#[test]
fn reset_makes_a_finished_tree_run_again() {
    let hits = Arc::new(AtomicUsize::new(0));
    let mut tree = counting_tree(NodeState::Success, &hits)
        .instantiate()
        .expect("valid tree");

    tree.update(&ctx(0));
    tree.reset(&ctx(1));

    assert_eq!(tree.state(), NodeState::Running);
    assert!(tree.nodes().all(|node| node.state == NodeState::Running));

    assert_eq!(tree.update(&ctx(1)), NodeState::Success);
    assert_eq!(hits.load(Ordering::SeqCst), 2);
    assert_eq!(tree.updates(), 2);
}
