use arbor_bt::leaves::Always;
use arbor_bt::{DecoratorKind, NodeSpec, NodeState, TreeAsset};
use arbor_core::TickContext;
use proptest::prelude::*;

fn any_state() -> impl Strategy<Value = NodeState> {
    prop_oneof![
        Just(NodeState::Running),
        Just(NodeState::Success),
        Just(NodeState::Failure),
    ]
}

fn any_decorator() -> impl Strategy<Value = DecoratorKind> {
    prop_oneof![
        Just(DecoratorKind::Inverter),
        Just(DecoratorKind::Succeeder),
        Just(DecoratorKind::Failer),
        (1u32..5).prop_map(|times| DecoratorKind::Repeat { times }),
        (1u32..5).prop_map(|attempts| DecoratorKind::Retry { attempts }),
        (0u64..5).prop_map(|ticks| DecoratorKind::Cooldown { ticks }),
    ]
}

fn inverted(child: NodeState) -> NodeState {
    let asset = TreeAsset::from_spec(
        "inverter",
        NodeSpec::inverter("Inverter", NodeSpec::leaf("Child", Always(child))),
    );
    let mut tree = asset.instantiate().expect("valid tree");
    tree.update(&TickContext::new(0, 0.1));
    tree.state_of("Inverter").expect("inverter present")
}

#[test]
fn inverter_mapping_table() {
    assert_eq!(inverted(NodeState::Running), NodeState::Running);
    assert_eq!(inverted(NodeState::Failure), NodeState::Success);
    assert_eq!(inverted(NodeState::Success), NodeState::Failure);
}

proptest! {
    #[test]
    fn inverter_succeeds_iff_child_failed(child in any_state()) {
        let result = DecoratorKind::Inverter.map(child);
        prop_assert_eq!(result == NodeState::Success, child == NodeState::Failure);
        prop_assert_eq!(result == NodeState::Failure, child == NodeState::Success);
        prop_assert_eq!(result == NodeState::Running, child == NodeState::Running);
        prop_assert_eq!(inverted(child), result);
    }

    #[test]
    fn every_decorator_passes_running_through(kind in any_decorator()) {
        prop_assert_eq!(kind.map(NodeState::Running), NodeState::Running);

        let asset = TreeAsset::from_spec(
            "passthrough",
            NodeSpec::decorator(
                "Decorator",
                kind,
                NodeSpec::leaf("Child", Always(NodeState::Running)),
            ),
        );
        let mut tree = asset.instantiate().expect("valid tree");
        for tick in 0..3 {
            prop_assert_eq!(tree.update(&TickContext::new(tick, 0.1)), NodeState::Running);
        }
    }
}
