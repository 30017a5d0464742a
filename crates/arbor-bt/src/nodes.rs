//! Decorator and composite node kinds.
//!
//! Kinds are plain configuration shared by template and instance nodes. Progress kept across
//! ticks lives in the `*Memory` types, which only tree instances carry.

use arbor_core::TickContext;

use crate::bt::NodeState;

/// Single-child nodes. `Running` from the child always passes through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecoratorKind {
    /// Success <-> Failure.
    Inverter,
    /// Any finished result becomes Success.
    Succeeder,
    /// Any finished result becomes Failure.
    Failer,
    /// Re-runs a succeeding child until it succeeded `times` times (one run per tick).
    Repeat { times: u32 },
    /// Re-runs a failing child until it failed `attempts` times (one run per tick).
    Retry { attempts: u32 },
    /// Fails without evaluating the child for `ticks` ticks after the child finished.
    Cooldown { ticks: u64 },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct DecoratorMemory {
    pub(crate) count: u32,
    pub(crate) ready_at: Option<u64>,
}

/// Result of feeding a child's state through a decorator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Decorated {
    pub(crate) state: NodeState,
    /// The child finished but will be run again; its memory must be cleared first.
    pub(crate) rerun_child: bool,
}

impl Decorated {
    fn plain(state: NodeState) -> Self {
        Self {
            state,
            rerun_child: false,
        }
    }
}

impl DecoratorKind {
    pub fn name(self) -> &'static str {
        match self {
            DecoratorKind::Inverter => "inverter",
            DecoratorKind::Succeeder => "succeeder",
            DecoratorKind::Failer => "failer",
            DecoratorKind::Repeat { .. } => "repeat",
            DecoratorKind::Retry { .. } => "retry",
            DecoratorKind::Cooldown { .. } => "cooldown",
        }
    }

    /// Stateless mapping of a child result. Counting and gating kinds map like `Succeeder`/`Failer`
    /// once their budget is spent; the full behavior lives in [`DecoratorKind::decorate`].
    pub fn map(self, child: NodeState) -> NodeState {
        match (self, child) {
            (_, NodeState::Running) => NodeState::Running,
            (DecoratorKind::Inverter, NodeState::Failure) => NodeState::Success,
            (DecoratorKind::Inverter, _) => NodeState::Failure,
            (DecoratorKind::Succeeder, _) => NodeState::Success,
            (DecoratorKind::Failer, _) => NodeState::Failure,
            (DecoratorKind::Repeat { .. }, state)
            | (DecoratorKind::Retry { .. }, state)
            | (DecoratorKind::Cooldown { .. }, state) => state,
        }
    }

    /// Checked before the child is evaluated. `Some` short-circuits the decorator.
    pub(crate) fn gate(self, memory: &DecoratorMemory, ctx: &TickContext) -> Option<NodeState> {
        match self {
            DecoratorKind::Cooldown { .. } => match memory.ready_at {
                Some(ready_at) if ctx.tick < ready_at => Some(NodeState::Failure),
                _ => None,
            },
            _ => None,
        }
    }

    pub(crate) fn decorate(
        self,
        memory: &mut DecoratorMemory,
        ctx: &TickContext,
        child: NodeState,
    ) -> Decorated {
        if child.is_running() {
            return Decorated::plain(NodeState::Running);
        }

        match self {
            DecoratorKind::Repeat { times } => match child {
                NodeState::Success => {
                    memory.count = memory.count.saturating_add(1);
                    if memory.count >= times {
                        memory.count = 0;
                        Decorated::plain(NodeState::Success)
                    } else {
                        Decorated {
                            state: NodeState::Running,
                            rerun_child: true,
                        }
                    }
                }
                _ => {
                    memory.count = 0;
                    Decorated::plain(NodeState::Failure)
                }
            },
            DecoratorKind::Retry { attempts } => match child {
                NodeState::Failure => {
                    memory.count = memory.count.saturating_add(1);
                    if memory.count >= attempts {
                        memory.count = 0;
                        Decorated::plain(NodeState::Failure)
                    } else {
                        Decorated {
                            state: NodeState::Running,
                            rerun_child: true,
                        }
                    }
                }
                _ => {
                    memory.count = 0;
                    Decorated::plain(NodeState::Success)
                }
            },
            DecoratorKind::Cooldown { ticks } => {
                memory.ready_at = Some(ctx.tick.saturating_add(ticks));
                Decorated::plain(child)
            }
            kind => Decorated::plain(kind.map(child)),
        }
    }
}

/// Ordered multi-child nodes. Children are always visited in authored order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositeKind {
    /// Restarts from the first child every tick; stops at the first Failure or Running.
    Sequence,
    /// Restarts from the first child every tick; stops at the first Success or Running.
    Selector,
    /// Resumes at the child that was Running last tick; stops at the first Failure or Running.
    MemSequence,
    /// Resumes at the child that was Running last tick; stops at the first Success or Running.
    MemSelector,
    /// Evaluates every unfinished child each tick. Succeeds once `success_threshold` children
    /// succeeded, fails once that is no longer reachable.
    Parallel { success_threshold: usize },
}

impl CompositeKind {
    pub fn name(self) -> &'static str {
        match self {
            CompositeKind::Sequence => "sequence",
            CompositeKind::Selector => "selector",
            CompositeKind::MemSequence => "mem_sequence",
            CompositeKind::MemSelector => "mem_selector",
            CompositeKind::Parallel { .. } => "parallel",
        }
    }

    /// The child result that ends a sequential scan with that same result.
    pub(crate) fn stops_on(self) -> NodeState {
        match self {
            CompositeKind::Selector | CompositeKind::MemSelector => NodeState::Success,
            _ => NodeState::Failure,
        }
    }

    /// Result once every child has been scanned without stopping.
    pub(crate) fn exhausted(self) -> NodeState {
        match self.stops_on() {
            NodeState::Success => NodeState::Failure,
            _ => NodeState::Success,
        }
    }

    pub(crate) fn resumes(self) -> bool {
        matches!(self, CompositeKind::MemSequence | CompositeKind::MemSelector)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct CompositeMemory {
    /// Child that returned Running on the last evaluation.
    pub(crate) running: Option<usize>,
    /// Per-child results kept by `Parallel` until it finishes.
    pub(crate) finished: Vec<Option<NodeState>>,
}

impl CompositeMemory {
    pub(crate) fn clear(&mut self) {
        self.running = None;
        self.finished.clear();
    }
}

/// Verdict of a parallel node given per-child results.
pub(crate) fn parallel_verdict(
    success_threshold: usize,
    finished: &[Option<NodeState>],
) -> NodeState {
    let len = finished.len();
    let threshold = success_threshold.clamp(1, len.max(1));
    let successes = finished
        .iter()
        .filter(|s| **s == Some(NodeState::Success))
        .count();
    let failures = finished
        .iter()
        .filter(|s| **s == Some(NodeState::Failure))
        .count();

    if successes >= threshold {
        NodeState::Success
    } else if len - failures < threshold {
        NodeState::Failure
    } else {
        NodeState::Running
    }
}
