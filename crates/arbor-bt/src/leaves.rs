//! Reference leaf nodes.

use arbor_core::{BbKey, Blackboard, TickContext};

use crate::bt::{EvalContext, Leaf, NodeState};

/// Success when the predicate holds, Failure otherwise. Never Running.
#[derive(Clone)]
pub struct Condition<F> {
    cond: F,
}

impl<F> Condition<F>
where
    F: FnMut(&TickContext, &Blackboard) -> bool + Clone + Send + 'static,
{
    pub fn new(cond: F) -> Self {
        Self { cond }
    }
}

impl<F> Leaf for Condition<F>
where
    F: FnMut(&TickContext, &Blackboard) -> bool + Clone + Send + 'static,
{
    fn evaluate(&mut self, ctx: &mut EvalContext<'_>) -> NodeState {
        if (self.cond)(ctx.tick, &*ctx.blackboard) {
            NodeState::Success
        } else {
            NodeState::Failure
        }
    }
}

/// Runs a closure with full access to the evaluation context and returns its state.
///
/// Each instance owns its own copy of the closure; captured `Arc`s are still shared, which is
/// the caller's choice.
#[derive(Clone)]
pub struct Task<F> {
    run: F,
}

impl<F> Task<F>
where
    F: FnMut(&mut EvalContext<'_>) -> NodeState + Clone + Send + 'static,
{
    pub fn new(run: F) -> Self {
        Self { run }
    }
}

impl<F> Leaf for Task<F>
where
    F: FnMut(&mut EvalContext<'_>) -> NodeState + Clone + Send + 'static,
{
    fn evaluate(&mut self, ctx: &mut EvalContext<'_>) -> NodeState {
        (self.run)(ctx)
    }
}

/// Always reports the same state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Always(pub NodeState);

impl Leaf for Always {
    fn evaluate(&mut self, _ctx: &mut EvalContext<'_>) -> NodeState {
        self.0
    }
}

/// Running for `ticks` evaluations, then Success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wait {
    ticks: u32,
    elapsed: u32,
}

impl Wait {
    pub fn new(ticks: u32) -> Self {
        Self { ticks, elapsed: 0 }
    }

    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }
}

impl Leaf for Wait {
    fn evaluate(&mut self, _ctx: &mut EvalContext<'_>) -> NodeState {
        if self.elapsed >= self.ticks {
            self.elapsed = 0;
            return NodeState::Success;
        }
        self.elapsed += 1;
        NodeState::Running
    }

    fn reset(&mut self) {
        self.elapsed = 0;
    }
}

/// Writes a fixed value to the blackboard and succeeds.
#[derive(Debug, Clone)]
pub struct SetValue<T: 'static> {
    key: BbKey<T>,
    value: T,
}

impl<T: 'static> SetValue<T> {
    pub fn new(key: BbKey<T>, value: T) -> Self {
        Self { key, value }
    }
}

impl<T> Leaf for SetValue<T>
where
    T: Clone + Send + 'static,
{
    fn evaluate(&mut self, ctx: &mut EvalContext<'_>) -> NodeState {
        ctx.blackboard.set(self.key, self.value.clone());
        NodeState::Success
    }
}

/// Success when the key is present on the blackboard.
#[derive(Debug)]
pub struct HasKey<T: 'static> {
    key: BbKey<T>,
}

impl<T: 'static> Clone for HasKey<T> {
    fn clone(&self) -> Self {
        Self { key: self.key }
    }
}

impl<T: 'static> HasKey<T> {
    pub fn new(key: BbKey<T>) -> Self {
        Self { key }
    }
}

impl<T: 'static> Leaf for HasKey<T> {
    fn evaluate(&mut self, ctx: &mut EvalContext<'_>) -> NodeState {
        if ctx.blackboard.contains(self.key) {
            NodeState::Success
        } else {
            NodeState::Failure
        }
    }
}
