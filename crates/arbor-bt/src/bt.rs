use std::fmt;

use arbor_core::{Blackboard, TickContext};

/// Result of evaluating a node.
///
/// `Running` is a plain value meaning "not finished across ticks"; evaluation itself always
/// completes within the tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeState {
    Running,
    Success,
    Failure,
}

impl NodeState {
    pub fn is_running(self) -> bool {
        self == NodeState::Running
    }

    pub fn is_finished(self) -> bool {
        !self.is_running()
    }

    /// Numeric code used in trace events.
    pub fn code(self) -> u64 {
        match self {
            NodeState::Running => 0,
            NodeState::Success => 1,
            NodeState::Failure => 2,
        }
    }
}

impl fmt::Display for NodeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NodeState::Running => "running",
            NodeState::Success => "success",
            NodeState::Failure => "failure",
        })
    }
}

/// Index of a node inside one arena (a template asset or a tree instance).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a leaf sees while it is evaluated.
pub struct EvalContext<'a> {
    pub tick: &'a TickContext,
    pub blackboard: &'a mut Blackboard,
    pub(crate) node: NodeId,
    pub(crate) name: &'a str,
}

impl<'a> EvalContext<'a> {
    pub fn new(
        tick: &'a TickContext,
        blackboard: &'a mut Blackboard,
        node: NodeId,
        name: &'a str,
    ) -> Self {
        Self {
            tick,
            blackboard,
            node,
            name,
        }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn node_name(&self) -> &str {
        self.name
    }
}

/// Terminal action or condition.
///
/// Implementations read and write only the blackboard and their own fields, and must tolerate
/// being evaluated again on every tick while they report `Running`. Any `Clone` leaf gets
/// [`LeafClone`] for free, which is how instances get private copies.
pub trait Leaf: LeafClone + Send + 'static {
    fn evaluate(&mut self, ctx: &mut EvalContext<'_>) -> NodeState;

    /// Drop progress kept across ticks. Called when an ancestor finishes or abandons this branch,
    /// and on [`crate::Tree::reset`].
    fn reset(&mut self) {}
}

pub trait LeafClone {
    fn clone_leaf(&self) -> Box<dyn Leaf>;
}

impl<T> LeafClone for T
where
    T: Leaf + Clone,
{
    fn clone_leaf(&self) -> Box<dyn Leaf> {
        Box::new(self.clone())
    }
}

impl Clone for Box<dyn Leaf> {
    fn clone(&self) -> Self {
        self.clone_leaf()
    }
}

/// Coarse node taxonomy, used for inspection and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NodeCategory {
    Root,
    Decorator,
    Composite,
    Leaf,
}
