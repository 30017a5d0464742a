use std::fmt;

use arbor_core::{Blackboard, TickContext};
use arbor_tools::{emit as trace_emit, TraceEvent};

use crate::asset::{NodeDefKind, TreeAsset};
use crate::bt::{EvalContext, Leaf, NodeCategory, NodeId, NodeState};
use crate::error::ValidationError;
use crate::nodes::{
    parallel_verdict, CompositeKind, CompositeMemory, DecoratorKind, DecoratorMemory,
};

enum NodeKind {
    Root {
        child: NodeId,
    },
    Decorator {
        kind: DecoratorKind,
        child: NodeId,
        memory: DecoratorMemory,
    },
    Composite {
        kind: CompositeKind,
        children: Vec<NodeId>,
        memory: CompositeMemory,
    },
    Leaf(Box<dyn Leaf>),
}

struct Node {
    name: String,
    state: NodeState,
    kind: NodeKind,
}

/// What to do with a node, copied out of the arena so children can be evaluated.
#[derive(Clone, Copy)]
enum Step {
    Delegate(NodeId),
    Decorate(DecoratorKind, NodeId),
    Compose(CompositeKind, usize),
    Leaf,
}

/// Read-only view of one instance node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeView<'a> {
    pub id: NodeId,
    pub name: &'a str,
    pub state: NodeState,
    pub category: NodeCategory,
}

/// Runtime behavior-tree instance owned by exactly one agent.
///
/// Built by [`TreeAsset::instantiate`]: every node is a private copy of the template node, child
/// links point only at copies inside this instance, and the blackboard starts empty. Nothing is
/// shared with the template or with other instances, so an instance can be moved to whichever
/// thread owns its agent. Evaluation itself is single-threaded and never blocks.
pub struct Tree {
    name: String,
    nodes: Vec<Node>,
    root: NodeId,
    blackboard: Blackboard,
    updates: u64,
}

impl Tree {
    pub(crate) fn from_asset(asset: &TreeAsset) -> Result<Self, ValidationError> {
        let template_root = asset.root().ok_or(ValidationError::NoRoot)?;
        let mut nodes = Vec::with_capacity(asset.len());
        let root = copy_node(asset, template_root, &mut nodes)?;
        tracing::debug!(
            tree = asset.name(),
            template_nodes = asset.len(),
            nodes = nodes.len(),
            "instantiated behavior tree"
        );
        Ok(Self {
            name: asset.name().to_string(),
            nodes,
            root,
            blackboard: Blackboard::new(),
            updates: 0,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Aggregate state of the tree, i.e. the root's cached state.
    pub fn state(&self) -> NodeState {
        self.nodes[self.root.0].state
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of updates that actually evaluated the root.
    pub fn updates(&self) -> u64 {
        self.updates
    }

    pub fn blackboard(&self) -> &Blackboard {
        &self.blackboard
    }

    pub fn blackboard_mut(&mut self) -> &mut Blackboard {
        &mut self.blackboard
    }

    pub fn node_state(&self, id: NodeId) -> Option<NodeState> {
        self.nodes.get(id.0).map(|n| n.state)
    }

    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|n| n.name == name)
            .map(NodeId)
    }

    pub fn state_of(&self, name: &str) -> Option<NodeState> {
        self.find(name).and_then(|id| self.node_state(id))
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match self.nodes.get(id.0).map(|n| &n.kind) {
            Some(NodeKind::Root { child }) | Some(NodeKind::Decorator { child, .. }) => {
                std::slice::from_ref(child)
            }
            Some(NodeKind::Composite { children, .. }) => children,
            _ => &[],
        }
    }

    pub fn nodes(&self) -> impl Iterator<Item = NodeView<'_>> + '_ {
        self.nodes.iter().enumerate().map(|(i, n)| NodeView {
            id: NodeId(i),
            name: &n.name,
            state: n.state,
            category: match n.kind {
                NodeKind::Root { .. } => NodeCategory::Root,
                NodeKind::Decorator { .. } => NodeCategory::Decorator,
                NodeKind::Composite { .. } => NodeCategory::Composite,
                NodeKind::Leaf(_) => NodeCategory::Leaf,
            },
        })
    }

    /// Evaluates the root once if the tree is still running. A finished tree stays finished
    /// until [`Tree::reset`] is called. Recurses once per level; see [`TreeAsset::instantiate`]
    /// for the depth bound.
    pub fn update(&mut self, ctx: &TickContext) -> NodeState {
        let current = self.state();
        if current.is_finished() {
            return current;
        }

        self.updates = self.updates.saturating_add(1);
        let state = self.evaluate(self.root, ctx);
        if state.is_finished() {
            tracing::debug!(
                tree = %self.name,
                tick = ctx.tick,
                updates = self.updates,
                %state,
                "behavior tree finished"
            );
            trace_emit(
                &mut self.blackboard,
                TraceEvent::new(ctx.tick, "bt.tree.done")
                    .with_a(self.updates)
                    .with_b(state.code()),
            );
        }
        state
    }

    /// Puts every node back to `Running` and drops all progress kept by composites, decorators
    /// and leaves. The blackboard and cooldown timers are left untouched. `ctx` stamps the
    /// `bt.tree.reset` trace event.
    pub fn reset(&mut self, ctx: &TickContext) {
        for node in self.nodes.iter_mut() {
            node.state = NodeState::Running;
            match &mut node.kind {
                NodeKind::Root { .. } => {}
                NodeKind::Decorator { memory, .. } => memory.count = 0,
                NodeKind::Composite { memory, .. } => memory.clear(),
                NodeKind::Leaf(leaf) => leaf.reset(),
            }
        }
        tracing::debug!(tree = %self.name, tick = ctx.tick, "behavior tree reset");
        trace_emit(
            &mut self.blackboard,
            TraceEvent::new(ctx.tick, "bt.tree.reset").with_a(self.updates),
        );
    }

    fn step(&self, id: NodeId) -> Step {
        match &self.nodes[id.0].kind {
            NodeKind::Root { child } => Step::Delegate(*child),
            NodeKind::Decorator { kind, child, .. } => Step::Decorate(*kind, *child),
            NodeKind::Composite { kind, children, .. } => Step::Compose(*kind, children.len()),
            NodeKind::Leaf(_) => Step::Leaf,
        }
    }

    fn evaluate(&mut self, id: NodeId, ctx: &TickContext) -> NodeState {
        let state = match self.step(id) {
            Step::Delegate(child) => self.evaluate(child, ctx),
            Step::Decorate(kind, child) => self.evaluate_decorator(id, kind, child, ctx),
            Step::Compose(CompositeKind::Parallel { success_threshold }, len) => {
                self.evaluate_parallel(id, success_threshold, len, ctx)
            }
            Step::Compose(kind, len) => self.evaluate_scan(id, kind, len, ctx),
            Step::Leaf => self.evaluate_leaf(id, ctx),
        };

        let node = &mut self.nodes[id.0];
        node.state = state;
        tracing::trace!(tree = %self.name, node = %node.name, %state, "evaluated");
        trace_emit(
            &mut self.blackboard,
            TraceEvent::new(ctx.tick, "bt.node.state")
                .with_a(id.0 as u64)
                .with_b(state.code()),
        );
        state
    }

    fn evaluate_leaf(&mut self, id: NodeId, ctx: &TickContext) -> NodeState {
        let node = &mut self.nodes[id.0];
        let NodeKind::Leaf(leaf) = &mut node.kind else {
            return node.state;
        };
        let mut eval = EvalContext::new(ctx, &mut self.blackboard, id, &node.name);
        leaf.evaluate(&mut eval)
    }

    fn evaluate_decorator(
        &mut self,
        id: NodeId,
        kind: DecoratorKind,
        child: NodeId,
        ctx: &TickContext,
    ) -> NodeState {
        let mut memory = self.decorator_memory(id);
        if let Some(state) = kind.gate(&memory, ctx) {
            return state;
        }

        let child_state = self.evaluate(child, ctx);
        let decorated = kind.decorate(&mut memory, ctx, child_state);
        self.set_decorator_memory(id, memory);
        if decorated.rerun_child {
            self.abandon(child);
        }
        decorated.state
    }

    /// Sequence and selector variants: scan children in authored order until one stops the scan.
    fn evaluate_scan(
        &mut self,
        id: NodeId,
        kind: CompositeKind,
        len: usize,
        ctx: &TickContext,
    ) -> NodeState {
        let previous = self.composite_memory(id, |m| m.running);
        let start = if kind.resumes() {
            previous.unwrap_or(0)
        } else {
            0
        };

        for i in start..len {
            let Some(child) = self.child_at(id, i) else {
                break;
            };
            let state = self.evaluate(child, ctx);

            if state.is_running() {
                if previous != Some(i) {
                    if let Some(prev) = previous.and_then(|p| self.child_at(id, p)) {
                        self.abandon(prev);
                    }
                    self.composite_memory(id, |m| m.running = Some(i));
                }
                return NodeState::Running;
            }

            if state == kind.stops_on() {
                self.abandon(id);
                return state;
            }
        }

        self.abandon(id);
        kind.exhausted()
    }

    fn evaluate_parallel(
        &mut self,
        id: NodeId,
        success_threshold: usize,
        len: usize,
        ctx: &TickContext,
    ) -> NodeState {
        let mut finished = self.composite_memory(id, |m| std::mem::take(&mut m.finished));
        finished.resize(len, None);

        for (i, slot) in finished.iter_mut().enumerate() {
            if slot.is_some() {
                continue;
            }
            let Some(child) = self.child_at(id, i) else {
                break;
            };
            let state = self.evaluate(child, ctx);
            if state.is_finished() {
                *slot = Some(state);
            }
        }

        let verdict = parallel_verdict(success_threshold, &finished);
        if verdict.is_running() {
            self.composite_memory(id, |m| m.finished = finished);
        } else {
            self.abandon(id);
        }
        verdict
    }

    /// Drops the cross-tick progress of a subtree without touching cached states. Cooldown
    /// timers survive.
    fn abandon(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(id) = stack.pop() {
            match &mut self.nodes[id.0].kind {
                NodeKind::Root { child } => stack.push(*child),
                NodeKind::Decorator { child, memory, .. } => {
                    memory.count = 0;
                    stack.push(*child);
                }
                NodeKind::Composite {
                    children, memory, ..
                } => {
                    memory.clear();
                    stack.extend(children.iter().copied());
                }
                NodeKind::Leaf(leaf) => leaf.reset(),
            }
        }
    }

    fn child_at(&self, id: NodeId, index: usize) -> Option<NodeId> {
        match &self.nodes[id.0].kind {
            NodeKind::Composite { children, .. } => children.get(index).copied(),
            _ => None,
        }
    }

    fn decorator_memory(&self, id: NodeId) -> DecoratorMemory {
        match &self.nodes[id.0].kind {
            NodeKind::Decorator { memory, .. } => *memory,
            _ => DecoratorMemory::default(),
        }
    }

    fn set_decorator_memory(&mut self, id: NodeId, value: DecoratorMemory) {
        if let NodeKind::Decorator { memory, .. } = &mut self.nodes[id.0].kind {
            *memory = value;
        }
    }

    fn composite_memory<R: Default>(
        &mut self,
        id: NodeId,
        f: impl FnOnce(&mut CompositeMemory) -> R,
    ) -> R {
        match &mut self.nodes[id.0].kind {
            NodeKind::Composite { memory, .. } => f(memory),
            _ => R::default(),
        }
    }
}

impl fmt::Debug for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("name", &self.name)
            .field("state", &self.state())
            .field("nodes", &self.nodes.len())
            .field("updates", &self.updates)
            .field("blackboard", &self.blackboard)
            .finish()
    }
}

/// Copies the template subtree under `id` into `out`, children first, rebinding every child
/// link to the fresh copies. Returns the id of the copy of `id`.
fn copy_node(
    asset: &TreeAsset,
    id: NodeId,
    out: &mut Vec<Node>,
) -> Result<NodeId, ValidationError> {
    let def = asset.def(id);
    let kind = match def.kind() {
        NodeDefKind::Root { child } => {
            let child = child.ok_or(ValidationError::RootWithoutChild)?;
            NodeKind::Root {
                child: copy_node(asset, child, out)?,
            }
        }
        NodeDefKind::Decorator { kind, child } => {
            let child = child.ok_or_else(|| ValidationError::DecoratorWithoutChild {
                name: def.name().to_string(),
            })?;
            NodeKind::Decorator {
                kind: *kind,
                child: copy_node(asset, child, out)?,
                memory: DecoratorMemory::default(),
            }
        }
        NodeDefKind::Composite { kind, children } => {
            if children.is_empty() {
                return Err(ValidationError::CompositeWithoutChildren {
                    name: def.name().to_string(),
                });
            }
            let children = children
                .iter()
                .map(|c| copy_node(asset, *c, out))
                .collect::<Result<Vec<_>, _>>()?;
            NodeKind::Composite {
                kind: *kind,
                children,
                memory: CompositeMemory::default(),
            }
        }
        NodeDefKind::Leaf(leaf) => NodeKind::Leaf(leaf.clone()),
    };

    let copy = NodeId(out.len());
    out.push(Node {
        name: def.name().to_string(),
        state: NodeState::Running,
        kind,
    });
    Ok(copy)
}
