use arbor_core::{AgentId, BrainConfig, RestartPolicy, TickContext};

use crate::asset::TreeAsset;
use crate::bt::NodeState;
use crate::error::ValidationError;
use crate::tree::Tree;

/// Hosts one tree instance on behalf of an agent.
///
/// The brain clones its template once at spawn, updates the instance on think ticks, and
/// decides whether a finished tree is restarted (see [`RestartPolicy`]). It never reaches into
/// node internals.
#[derive(Debug)]
pub struct Brain<A>
where
    A: AgentId,
{
    pub agent: A,
    pub config: BrainConfig,
    tree: Tree,
    last: NodeState,
}

impl<A> Brain<A>
where
    A: AgentId,
{
    pub fn new(agent: A, tree: Tree) -> Self {
        let last = tree.state();
        Self {
            agent,
            config: BrainConfig::default(),
            tree,
            last,
        }
    }

    pub fn spawn(agent: A, asset: &TreeAsset) -> Result<Self, ValidationError> {
        let tree = asset.instantiate()?;
        tracing::debug!(agent = ?agent, tree = asset.name(), "spawned brain");
        Ok(Self::new(agent, tree))
    }

    pub fn with_config(mut self, config: BrainConfig) -> Self {
        self.config = config;
        self
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Mutable access for the host, e.g. to write perception facts to the blackboard.
    pub fn tree_mut(&mut self) -> &mut Tree {
        &mut self.tree
    }

    pub fn last_status(&self) -> NodeState {
        self.last
    }

    pub fn tick(&mut self, ctx: &TickContext) -> NodeState {
        if !self.config.should_think(ctx.tick) {
            return self.last;
        }

        if self.tree.state().is_finished() && self.config.restart == RestartPolicy::OnFinish {
            tracing::debug!(agent = ?self.agent, tick = ctx.tick, "restarting finished tree");
            self.tree.reset(ctx);
        }

        self.last = self.tree.update(ctx);
        self.last
    }
}

/// Ticks every brain once, in stable agent order.
pub fn tick_brains<A>(ctx: &TickContext, brains: &mut [Brain<A>])
where
    A: AgentId,
{
    brains.sort_by_key(|b| b.agent.stable_id());
    for brain in brains.iter_mut() {
        brain.tick(ctx);
    }
}
