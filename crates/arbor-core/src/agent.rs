use core::fmt::Debug;

/// Stable identifier for an agent hosting a tree instance.
///
/// Hosts tick agents in a deterministic order:
/// - stable ordering (`Ord`)
/// - a stable numeric ID (`stable_id`) for think-cadence offsets and logs
pub trait AgentId: Copy + Ord + Eq + Debug {
    fn stable_id(self) -> u64;
}

impl AgentId for u64 {
    fn stable_id(self) -> u64 {
        self
    }
}

impl AgentId for u32 {
    fn stable_id(self) -> u64 {
        self as u64
    }
}

impl AgentId for usize {
    fn stable_id(self) -> u64 {
        self as u64
    }
}
