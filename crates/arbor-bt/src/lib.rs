//! Behavior tree templates, validation and per-agent instances built on `arbor-core`.
//!
//! A [`TreeAsset`] is authored once and validated; every agent then gets its own [`Tree`] via
//! [`TreeAsset::instantiate`] and calls [`Tree::update`] once per tick.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod asset;
pub mod brain;
pub mod bt;
pub mod builder;
pub mod error;
pub mod leaves;
pub mod nodes;
pub mod tree;
mod validate;

pub use asset::{NodeDef, NodeDefKind, TreeAsset};
pub use brain::{tick_brains, Brain};
pub use bt::{EvalContext, Leaf, LeafClone, NodeCategory, NodeId, NodeState};
pub use builder::NodeSpec;
pub use error::{AssetError, ValidationError};
// Defaults: reactive control flow (re-checks earlier children every tick).
//
// Memory variants are `CompositeKind::MemSequence` / `CompositeKind::MemSelector` for cases where
// you explicitly want "resume running child without re-checking earlier conditions".
pub use nodes::{CompositeKind, DecoratorKind};
pub use tree::{NodeView, Tree};
