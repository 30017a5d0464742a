use thiserror::Error;

use crate::bt::NodeId;

/// Structural problems found by [`crate::TreeAsset::validate`].
///
/// Only the first violation is reported; the first four are checked in the order listed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("the tree has no root node")]
    NoRoot,

    #[error("the root node has no child")]
    RootWithoutChild,

    #[error("the decorator node {name} has no child")]
    DecoratorWithoutChild { name: String },

    #[error("the composite node {name} has no children")]
    CompositeWithoutChildren { name: String },

    #[error("the node {parent} lists the root node as a child")]
    RootAsChild { parent: String },

    #[error("the node {name} has more than one parent")]
    SharedChild { name: String },

    #[error("the node {name} is part of a cycle")]
    Cycle { name: String },
}

/// Mistakes made while wiring a template asset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetError {
    #[error("unknown node {0}")]
    UnknownNode(NodeId),

    #[error("the tree already has a root node ({0})")]
    RootAlreadySet(NodeId),

    #[error("the node {name} cannot hold a single child")]
    NotSingleParent { name: String },

    #[error("the node {name} is not a composite")]
    NotComposite { name: String },
}
