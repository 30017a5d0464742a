use crate::bt::Leaf;
use crate::nodes::{CompositeKind, DecoratorKind};

/// Declarative description of a subtree, turned into template nodes by
/// [`crate::TreeAsset::from_spec`] / [`crate::TreeAsset::add_spec`].
///
/// ```
/// use arbor_bt::{leaves::Always, NodeSpec, NodeState, TreeAsset};
///
/// let asset = TreeAsset::from_spec(
///     "guard",
///     NodeSpec::inverter(
///         "Not",
///         NodeSpec::sequence(
///             "Check",
///             vec![
///                 NodeSpec::leaf("A", Always(NodeState::Success)),
///                 NodeSpec::leaf("B", Always(NodeState::Failure)),
///             ],
///         ),
///     ),
/// );
/// assert!(asset.validate().is_ok());
/// ```
pub enum NodeSpec {
    Decorator {
        name: String,
        kind: DecoratorKind,
        child: Box<NodeSpec>,
    },
    Composite {
        name: String,
        kind: CompositeKind,
        children: Vec<NodeSpec>,
    },
    Leaf {
        name: String,
        leaf: Box<dyn Leaf>,
    },
}

impl NodeSpec {
    pub fn leaf(name: impl Into<String>, leaf: impl Leaf) -> Self {
        NodeSpec::Leaf {
            name: name.into(),
            leaf: Box::new(leaf),
        }
    }

    pub fn decorator(name: impl Into<String>, kind: DecoratorKind, child: NodeSpec) -> Self {
        NodeSpec::Decorator {
            name: name.into(),
            kind,
            child: Box::new(child),
        }
    }

    pub fn inverter(name: impl Into<String>, child: NodeSpec) -> Self {
        Self::decorator(name, DecoratorKind::Inverter, child)
    }

    pub fn composite(
        name: impl Into<String>,
        kind: CompositeKind,
        children: Vec<NodeSpec>,
    ) -> Self {
        NodeSpec::Composite {
            name: name.into(),
            kind,
            children,
        }
    }

    pub fn sequence(name: impl Into<String>, children: Vec<NodeSpec>) -> Self {
        Self::composite(name, CompositeKind::Sequence, children)
    }

    pub fn selector(name: impl Into<String>, children: Vec<NodeSpec>) -> Self {
        Self::composite(name, CompositeKind::Selector, children)
    }

    pub fn parallel(
        name: impl Into<String>,
        success_threshold: usize,
        children: Vec<NodeSpec>,
    ) -> Self {
        Self::composite(name, CompositeKind::Parallel { success_threshold }, children)
    }
}
