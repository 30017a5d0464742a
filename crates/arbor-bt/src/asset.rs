use arbor_core::Blackboard;

use crate::bt::{Leaf, NodeCategory, NodeId};
use crate::builder::NodeSpec;
use crate::error::{AssetError, ValidationError};
use crate::nodes::{CompositeKind, DecoratorKind};
use crate::tree::Tree;
use crate::validate;

/// Authored shape of a template node.
pub enum NodeDefKind {
    Root { child: Option<NodeId> },
    Decorator { kind: DecoratorKind, child: Option<NodeId> },
    Composite { kind: CompositeKind, children: Vec<NodeId> },
    Leaf(Box<dyn Leaf>),
}

pub struct NodeDef {
    name: String,
    kind: NodeDefKind,
}

impl NodeDef {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &NodeDefKind {
        &self.kind
    }

    pub fn category(&self) -> NodeCategory {
        match self.kind {
            NodeDefKind::Root { .. } => NodeCategory::Root,
            NodeDefKind::Decorator { .. } => NodeCategory::Decorator,
            NodeDefKind::Composite { .. } => NodeCategory::Composite,
            NodeDefKind::Leaf(_) => NodeCategory::Leaf,
        }
    }

    pub fn children(&self) -> &[NodeId] {
        match &self.kind {
            NodeDefKind::Root { child } | NodeDefKind::Decorator { child, .. } => child.as_slice(),
            NodeDefKind::Composite { children, .. } => children,
            NodeDefKind::Leaf(_) => &[],
        }
    }
}

/// Template behavior tree.
///
/// Holds the flat registry of every authored node (including ones not yet wired to the root)
/// and is never evaluated itself. Agents get their own [`Tree`] through
/// [`TreeAsset::instantiate`].
pub struct TreeAsset {
    name: String,
    nodes: Vec<NodeDef>,
    root: Option<NodeId>,
    blackboard: Blackboard,
}

impl TreeAsset {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: Vec::new(),
            root: None,
            blackboard: Blackboard::new(),
        }
    }

    /// Builds a template whose root (named `Root`) owns `child`.
    pub fn from_spec(name: impl Into<String>, child: NodeSpec) -> Self {
        let mut asset = Self::new(name);
        let root = asset.push("Root", NodeDefKind::Root { child: None });
        asset.root = Some(root);
        let child = asset.add_spec(child);
        asset.nodes[root.0].kind = NodeDefKind::Root { child: Some(child) };
        asset
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> Option<&NodeDef> {
        self.nodes.get(id.0)
    }

    /// Registry order, which is also the order validation walks.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &NodeDef)> + '_ {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.nodes().find(|(_, n)| n.name == name).map(|(id, _)| id)
    }

    /// Authoring-time blackboard. Instances never see its contents.
    pub fn blackboard(&self) -> &Blackboard {
        &self.blackboard
    }

    pub fn blackboard_mut(&mut self) -> &mut Blackboard {
        &mut self.blackboard
    }

    pub fn add_root(&mut self, name: impl Into<String>) -> Result<NodeId, AssetError> {
        if let Some(root) = self.root {
            return Err(AssetError::RootAlreadySet(root));
        }
        let id = self.push(name, NodeDefKind::Root { child: None });
        self.root = Some(id);
        Ok(id)
    }

    pub fn add_decorator(&mut self, name: impl Into<String>, kind: DecoratorKind) -> NodeId {
        self.push(name, NodeDefKind::Decorator { kind, child: None })
    }

    pub fn add_composite(&mut self, name: impl Into<String>, kind: CompositeKind) -> NodeId {
        self.push(
            name,
            NodeDefKind::Composite {
                kind,
                children: Vec::new(),
            },
        )
    }

    pub fn add_leaf(&mut self, name: impl Into<String>, leaf: impl Leaf) -> NodeId {
        self.push(name, NodeDefKind::Leaf(Box::new(leaf)))
    }

    /// Adds a whole subtree and returns the id of its top node.
    pub fn add_spec(&mut self, spec: NodeSpec) -> NodeId {
        match spec {
            NodeSpec::Decorator { name, kind, child } => {
                let child = self.add_spec(*child);
                self.push(
                    name,
                    NodeDefKind::Decorator {
                        kind,
                        child: Some(child),
                    },
                )
            }
            NodeSpec::Composite {
                name,
                kind,
                children,
            } => {
                let children = children
                    .into_iter()
                    .map(|c| self.add_spec(c))
                    .collect::<Vec<_>>();
                self.push(name, NodeDefKind::Composite { kind, children })
            }
            NodeSpec::Leaf { name, leaf } => self.push(name, NodeDefKind::Leaf(leaf)),
        }
    }

    /// Wires the single child of a root or decorator, replacing any previous child.
    pub fn set_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), AssetError> {
        self.check(child)?;
        let node = self.node_mut(parent)?;
        match &mut node.kind {
            NodeDefKind::Root { child: slot } | NodeDefKind::Decorator { child: slot, .. } => {
                *slot = Some(child);
                Ok(())
            }
            _ => Err(AssetError::NotSingleParent {
                name: node.name.clone(),
            }),
        }
    }

    pub fn clear_child(&mut self, parent: NodeId) -> Result<Option<NodeId>, AssetError> {
        let node = self.node_mut(parent)?;
        match &mut node.kind {
            NodeDefKind::Root { child } | NodeDefKind::Decorator { child, .. } => Ok(child.take()),
            _ => Err(AssetError::NotSingleParent {
                name: node.name.clone(),
            }),
        }
    }

    /// Appends `child` to a composite's ordered children.
    pub fn push_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), AssetError> {
        self.check(child)?;
        let node = self.node_mut(parent)?;
        match &mut node.kind {
            NodeDefKind::Composite { children, .. } => {
                children.push(child);
                Ok(())
            }
            _ => Err(AssetError::NotComposite {
                name: node.name.clone(),
            }),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate::validate(self)
    }

    /// Clones the template into an independent runtime instance with its own nodes and a fresh
    /// blackboard. Refuses invalid templates.
    ///
    /// Copying here and evaluation in [`Tree::update`] recurse once per level of nesting, so tree
    /// depth is bounded by the calling thread's stack. Authored trees are expected to be shallow
    /// (a few hundred levels at most); width is not limited.
    pub fn instantiate(&self) -> Result<Tree, ValidationError> {
        self.validate()?;
        Tree::from_asset(self)
    }

    pub(crate) fn push(&mut self, name: impl Into<String>, kind: NodeDefKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeDef {
            name: name.into(),
            kind,
        });
        id
    }

    /// Ids are only handed out by this asset and nodes are never removed, so they stay in range.
    pub(crate) fn def(&self, id: NodeId) -> &NodeDef {
        &self.nodes[id.0]
    }

    fn check(&self, id: NodeId) -> Result<(), AssetError> {
        if id.0 < self.nodes.len() {
            Ok(())
        } else {
            Err(AssetError::UnknownNode(id))
        }
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut NodeDef, AssetError> {
        self.nodes.get_mut(id.0).ok_or(AssetError::UnknownNode(id))
    }
}
