use crate::asset::{NodeDefKind, TreeAsset};
use crate::bt::NodeId;
use crate::error::ValidationError;

/// First violation wins; see [`ValidationError`] for the order.
pub(crate) fn validate(asset: &TreeAsset) -> Result<(), ValidationError> {
    let root = asset.root().ok_or(ValidationError::NoRoot)?;
    let root_node = asset.node(root).ok_or(ValidationError::NoRoot)?;
    if root_node.children().is_empty() {
        return Err(ValidationError::RootWithoutChild);
    }

    for (_, node) in asset.nodes() {
        match node.kind() {
            NodeDefKind::Decorator { child: None, .. } => {
                return Err(ValidationError::DecoratorWithoutChild {
                    name: node.name().to_string(),
                });
            }
            NodeDefKind::Composite { children, .. } if children.is_empty() => {
                return Err(ValidationError::CompositeWithoutChildren {
                    name: node.name().to_string(),
                });
            }
            _ => {}
        }
    }

    let mut parent: Vec<Option<NodeId>> = vec![None; asset.len()];
    for (id, node) in asset.nodes() {
        for &child in node.children() {
            if child == root {
                return Err(ValidationError::RootAsChild {
                    parent: node.name().to_string(),
                });
            }
            let slot = &mut parent[child.index()];
            if slot.is_some() {
                let name = asset.node(child).map(|n| n.name()).unwrap_or_default();
                return Err(ValidationError::SharedChild {
                    name: name.to_string(),
                });
            }
            *slot = Some(id);
        }
    }

    // With single ownership, a cycle is a parent chain that comes back to where it started.
    for (id, node) in asset.nodes() {
        let mut cursor = parent[id.index()];
        let mut steps = 0;
        while let Some(p) = cursor {
            if p == id {
                return Err(ValidationError::Cycle {
                    name: node.name().to_string(),
                });
            }
            steps += 1;
            if steps > asset.len() {
                break;
            }
            cursor = parent[p.index()];
        }
    }

    Ok(())
}
