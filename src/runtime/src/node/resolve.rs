//! Target node selection.
//!
//! Every node of the cluster is a target unless the caller names a subset,
//! in which case each requested name must match a node exactly.

use std::collections::HashMap;

use nodeload_core::error::{LoadError, Result};

use super::Node;

/// Index nodes by name. Later nodes win on duplicate names.
pub fn nodes_by_name(nodes: &[Node]) -> HashMap<&str, &Node> {
    nodes.iter().map(|node| (node.name(), node)).collect()
}

/// Pick the target nodes for a load.
///
/// Fails with `NoNodesFound` when the cluster has no nodes and with
/// `UnknownNode` for the first requested name that matches no node.
pub fn resolve(
    cluster: &str,
    all_nodes: Vec<Node>,
    requested: Option<&[String]>,
) -> Result<Vec<Node>> {
    if all_nodes.is_empty() {
        return Err(LoadError::NoNodesFound {
            cluster: cluster.to_string(),
        });
    }

    let requested = match requested {
        Some(names) if !names.is_empty() => names,
        _ => return Ok(all_nodes),
    };

    let by_name = nodes_by_name(&all_nodes);
    requested
        .iter()
        .map(|name| {
            by_name
                .get(name.as_str())
                .map(|node| (*node).clone())
                .ok_or_else(|| LoadError::UnknownNode(name.clone()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cluster_nodes() -> Vec<Node> {
        vec![Node::new("n1"), Node::new("n2"), Node::new("n3")]
    }

    fn names(nodes: &[Node]) -> Vec<&str> {
        nodes.iter().map(|n| n.name()).collect()
    }

    #[test]
    fn test_resolve_subset() {
        let requested = vec!["n2".to_string()];
        let nodes = resolve("kind", cluster_nodes(), Some(requested.as_slice())).unwrap();
        assert_eq!(names(&nodes), vec!["n2"]);
    }

    #[test]
    fn test_resolve_keeps_requested_order() {
        let requested = vec!["n3".to_string(), "n1".to_string()];
        let nodes = resolve("kind", cluster_nodes(), Some(requested.as_slice())).unwrap();
        assert_eq!(names(&nodes), vec!["n3", "n1"]);
    }

    #[test]
    fn test_resolve_unknown_node() {
        let requested = vec!["n2".to_string(), "n4".to_string()];
        let err = resolve("kind", cluster_nodes(), Some(requested.as_slice())).unwrap_err();
        assert!(matches!(err, LoadError::UnknownNode(ref name) if name == "n4"));
    }

    #[test]
    fn test_resolve_all_when_absent() {
        let nodes = resolve("kind", cluster_nodes(), None).unwrap();
        assert_eq!(names(&nodes), vec!["n1", "n2", "n3"]);
    }

    #[test]
    fn test_resolve_all_when_empty() {
        let nodes = resolve("kind", cluster_nodes(), Some(Vec::<String>::new().as_slice())).unwrap();
        assert_eq!(nodes.len(), 3);
    }

    #[test]
    fn test_resolve_no_nodes() {
        let err = resolve("dev", Vec::new(), None).unwrap_err();
        assert!(matches!(err, LoadError::NoNodesFound { ref cluster } if cluster == "dev"));
    }

    #[test]
    fn test_resolve_no_nodes_checked_before_names() {
        let requested = vec!["n1".to_string()];
        let err = resolve("dev", Vec::new(), Some(requested.as_slice())).unwrap_err();
        assert!(matches!(err, LoadError::NoNodesFound { .. }));
    }

    #[test]
    fn test_name_match_is_exact() {
        let requested = vec!["N1".to_string()];
        let err = resolve("kind", cluster_nodes(), Some(requested.as_slice())).unwrap_err();
        assert!(matches!(err, LoadError::UnknownNode(_)));
    }

    #[test]
    fn test_nodes_by_name_last_wins() {
        let nodes = vec![Node::new("a"), Node::new("b"), Node::new("a")];
        let index = nodes_by_name(&nodes);
        assert_eq!(index.len(), 2);
        assert!(std::ptr::eq(index["a"], &nodes[2]));
    }
}
