//! Graph-structured data sets for Sankey and tree series.
//!
//! Nodes own a value; edges reference two nodes by name. The builder
//! API auto-adds unregistered edge endpoints, so after construction
//! every edge normally resolves. Validation still runs the full check
//! sequence: duplicate names, edge resolution, and an explicit DFS
//! cycle scan. Any failure rejects the whole structure.

use std::collections::HashMap;

use plotdoc_core::ValidateError;

use crate::part::Encoder;

/// A named node with an optional value.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
    pub name: String,
    pub value: Option<f64>,
}

/// A directed edge between two nodes, referenced by name.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphEdge {
    pub from: String,
    pub to: String,
    pub value: Option<f64>,
}

/// Node/edge data set for Sankey series.
#[derive(Clone, Debug, Default)]
pub struct GraphData {
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,
}

impl GraphData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    /// Add a node. Duplicates are caught at validation, not here.
    pub fn add_node(&mut self, name: impl Into<String>, value: Option<f64>) -> &mut Self {
        self.nodes.push(GraphNode {
            name: name.into(),
            value,
        });
        self
    }

    /// Add an edge, auto-adding either endpoint that is not yet a
    /// registered node.
    pub fn add_edge(
        &mut self,
        from: impl Into<String>,
        to: impl Into<String>,
        value: Option<f64>,
    ) -> &mut Self {
        let (from, to) = (from.into(), to.into());
        for endpoint in [&from, &to] {
            if !self.nodes.iter().any(|n| &n.name == endpoint) {
                self.nodes.push(GraphNode {
                    name: endpoint.clone(),
                    value: None,
                });
            }
        }
        self.edges.push(GraphEdge { from, to, value });
        self
    }

    /// Add an edge without the auto-add step, for data built from an
    /// external description whose endpoints may be missing.
    pub fn add_raw_edge(&mut self, edge: GraphEdge) -> &mut Self {
        self.edges.push(edge);
        self
    }

    /// Run the structural checks, in order: duplicate node names, edge
    /// resolution, cycle detection. `part` is the label used in the
    /// error, e.g. `sankey chart 'flows'`.
    pub fn validate(&self, part: &str) -> Result<(), ValidateError> {
        let index = self.check_duplicate_names(part)?;
        let adjacency = self.build_adjacency(&index, part)?;
        self.check_cycles(&adjacency, part)
    }

    fn check_duplicate_names(&self, part: &str) -> Result<HashMap<&str, usize>, ValidateError> {
        let mut index = HashMap::with_capacity(self.nodes.len());
        for (i, node) in self.nodes.iter().enumerate() {
            if index.insert(node.name.as_str(), i).is_some() {
                return Err(ValidateError::DuplicateNodeName {
                    name: node.name.clone(),
                    part: part.to_string(),
                });
            }
        }
        Ok(index)
    }

    fn build_adjacency(
        &self,
        index: &HashMap<&str, usize>,
        part: &str,
    ) -> Result<Vec<Vec<usize>>, ValidateError> {
        let mut adjacency = vec![Vec::new(); self.nodes.len()];
        for edge in &self.edges {
            let invalid = |reason: &str| ValidateError::InvalidEdge {
                from: edge.from.clone(),
                to: edge.to.clone(),
                part: part.to_string(),
                reason: reason.to_string(),
            };
            let from = *index
                .get(edge.from.as_str())
                .ok_or_else(|| invalid("no such source node"))?;
            let to = *index
                .get(edge.to.as_str())
                .ok_or_else(|| invalid("no such target node"))?;
            adjacency[from].push(to);
        }
        Ok(adjacency)
    }

    // DFS coloring with two sets: `visited` is the black set, `on_path`
    // the gray set. Re-entering a gray node is a cycle; black nodes are
    // not re-explored. The walk keeps an explicit stack of (node, next
    // edge) frames, so validation depth is independent of chain length.
    fn check_cycles(&self, adjacency: &[Vec<usize>], part: &str) -> Result<(), ValidateError> {
        let mut visited = vec![false; self.nodes.len()];
        let mut on_path = vec![false; self.nodes.len()];
        let mut stack: Vec<(usize, usize)> = Vec::new();

        for start in 0..self.nodes.len() {
            if visited[start] {
                continue;
            }
            visited[start] = true;
            on_path[start] = true;
            stack.push((start, 0));

            while let Some((node, edge)) = stack.last_mut() {
                let node = *node;
                match adjacency[node].get(*edge) {
                    Some(&next) => {
                        *edge += 1;
                        if on_path[next] {
                            return Err(ValidateError::CircularEdge {
                                name: self.nodes[next].name.clone(),
                                part: part.to_string(),
                            });
                        }
                        if !visited[next] {
                            visited[next] = true;
                            on_path[next] = true;
                            stack.push((next, 0));
                        }
                    }
                    None => {
                        on_path[node] = false;
                        stack.pop();
                    }
                }
            }
        }
        Ok(())
    }

    /// Emit the `nodes` array fragment.
    pub fn encode_nodes(&self, enc: &mut Encoder<'_>) {
        enc.array_field("nodes");
        for node in &self.nodes {
            enc.begin_object();
            enc.field_str("name", &node.name);
            if let Some(value) = node.value {
                enc.field_num("value", value);
            }
            enc.end_object();
        }
        enc.end_array();
    }

    /// Emit the `links` array fragment.
    pub fn encode_links(&self, enc: &mut Encoder<'_>) {
        enc.array_field("links");
        for edge in &self.edges {
            enc.begin_object();
            enc.field_str("source", &edge.from);
            enc.field_str("target", &edge.to);
            if let Some(value) = edge.value {
                enc.field_num("value", value);
            }
            enc.end_object();
        }
        enc.end_array();
    }
}

/// A node in a tree data set. Children are owned, so the shape is
/// acyclic by construction; duplicate names are still rejected.
#[derive(Clone, Debug, PartialEq)]
pub struct TreeNode {
    pub name: String,
    pub value: Option<f64>,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn new(name: impl Into<String>, value: Option<f64>) -> Self {
        Self {
            name: name.into(),
            value,
            children: Vec::new(),
        }
    }

    pub fn add_child(&mut self, child: TreeNode) -> &mut Self {
        self.children.push(child);
        self
    }

    pub fn with_child(mut self, child: TreeNode) -> Self {
        self.children.push(child);
        self
    }

    /// Reject duplicate node names anywhere in the tree.
    pub fn validate(&self, part: &str) -> Result<(), ValidateError> {
        let mut seen = HashMap::new();
        self.collect_names(&mut seen, part)
    }

    fn collect_names<'a>(
        &'a self,
        seen: &mut HashMap<&'a str, ()>,
        part: &str,
    ) -> Result<(), ValidateError> {
        if seen.insert(self.name.as_str(), ()).is_some() {
            return Err(ValidateError::DuplicateNodeName {
                name: self.name.clone(),
                part: part.to_string(),
            });
        }
        for child in &self.children {
            child.collect_names(seen, part)?;
        }
        Ok(())
    }

    /// Emit this node and its children as a nested object body.
    pub fn encode(&self, enc: &mut Encoder<'_>) {
        enc.field_str("name", &self.name);
        if let Some(value) = self.value {
            enc.field_num("value", value);
        }
        if !self.children.is_empty() {
            enc.array_field("children");
            for child in &self.children {
                enc.begin_object();
                child.encode(enc);
                enc.end_object();
            }
            enc.end_array();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_auto_add_endpoints() {
        let mut g = GraphData::new();
        g.add_edge("a", "b", Some(5.0));
        assert_eq!(g.nodes().len(), 2);
        assert!(g.validate("sankey data").is_ok());
    }

    #[test]
    fn duplicate_names_rejected() {
        let mut g = GraphData::new();
        g.add_node("x", Some(1.0));
        g.add_node("x", Some(2.0));
        let err = g.validate("sankey data").unwrap_err();
        assert!(matches!(err, ValidateError::DuplicateNodeName { name, .. } if name == "x"));
    }

    #[test]
    fn duplicate_names_rejected_without_edges() {
        let mut g = GraphData::new();
        g.add_node("x", None);
        g.add_node("x", None);
        assert!(g.validate("sankey data").is_err());
    }

    #[test]
    fn three_node_cycle_rejected() {
        let mut g = GraphData::new();
        g.add_edge("a", "b", None);
        g.add_edge("b", "c", None);
        g.add_edge("c", "a", None);
        let err = g.validate("sankey data").unwrap_err();
        assert!(matches!(err, ValidateError::CircularEdge { .. }));
    }

    #[test]
    fn fan_out_is_not_a_cycle() {
        let mut g = GraphData::new();
        g.add_edge("a", "b", None);
        g.add_edge("a", "c", None);
        assert!(g.validate("sankey data").is_ok());
    }

    #[test]
    fn diamond_is_not_a_cycle() {
        // b and c both reach d; d is finished on a disjoint path and
        // must not be reported when re-reached.
        let mut g = GraphData::new();
        g.add_edge("a", "b", None);
        g.add_edge("a", "c", None);
        g.add_edge("b", "d", None);
        g.add_edge("c", "d", None);
        assert!(g.validate("sankey data").is_ok());
    }

    #[test]
    fn self_loop_rejected() {
        let mut g = GraphData::new();
        g.add_edge("a", "a", None);
        assert!(matches!(
            g.validate("sankey data").unwrap_err(),
            ValidateError::CircularEdge { name, .. } if name == "a"
        ));
    }

    #[test]
    fn deep_chain_does_not_overflow() {
        let mut g = GraphData::new();
        let n = 100_000;
        for i in 0..n {
            g.add_node(format!("n{i}"), None);
        }
        for i in 0..n - 1 {
            g.add_raw_edge(GraphEdge {
                from: format!("n{i}"),
                to: format!("n{}", i + 1),
                value: None,
            });
        }
        assert!(g.validate("sankey data").is_ok());

        // Closing the chain back onto its head is still caught.
        g.add_raw_edge(GraphEdge {
            from: format!("n{}", n - 1),
            to: "n0".into(),
            value: None,
        });
        assert!(matches!(
            g.validate("sankey data").unwrap_err(),
            ValidateError::CircularEdge { .. }
        ));
    }

    #[test]
    fn raw_edge_with_missing_endpoint_rejected() {
        let mut g = GraphData::new();
        g.add_node("a", None);
        g.add_raw_edge(GraphEdge {
            from: "a".into(),
            to: "ghost".into(),
            value: None,
        });
        let err = g.validate("sankey data").unwrap_err();
        assert!(matches!(err, ValidateError::InvalidEdge { to, .. } if to == "ghost"));
    }

    #[test]
    fn tree_duplicate_names_rejected() {
        let tree = TreeNode::new("root", None)
            .with_child(TreeNode::new("leaf", Some(1.0)))
            .with_child(TreeNode::new("leaf", Some(2.0)));
        assert!(tree.validate("tree data").is_err());
    }

    #[test]
    fn tree_unique_names_accepted() {
        let tree = TreeNode::new("root", None)
            .with_child(TreeNode::new("a", Some(1.0)).with_child(TreeNode::new("b", None)));
        assert!(tree.validate("tree data").is_ok());
    }
}
