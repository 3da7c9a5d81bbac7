//! Directed topology graph.
//!
//! The graph holds one [`Node`] per resource or synthetic placeholder and directed
//! edges for "contains" and "routes traffic to". It is built once by
//! [`builder::build`] and only read afterwards; the renderer works on per-partition
//! copies obtained from [`TopologyGraph::partition`].

pub mod builder;
pub mod node;
pub mod routing;

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::{Bfs, EdgeRef};
use std::collections::{HashMap, HashSet};
use tracing::trace;

pub use builder::{BuildOutput, GraphBuilder, build};
pub use node::{Node, NodeId, NodeKind};

/// Topology graph for one inventory snapshot.
///
/// Node ids are unique and edges only reference existing nodes. Insertion order
/// is preserved and used by the layout as discovery order.
#[derive(Debug, Clone, Default)]
pub struct TopologyGraph {
    /// The underlying directed graph.
    graph: DiGraph<Node, ()>,
    /// Map from node ids to their graph indices.
    node_map: HashMap<NodeId, NodeIndex>,
}

impl TopologyGraph {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node if its id is not already present.
    ///
    /// Returns `true` when the node was inserted. An existing node is left untouched.
    pub fn add_node(&mut self, node: Node) -> bool {
        if self.node_map.contains_key(&node.id) {
            return false;
        }
        let id = node.id.clone();
        let index = self.graph.add_node(node);
        self.node_map.insert(id, index);
        true
    }

    /// Add a directed edge `from → to`.
    ///
    /// Returns `true` when a new edge was created. Adding an existing edge is a
    /// no-op, and an edge naming an unknown node is skipped.
    pub fn add_edge(&mut self, from: &NodeId, to: &NodeId) -> bool {
        let (Some(&from_idx), Some(&to_idx)) = (self.node_map.get(from), self.node_map.get(to))
        else {
            trace!("Skipping edge {from} -> {to}: endpoint not in graph");
            return false;
        };

        // Check if edge already exists to avoid duplicates
        if self.graph.contains_edge(from_idx, to_idx) {
            return false;
        }
        self.graph.add_edge(from_idx, to_idx, ());
        true
    }

    /// Whether a node with `id` exists.
    pub fn contains(&self, id: &NodeId) -> bool {
        self.node_map.contains_key(id)
    }

    /// Whether the edge `from → to` exists.
    pub fn has_edge(&self, from: &NodeId, to: &NodeId) -> bool {
        match (self.node_map.get(from), self.node_map.get(to)) {
            (Some(&f), Some(&t)) => self.graph.contains_edge(f, t),
            _ => false,
        }
    }

    /// Look up a node.
    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.node_map.get(id).map(|&idx| &self.graph[idx])
    }

    /// Number of inbound edges of `id` (0 for unknown ids).
    pub fn in_degree(&self, id: &NodeId) -> usize {
        self.node_map
            .get(id)
            .map_or(0, |&idx| self.graph.neighbors_directed(idx, Direction::Incoming).count())
    }

    /// Ids of the direct successors of `id`.
    pub fn successors(&self, id: &NodeId) -> Vec<NodeId> {
        match self.node_map.get(id) {
            Some(&idx) => {
                let mut out: Vec<NodeIndex> = self.graph.neighbors(idx).collect();
                out.sort_unstable();
                out.into_iter().map(|n| self.graph[n].id.clone()).collect()
            }
            None => Vec::new(),
        }
    }

    /// Ids of the direct predecessors of `id`.
    pub fn predecessors(&self, id: &NodeId) -> Vec<NodeId> {
        match self.node_map.get(id) {
            Some(&idx) => {
                let mut out: Vec<NodeIndex> =
                    self.graph.neighbors_directed(idx, Direction::Incoming).collect();
                out.sort_unstable();
                out.into_iter().map(|n| self.graph[n].id.clone()).collect()
            }
            None => Vec::new(),
        }
    }

    /// All nodes reachable from `root` by directed traversal. `root` itself is
    /// never included, even when it lies on a cycle.
    pub fn descendants(&self, root: &NodeId) -> HashSet<NodeId> {
        let mut found = HashSet::new();
        let Some(&start) = self.node_map.get(root) else {
            return found;
        };

        let mut bfs = Bfs::new(&self.graph, start);
        while let Some(idx) = bfs.next(&self.graph) {
            if idx != start {
                found.insert(self.graph[idx].id.clone());
            }
        }
        found
    }

    /// Copy of the subgraph induced by `ids`.
    ///
    /// Nodes keep their relative insertion order; edges between two retained
    /// nodes are kept, all others dropped.
    pub fn subgraph(&self, ids: &HashSet<NodeId>) -> Self {
        let mut sub = Self::new();
        for idx in self.graph.node_indices() {
            let node = &self.graph[idx];
            if ids.contains(&node.id) {
                sub.add_node(node.clone());
            }
        }
        for edge in self.graph.edge_references() {
            let from = &self.graph[edge.source()].id;
            let to = &self.graph[edge.target()].id;
            if ids.contains(from) && ids.contains(to) {
                sub.add_edge(from, to);
            }
        }
        sub
    }

    /// The partition rooted at `root`: `root` plus everything reachable from it.
    pub fn partition(&self, root: &NodeId) -> Self {
        let mut ids = self.descendants(root);
        if self.contains(root) {
            ids.insert(root.clone());
        }
        self.subgraph(&ids)
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.graph.node_indices().map(move |idx| &self.graph[idx])
    }

    /// Edges as `(from, to)` id pairs, in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (&NodeId, &NodeId)> {
        self.graph
            .edge_references()
            .map(move |e| (&self.graph[e.source()].id, &self.graph[e.target()].id))
    }

    /// Check if the graph is empty.
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Get the total number of nodes in the graph.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Get the total number of edges in the graph.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Number of nodes of the given kind.
    pub fn count_kind(&self, kind: NodeKind) -> usize {
        self.nodes().filter(|n| n.kind() == kind).count()
    }
}
