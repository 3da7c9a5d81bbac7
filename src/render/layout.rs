//! Tiered node placement.
//!
//! Nodes are grouped into horizontal tiers by layer. Each tier starts in discovery
//! (insertion) order, then a few barycenter sweeps pull every node toward the mean
//! slot of its neighbors in the adjacent tier so children sit roughly under their
//! parents. Slots in a tier are evenly spaced and centered on `x = 0`.
//!
//! World coordinates: `x = slot × LAYER_GAP × HORIZONTAL_GAP_FACTOR`,
//! `y = -layer × LAYER_GAP`. The placement is fully deterministic.

use std::collections::{BTreeMap, HashMap};

use crate::constants::{HORIZONTAL_GAP_FACTOR, LAYER_GAP, ORDERING_SWEEPS};
use crate::graph::{NodeId, TopologyGraph};

/// A point in world coordinates (y grows upward).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Axis-aligned bounds of all positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Computed positions for one graph.
#[derive(Debug, Clone, Default)]
pub struct Layout {
    positions: HashMap<NodeId, Point>,
    tiers: BTreeMap<u32, Vec<NodeId>>,
}

impl Layout {
    /// Position of `id`, if it was laid out.
    pub fn position(&self, id: &NodeId) -> Option<Point> {
        self.positions.get(id).copied()
    }

    /// Node ids per layer, in final left-to-right order.
    pub fn tiers(&self) -> &BTreeMap<u32, Vec<NodeId>> {
        &self.tiers
    }

    /// Number of nodes in the most crowded tier.
    pub fn widest_tier(&self) -> usize {
        self.tiers.values().map(Vec::len).max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Bounds of all positions, `None` for an empty layout.
    pub fn bounds(&self) -> Option<Bounds> {
        let mut points = self.positions.values();
        let first = points.next()?;
        let init = Bounds {
            min_x: first.x,
            max_x: first.x,
            min_y: first.y,
            max_y: first.y,
        };
        Some(points.fold(init, |b, p| Bounds {
            min_x: b.min_x.min(p.x),
            max_x: b.max_x.max(p.x),
            min_y: b.min_y.min(p.y),
            max_y: b.max_y.max(p.y),
        }))
    }
}

/// Layered layout engine.
pub struct LayeredLayout;

impl LayeredLayout {
    /// Lay out every node of `graph`.
    pub fn compute(graph: &TopologyGraph) -> Layout {
        let mut tiers: BTreeMap<u32, Vec<NodeId>> = BTreeMap::new();
        for node in graph.nodes() {
            tiers.entry(node.effective_layer()).or_default().push(node.id.clone());
        }

        let keys: Vec<u32> = tiers.keys().copied().collect();
        for _ in 0..ORDERING_SWEEPS {
            for pair in keys.windows(2) {
                reorder_tier_by_barycenter(graph, pair[1], pair[0], &mut tiers);
            }
            for pair in keys.windows(2).rev() {
                reorder_tier_by_barycenter(graph, pair[0], pair[1], &mut tiers);
            }
        }

        let mut positions = HashMap::new();
        for (&layer, ids) in &tiers {
            let y = -f64::from(layer) * LAYER_GAP;
            for (slot, id) in ids.iter().enumerate() {
                let x = centered_slot(slot, ids.len()) * LAYER_GAP * HORIZONTAL_GAP_FACTOR;
                positions.insert(id.clone(), Point { x, y });
            }
        }

        Layout { positions, tiers }
    }
}

/// Slot index shifted so the tier is centered on zero.
fn centered_slot(slot: usize, count: usize) -> f64 {
    slot as f64 - (count as f64 - 1.0) / 2.0
}

/// Reorder `current` by the mean centered slot of each node's neighbors in
/// `reference`. Nodes without such neighbors keep their own slot as key; ties keep
/// the existing order.
fn reorder_tier_by_barycenter(
    graph: &TopologyGraph,
    current: u32,
    reference: u32,
    tiers: &mut BTreeMap<u32, Vec<NodeId>>,
) {
    let Some(ref_nodes) = tiers.get(&reference) else {
        return;
    };
    let ref_slots: HashMap<&NodeId, f64> = ref_nodes
        .iter()
        .enumerate()
        .map(|(i, id)| (id, centered_slot(i, ref_nodes.len())))
        .collect();

    let Some(current_nodes) = tiers.get(&current) else {
        return;
    };
    let count = current_nodes.len();
    let mut keyed: Vec<(f64, usize, NodeId)> = current_nodes
        .iter()
        .enumerate()
        .map(|(i, id)| {
            let neighbors: Vec<f64> = graph
                .predecessors(id)
                .iter()
                .chain(graph.successors(id).iter())
                .filter_map(|n| ref_slots.get(n).copied())
                .collect();
            let key = if neighbors.is_empty() {
                centered_slot(i, count)
            } else {
                neighbors.iter().sum::<f64>() / neighbors.len() as f64
            };
            (key, i, id.clone())
        })
        .collect();

    keyed.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
    tiers.insert(current, keyed.into_iter().map(|(_, _, id)| id).collect());
}
