//! Conflict-graph greedy allocation.
//!
//! # Conflict graph
//!
//! One node per applicant (node index = applicant index). Two nodes are
//! adjacent when their requested slots share at least one value. A node's
//! color options are its applicant's requested slots in preference order.
//! Applicants sharing several slots get one adjacency entry per shared
//! request; traversal skips visited nodes, so duplicates are harmless.
//!
//! # Traversal
//!
//! Depth-first from node 0, restricted to the connected component that
//! contains it. Each visited node takes its first option not yet present in
//! a single global used-colors set, then every neighbor is visited in
//! adjacency order. Nodes outside the seed component stay unresolved.
//!
//! The global set makes this "first unclaimed slot in visitation order"
//! rather than a proper coloring, which would only exclude colors held by
//! a node's own neighbors.
//!
//! The traversal uses an explicit stack. Neighbors are pushed in reverse so
//! the visitation order equals that of the recursive formulation.
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.3 (DFS)

use std::collections::HashSet;

use indexmap::IndexMap;
use rand::RngCore;
use tracing::debug;

use super::{clear_reservations, AllocationStrategy};
use crate::models::{count_unresolved, Applicant, Slot, SlotSpace};

/// Applicant contention graph.
#[derive(Debug, Clone, Default)]
pub struct ConflictGraph {
    adjacency: Vec<Vec<usize>>,
    options: Vec<Vec<Slot>>,
}

impl ConflictGraph {
    /// Builds the graph over `applicants`.
    ///
    /// Edges are added slot by slot (slots in first-requested order,
    /// requesters in applicant order), which fixes each node's neighbor
    /// order.
    pub fn build(applicants: &[Applicant]) -> Self {
        let mut requesters: IndexMap<Slot, Vec<usize>> = IndexMap::new();
        for (idx, applicant) in applicants.iter().enumerate() {
            for &slot in &applicant.requested {
                requesters.entry(slot).or_default().push(idx);
            }
        }

        let mut adjacency = vec![Vec::new(); applicants.len()];
        for list in requesters.values() {
            for &a in list {
                for &b in list {
                    if a != b {
                        adjacency[a].push(b);
                    }
                }
            }
        }

        Self {
            adjacency,
            options: applicants.iter().map(|a| a.requested.clone()).collect(),
        }
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of adjacency entries, duplicates included.
    pub fn edge_entries(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    /// Neighbors of `node` in adjacency order.
    pub fn neighbors(&self, node: usize) -> &[usize] {
        &self.adjacency[node]
    }

    /// Whether `a` and `b` share a requested slot.
    pub fn are_adjacent(&self, a: usize, b: usize) -> bool {
        self.adjacency[a].contains(&b)
    }

    /// Nodes of the component containing `start`, in depth-first order.
    pub fn component_of(&self, start: usize) -> Vec<usize> {
        let mut order = Vec::new();
        self.traverse(start, |node| order.push(node));
        order
    }

    /// Greedily colors the component containing `start`.
    ///
    /// Returns one entry per node; nodes never visited, or visited after
    /// all their options were used, are `None`.
    pub fn greedy_color(&self, start: usize) -> Vec<Option<Slot>> {
        let mut colors = vec![None; self.node_count()];
        let mut used: HashSet<Slot> = HashSet::new();

        self.traverse(start, |node| {
            let free = self.options[node]
                .iter()
                .copied()
                .find(|color| !used.contains(color));
            if let Some(color) = free {
                used.insert(color);
                colors[node] = Some(color);
            }
        });

        colors
    }

    /// Depth-first preorder from `start`. No-op if `start` is not a node.
    fn traverse(&self, start: usize, mut visit: impl FnMut(usize)) {
        if start >= self.node_count() {
            return;
        }
        let mut visited = vec![false; self.node_count()];
        let mut stack = vec![start];

        while let Some(node) = stack.pop() {
            if visited[node] {
                continue;
            }
            visited[node] = true;
            visit(node);
            stack.extend(self.adjacency[node].iter().rev().copied());
        }
    }
}

/// Greedy slot assignment over the conflict component of the first
/// applicant.
///
/// Not a proper graph coloring: see the module documentation.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConflictGraphGreedy;

impl AllocationStrategy for ConflictGraphGreedy {
    fn name(&self) -> &'static str {
        "ConflictGraphGreedy"
    }

    fn allocate(
        &self,
        _space: &SlotSpace,
        applicants: &mut [Applicant],
        _rng: &mut dyn RngCore,
    ) -> usize {
        clear_reservations(applicants);
        let graph = ConflictGraph::build(applicants);
        debug!(
            nodes = graph.node_count(),
            edge_entries = graph.edge_entries(),
            "built conflict graph"
        );

        let colors = graph.greedy_color(0);
        for (applicant, color) in applicants.iter_mut().zip(colors) {
            if let Some(slot) = color {
                applicant.reserve(slot);
            }
        }

        count_unresolved(applicants)
    }

    fn description(&self) -> &'static str {
        "Conflict-Graph Greedy Coloring"
    }
}
