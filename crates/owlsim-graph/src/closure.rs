//! Breadth-first edge closure over the store graph.

use std::collections::VecDeque;

use owlsim_core::model::{Edge, Predicate};
use owlsim_core::types::{FxHashSet, ObjectId};
use petgraph::stable_graph::NodeIndex;
use petgraph::visit::EdgeRef;
use petgraph::Direction;

use crate::store::StoreData;

/// All edges entailed by composing outgoing paths from `source`.
///
/// BFS over (node, composed predicate) states, so each entailed edge is
/// reported once with its shortest distance. Paths whose predicates do not
/// compose are pruned.
pub fn edge_closure(data: &StoreData, source: ObjectId) -> Vec<Edge> {
    let Some(&start) = data.node_index.get(&source) else {
        return Vec::new();
    };

    let mut visited: FxHashSet<(NodeIndex, Predicate)> = FxHashSet::default();
    let mut queue: VecDeque<(NodeIndex, Predicate, u32)> = VecDeque::new();
    let mut edges = Vec::new();

    for e in data.graph.edges_directed(start, Direction::Outgoing) {
        if visited.insert((e.target(), *e.weight())) {
            queue.push_back((e.target(), *e.weight(), 1));
        }
    }

    while let Some((node, predicate, distance)) = queue.pop_front() {
        edges.push(Edge {
            source,
            target: data.graph[node].id,
            predicate,
            distance,
        });

        for e in data.graph.edges_directed(node, Direction::Outgoing) {
            let Some(next) = predicate.compose(*e.weight(), |p| data.transitive.contains(&p)) else {
                continue;
            };
            if visited.insert((e.target(), next)) {
                queue.push_back((e.target(), next, distance + 1));
            }
        }
    }

    edges
}

/// Objects reachable from `source` over is_a edges only, in `direction`.
/// `source` itself is included only when it lies on a cycle.
pub fn isa_closure(data: &StoreData, source: ObjectId, direction: Direction) -> FxHashSet<ObjectId> {
    let mut out = FxHashSet::default();
    let Some(&start) = data.node_index.get(&source) else {
        return out;
    };

    let mut visited: FxHashSet<NodeIndex> = FxHashSet::default();
    let mut queue = VecDeque::new();
    queue.push_back(start);

    while let Some(node) = queue.pop_front() {
        for e in data.graph.edges_directed(node, direction) {
            if !e.weight().is_subsumption() {
                continue;
            }
            let next = match direction {
                Direction::Outgoing => e.target(),
                Direction::Incoming => e.source(),
            };
            if visited.insert(next) {
                out.insert(data.graph[next].id);
                queue.push_back(next);
            }
        }
    }

    out
}
