use std::collections::HashMap;
use std::hash::Hash;

use petgraph::visit::{GraphBase, GraphProp, IntoNeighbors, NodeCompactIndexable, NodeCount, NodeIndexable};
use petgraph::Undirected;
use thiserror::Error;

use crate::index::make_index;

make_index!(pub(crate) VertexIndex);

/// A mutable adjacency-list undirected graph over arbitrary hashable vertex
/// identifiers.
///
/// Vertices live in a dense `u32`-indexed arena together with a map from
/// identifier to slot, so neighbor queries run in time proportional to the
/// neighborhood size and the algorithms of this crate can use array-backed
/// traversal state. Deleting a vertex keeps the index range compact by moving
/// the last slot into the hole.
///
/// Self-loops and parallel edges are rejected by default; a graph constructed
/// with [Graph::with_policy] can permit either. Edges may carry a label `E`.
///
/// ```rust
/// use block_decomposition::Graph;
///
/// let mut graph = Graph::<char>::new();
/// graph.add_edge('a', 'b', ()).unwrap();
/// graph.add_edge('b', 'c', ()).unwrap();
///
/// assert_eq!(graph.degree('b'), Ok(2));
/// assert!(graph.blocks_and_cut_vertices().is_cut_vertex('b'));
/// ```
#[derive(Clone, Debug)]
pub struct Graph<V, E = ()> {
    ids: Vec<V>,
    slots: HashMap<V, VertexIndex>,
    adj: Vec<Vec<(VertexIndex, E)>>,
    allow_loops: bool,
    allow_multi_edges: bool,
    edge_count: usize,
}

impl<V: Copy + Eq + Hash, E> Graph<V, E> {
    /// Creates an empty graph that rejects self-loops and parallel edges.
    pub fn new() -> Self {
        Self::with_policy(false, false)
    }

    /// Creates an empty graph with an explicit loop and multi-edge policy.
    pub fn with_policy(allow_loops: bool, allow_multi_edges: bool) -> Self {
        Self {
            ids: Vec::new(),
            slots: HashMap::new(),
            adj: Vec::new(),
            allow_loops,
            allow_multi_edges,
            edge_count: 0,
        }
    }

    /// Creates a graph from an edge list, inserting endpoints as needed.
    ///
    /// # Errors
    ///
    /// Returns an [InvalidEdgeError] if the list contains a self-loop or a
    /// repeated edge.
    pub fn from_edges(edges: impl IntoIterator<Item = (V, V)>) -> Result<Self, InvalidEdgeError>
    where
        E: Clone + Default,
    {
        let mut graph = Self::new();
        for (u, v) in edges {
            graph.add_edge(u, v, E::default())?;
        }
        Ok(graph)
    }

    /// Returns the number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.ids.len()
    }

    /// Returns the number of edges. Loops and parallel edges each count once.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Returns whether `v` is a vertex of the graph.
    pub fn contains_vertex(&self, v: V) -> bool {
        self.slots.contains_key(&v)
    }

    /// Returns an iterator over all vertex identifiers.
    pub fn vertices(&self) -> impl Iterator<Item = V> + '_ {
        self.ids.iter().copied()
    }

    /// Inserts a vertex. Returns `false` (and leaves the graph unchanged) if
    /// it was already present.
    pub fn add_vertex(&mut self, v: V) -> bool {
        if self.slots.contains_key(&v) {
            return false;
        }
        let idx = VertexIndex::new(self.ids.len());
        self.slots.insert(v, idx);
        self.ids.push(v);
        self.adj.push(Vec::new());
        true
    }

    /// Inserts an undirected edge between `u` and `v`, inserting the endpoints
    /// first if they are not present yet.
    ///
    /// # Errors
    ///
    /// Returns an [InvalidEdgeError] and leaves the graph unchanged if the
    /// edge violates the loop or multi-edge policy.
    pub fn add_edge(&mut self, u: V, v: V, label: E) -> Result<(), InvalidEdgeError>
    where
        E: Clone,
    {
        if u == v && !self.allow_loops {
            return Err(InvalidEdgeError::LoopNotPermitted);
        }
        if !self.allow_multi_edges && self.has_edge(u, v) {
            return Err(InvalidEdgeError::DuplicateEdge);
        }
        self.add_vertex(u);
        self.add_vertex(v);
        let ui = self.slots[&u];
        let vi = self.slots[&v];
        self.adj[ui.index()].push((vi, label.clone()));
        if ui != vi {
            self.adj[vi.index()].push((ui, label));
        }
        self.edge_count += 1;
        Ok(())
    }

    /// Returns whether an edge between `u` and `v` exists.
    pub fn has_edge(&self, u: V, v: V) -> bool {
        let (Some(&ui), Some(&vi)) = (self.slots.get(&u), self.slots.get(&v)) else {
            return false;
        };
        self.adj[ui.index()].iter().any(|(w, _)| *w == vi)
    }

    /// Returns an iterator over the neighbors of `v`.
    ///
    /// A loop reports `v` itself once; under the multi-edge policy a neighbor
    /// appears once per parallel edge.
    ///
    /// # Errors
    ///
    /// Returns a [NotFoundError] if `v` is not a vertex of the graph.
    pub fn neighbors(&self, v: V) -> Result<impl Iterator<Item = V> + '_, NotFoundError> {
        let idx = self.slot(v)?;
        Ok(self.adj[idx.index()].iter().map(|(w, _)| self.ids[w.index()]))
    }

    /// Returns the degree of `v`, counting loops twice.
    ///
    /// # Errors
    ///
    /// Returns a [NotFoundError] if `v` is not a vertex of the graph.
    pub fn degree(&self, v: V) -> Result<usize, NotFoundError> {
        let idx = self.slot(v)?;
        let loops = self.adj[idx.index()].iter().filter(|(w, _)| *w == idx).count();
        Ok(self.adj[idx.index()].len() + loops)
    }

    /// Removes `v` and all incident edges.
    ///
    /// # Errors
    ///
    /// Returns a [NotFoundError] if `v` is not a vertex of the graph.
    pub fn delete_vertex(&mut self, v: V) -> Result<(), NotFoundError> {
        let idx = self.slot(v)?;

        let incident = std::mem::take(&mut self.adj[idx.index()]);
        self.edge_count -= incident.len();
        for (w, _) in &incident {
            if *w == idx {
                continue;
            }
            self.adj[w.index()].retain(|(x, _)| *x != idx);
        }

        self.slots.remove(&v);
        let last = VertexIndex::new(self.ids.len() - 1);
        self.ids.swap_remove(idx.index());
        self.adj.swap_remove(idx.index());

        if idx != last {
            // The vertex in the last slot moved into the hole. Repoint its
            // slot entry and every adjacency reference to it.
            let moved = self.ids[idx.index()];
            self.slots.insert(moved, idx);
            let neighbors: Vec<VertexIndex> = self.adj[idx.index()]
                .iter()
                .map(|(w, _)| if *w == last { idx } else { *w })
                .collect();
            for (x, _) in self.adj[idx.index()].iter_mut() {
                if *x == last {
                    *x = idx;
                }
            }
            for w in neighbors {
                if w == idx {
                    continue;
                }
                for (x, _) in self.adj[w.index()].iter_mut() {
                    if *x == last {
                        *x = idx;
                    }
                }
            }
        }
        Ok(())
    }

    /// Removes one edge between `u` and `v` and returns its label.
    ///
    /// # Errors
    ///
    /// Returns a [NotFoundError] if there is no such edge.
    pub fn delete_edge(&mut self, u: V, v: V) -> Result<E, NotFoundError> {
        let ui = self.slot(u)?;
        let vi = self.slot(v)?;
        let pos = self.adj[ui.index()]
            .iter()
            .position(|(w, _)| *w == vi)
            .ok_or(NotFoundError)?;
        let (_, label) = self.adj[ui.index()].remove(pos);
        if ui != vi {
            let pos = self.adj[vi.index()]
                .iter()
                .position(|(w, _)| *w == ui)
                .expect("undirected edges are stored at both endpoints");
            self.adj[vi.index()].remove(pos);
        }
        self.edge_count -= 1;
        Ok(label)
    }

    fn slot(&self, v: V) -> Result<VertexIndex, NotFoundError> {
        self.slots.get(&v).copied().ok_or(NotFoundError)
    }
}

impl<V: Copy + Eq + Hash, E> Default for Graph<V, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Copy + PartialEq, E> GraphBase for Graph<V, E> {
    type EdgeId = usize;
    type NodeId = V;
}

impl<V: Copy + PartialEq, E> GraphProp for Graph<V, E> {
    type EdgeType = Undirected;
}

/// Iterator over the neighbors of a vertex of a [Graph].
#[derive(Debug)]
pub struct Neighbors<'a, V, E> {
    ids: &'a [V],
    edges: std::slice::Iter<'a, (VertexIndex, E)>,
}

impl<'a, V: Copy, E> Iterator for Neighbors<'a, V, E> {
    type Item = V;

    fn next(&mut self) -> Option<V> {
        self.edges.next().map(|(w, _)| self.ids[w.index()])
    }
}

impl<'a, V: Copy + Eq + Hash, E> IntoNeighbors for &'a Graph<V, E> {
    type Neighbors = Neighbors<'a, V, E>;

    fn neighbors(self, v: V) -> Self::Neighbors {
        let idx = self.slots[&v];
        Neighbors { ids: &self.ids, edges: self.adj[idx.index()].iter() }
    }
}

impl<V: Copy + Eq + Hash, E> NodeCount for Graph<V, E> {
    fn node_count(&self) -> usize {
        self.ids.len()
    }
}

impl<V: Copy + Eq + Hash, E> NodeIndexable for Graph<V, E> {
    fn node_bound(&self) -> usize {
        self.ids.len()
    }
    // Unknown identifiers map to `node_bound()`, so callers that range-check
    // the result report an error instead of panicking.
    fn to_index(&self, v: V) -> usize {
        self.slots.get(&v).map_or_else(|| self.ids.len(), |idx| idx.index())
    }
    fn from_index(&self, i: usize) -> V {
        self.ids[i]
    }
}

impl<V: Copy + Eq + Hash, E> NodeCompactIndexable for Graph<V, E> {}

/// The operation referenced a vertex or edge that is not part of the graph.
#[derive(Error, Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[error("vertex or edge is not part of the graph")]
pub struct NotFoundError;

/// The inserted edge violated the graph's loop or multi-edge policy.
#[derive(Error, Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum InvalidEdgeError {
    /// A self-loop on a graph that does not permit loops.
    #[error("self-loops are not permitted by this graph")]
    LoopNotPermitted,
    /// A repeated edge on a graph that does not permit parallel edges.
    #[error("an edge between these endpoints already exists")]
    DuplicateEdge,
}

#[cfg(test)]
mod test {
    use petgraph::visit::{IntoNeighbors, NodeIndexable};

    use super::{Graph, InvalidEdgeError, NotFoundError};

    #[test]
    fn add_vertex_is_idempotent() {
        let mut graph = Graph::<u32>::new();
        assert!(graph.add_vertex(4));
        assert!(!graph.add_vertex(4));
        assert_eq!(graph.vertex_count(), 1);
    }

    #[test]
    fn add_edge_inserts_endpoints() {
        let mut graph = Graph::<&str>::new();
        graph.add_edge("a", "b", ()).unwrap();
        assert!(graph.contains_vertex("a"));
        assert!(graph.contains_vertex("b"));
        assert!(graph.has_edge("b", "a"));
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn policy_violations_leave_graph_unchanged() {
        let mut graph = Graph::<u32>::from_edges([(0, 1)]).unwrap();
        assert_eq!(graph.add_edge(2, 2, ()), Err(InvalidEdgeError::LoopNotPermitted));
        assert_eq!(graph.add_edge(1, 0, ()), Err(InvalidEdgeError::DuplicateEdge));
        assert_eq!(graph.vertex_count(), 2);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn loops_count_twice_in_degree() {
        let mut graph = Graph::<u32>::with_policy(true, false);
        graph.add_edge(0, 0, ()).unwrap();
        graph.add_edge(0, 1, ()).unwrap();
        assert_eq!(graph.degree(0), Ok(3));
        assert_eq!(graph.degree(1), Ok(1));
        let mut neighbors: Vec<_> = graph.neighbors(0).unwrap().collect();
        neighbors.sort_unstable();
        assert_eq!(neighbors, [0, 1]);
    }

    #[test]
    fn multi_edges_when_permitted() {
        let mut graph = Graph::<u32>::with_policy(false, true);
        graph.add_edge(0, 1, ()).unwrap();
        graph.add_edge(0, 1, ()).unwrap();
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.degree(0), Ok(2));
    }

    #[test]
    fn missing_vertices_are_reported() {
        let mut graph = Graph::<u32>::from_edges([(0, 1)]).unwrap();
        assert!(graph.neighbors(7).is_err());
        assert_eq!(graph.degree(7), Err(NotFoundError));
        assert_eq!(graph.delete_vertex(7), Err(NotFoundError));
        assert_eq!(graph.delete_edge(0, 7), Err(NotFoundError));
    }

    #[test]
    fn delete_vertex_removes_incident_edges() {
        let mut graph = Graph::<u32>::from_edges([(0, 1), (1, 2), (2, 0), (2, 3)]).unwrap();
        graph.delete_vertex(2).unwrap();
        assert_eq!(graph.vertex_count(), 3);
        assert_eq!(graph.edge_count(), 1);
        assert!(graph.has_edge(0, 1));
        assert!(!graph.has_edge(2, 3));
        assert_eq!(graph.degree(3), Ok(0));
    }

    #[test]
    fn delete_vertex_keeps_indices_compact() {
        let mut graph = Graph::<char>::from_edges([('a', 'b'), ('b', 'c'), ('c', 'd'), ('d', 'a')]).unwrap();
        graph.delete_vertex('b').unwrap();

        assert_eq!(graph.node_bound(), 3);
        for v in ['a', 'c', 'd'] {
            let i = graph.to_index(v);
            assert!(i < graph.node_bound());
            assert_eq!(graph.from_index(i), v);
        }
        let mut neighbors: Vec<_> = IntoNeighbors::neighbors(&graph, 'd').collect();
        neighbors.sort_unstable();
        assert_eq!(neighbors, ['a', 'c']);
    }

    #[test]
    fn unknown_identifiers_map_past_the_node_bound() {
        let graph = Graph::<u32>::from_edges([(0, 1), (1, 2)]).unwrap();
        assert!(graph.to_index(9) >= graph.node_bound());
    }

    #[test]
    fn query_methods_work_without_cloneable_labels() {
        struct Label;

        let mut graph = Graph::<u32, Label>::new();
        graph.add_vertex(0);
        graph.add_vertex(1);
        assert!(graph.contains_vertex(1));
        assert_eq!(graph.degree(0), Ok(0));
        assert_eq!(graph.neighbors(1).unwrap().count(), 0);
        graph.delete_vertex(0).unwrap();
        assert_eq!(graph.vertex_count(), 1);
        assert_eq!(graph.blocks_and_cut_vertices().block_count(), 1);
    }

    #[test]
    fn delete_edge_returns_label() {
        let mut graph = Graph::<u32, &str>::new();
        graph.add_edge(0, 1, "left").unwrap();
        assert_eq!(graph.delete_edge(1, 0), Ok("left"));
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.delete_edge(0, 1), Err(NotFoundError));
    }
}
