use std::hash::Hash;

use petgraph::graph::UnGraph;
use petgraph::visit::{GraphProp, IntoNeighbors, NodeCompactIndexable};
use petgraph::Undirected;
use tracing::{info, instrument};

use crate::graph::{Graph, NotFoundError};

/// The blocks and cut vertices of an undirected graph.
///
/// Each block is a maximal vertex set inducing a subgraph without a cut
/// vertex: a 2-connected subgraph, a single bridge edge, or an isolated
/// vertex. Two distinct blocks share at most one vertex, and a shared vertex
/// is always a cut vertex.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BlockCutDecomposition<NodeId: Copy + PartialEq> {
    blocks: Vec<Vec<NodeId>>,
    cut_vertices: Vec<NodeId>,
}

/// Node of a block-cut tree. See [BlockCutDecomposition::block_cut_tree].
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq)]
pub enum BlockCutNode<NodeId> {
    /// A block, identified by its position in [BlockCutDecomposition::blocks].
    Block(usize),
    /// A cut vertex of the original graph.
    Cut(NodeId),
}

impl<NodeId: Copy + PartialEq> BlockCutDecomposition<NodeId> {
    /// Returns the blocks, each as a list of vertices.
    pub fn blocks(&self) -> &[Vec<NodeId>] {
        &self.blocks
    }

    /// Returns the number of blocks.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Returns the cut vertices, in graph index order.
    pub fn cut_vertices(&self) -> &[NodeId] {
        &self.cut_vertices
    }

    /// Returns whether `v` is a cut vertex.
    pub fn is_cut_vertex(&self, v: NodeId) -> bool {
        self.cut_vertices.contains(&v)
    }

    /// Builds the block-cut tree: a bipartite graph with one node per block
    /// and one node per cut vertex, and an edge wherever a cut vertex belongs
    /// to a block. For a connected input graph the result is a tree.
    ///
    /// ```rust
    /// use petgraph::graph::UnGraph;
    /// use block_decomposition::blocks_and_cut_vertices;
    ///
    /// // a path graph with 4 nodes
    /// let graph = UnGraph::<(), ()>::from_edges([(0, 1), (1, 2), (2, 3)]);
    /// let tree = blocks_and_cut_vertices(&graph).block_cut_tree();
    ///
    /// // three edge blocks joined through two cut vertices
    /// assert_eq!(tree.node_count(), 5);
    /// assert_eq!(tree.edge_count(), 4);
    /// ```
    pub fn block_cut_tree(&self) -> UnGraph<BlockCutNode<NodeId>, ()> {
        let mut tree = UnGraph::with_capacity(self.blocks.len() + self.cut_vertices.len(), 0);
        let cut_nodes: Vec<_> = self.cut_vertices.iter().map(|&v| tree.add_node(BlockCutNode::Cut(v))).collect();
        for (i, block) in self.blocks.iter().enumerate() {
            let block_node = tree.add_node(BlockCutNode::Block(i));
            for (&cut_node, v) in cut_nodes.iter().zip(&self.cut_vertices) {
                if block.contains(v) {
                    tree.add_edge(block_node, cut_node, ());
                }
            }
        }
        tree
    }
}

/// Computes the blocks and cut vertices of the graph.
///
/// Every connected component is decomposed; the union of all blocks is the
/// whole vertex set. The graph must be simple (no loops, no parallel edges).
///
/// Runs a single iterative depth-first pass per component, O(|V| + |E|) in
/// total.
#[instrument(skip_all)]
pub fn blocks_and_cut_vertices<G>(graph: G) -> BlockCutDecomposition<G::NodeId>
where
    G: NodeCompactIndexable + IntoNeighbors + GraphProp<EdgeType = Undirected>,
{
    let mut search = BlockCutSearch::new(&graph);
    for v in 0..graph.node_bound() {
        if search.disc[v] == 0 {
            search.run(v);
        }
    }
    let decomposition = search.finish();
    info!(
        number_of_blocks = decomposition.block_count(),
        number_of_cut_vertices = decomposition.cut_vertices().len()
    );
    decomposition
}

/// Computes the blocks and cut vertices of the connected component that
/// contains `start`.
///
/// # Errors
///
/// Returns a [NotFoundError] if `start` does not index a vertex of the graph.
#[instrument(skip_all)]
pub fn blocks_and_cut_vertices_from<G>(
    graph: G,
    start: G::NodeId,
) -> Result<BlockCutDecomposition<G::NodeId>, NotFoundError>
where
    G: NodeCompactIndexable + IntoNeighbors + GraphProp<EdgeType = Undirected>,
{
    if graph.node_bound() == 0 {
        return Err(NotFoundError);
    }
    let s = graph.to_index(start);
    if s >= graph.node_bound() {
        return Err(NotFoundError);
    }
    let mut search = BlockCutSearch::new(&graph);
    search.run(s);
    Ok(search.finish())
}

impl<V: Copy + Eq + Hash, E> Graph<V, E> {
    /// Computes the blocks and cut vertices of this graph.
    /// See [blocks_and_cut_vertices].
    pub fn blocks_and_cut_vertices(&self) -> BlockCutDecomposition<V> {
        blocks_and_cut_vertices(self)
    }

    /// Computes the blocks and cut vertices of the connected component that
    /// contains `start`.
    ///
    /// # Errors
    ///
    /// Returns a [NotFoundError] if `start` is not a vertex of the graph.
    pub fn blocks_and_cut_vertices_from(&self, start: V) -> Result<BlockCutDecomposition<V>, NotFoundError> {
        if !self.contains_vertex(start) {
            return Err(NotFoundError);
        }
        blocks_and_cut_vertices_from(self, start)
    }
}

struct Frame<I> {
    vertex: usize,
    parent: usize,
    neighbors: I,
    tree_children: u32,
}

struct BlockCutSearch<'g, G>
where
    G: NodeCompactIndexable + IntoNeighbors + GraphProp<EdgeType = Undirected>,
{
    graph: &'g G,
    // Discovery numbers, 0 meaning unvisited.
    disc: Vec<u32>,
    low: Vec<u32>,
    time: u32,
    // Vertices discovered but not yet assigned to a block, deepest last.
    open: Vec<usize>,
    is_cut: Vec<bool>,
    blocks: Vec<Vec<usize>>,
}

impl<'g, G> BlockCutSearch<'g, G>
where
    G: NodeCompactIndexable + IntoNeighbors + GraphProp<EdgeType = Undirected>,
{
    fn new(graph: &'g G) -> Self {
        let n = graph.node_bound();
        Self {
            graph,
            disc: vec![0; n],
            low: vec![0; n],
            time: 0,
            open: Vec::new(),
            is_cut: vec![false; n],
            blocks: Vec::new(),
        }
    }

    fn neighbors_of(graph: &G, v: usize) -> G::Neighbors {
        graph.neighbors(graph.from_index(v))
    }

    fn discover(&mut self, v: usize) {
        self.time += 1;
        self.disc[v] = self.time;
        self.low[v] = self.time;
        self.open.push(v);
    }

    /// Depth-first search over the component of `root` with an explicit frame
    /// stack, so deep graphs cannot overflow the call stack.
    fn run(&mut self, root: usize) {
        debug_assert_eq!(self.disc[root], 0);
        self.discover(root);
        let mut path =
            vec![Frame { vertex: root, parent: usize::MAX, neighbors: Self::neighbors_of(self.graph, root), tree_children: 0 }];

        while let Some(frame) = path.last_mut() {
            let v = frame.vertex;
            let parent = frame.parent;
            match frame.neighbors.next() {
                Some(w) => {
                    let w = self.graph.to_index(w);
                    if self.disc[w] == 0 {
                        // Tree edge, descend.
                        frame.tree_children += 1;
                        self.discover(w);
                        path.push(Frame {
                            vertex: w,
                            parent: v,
                            neighbors: Self::neighbors_of(self.graph, w),
                            tree_children: 0,
                        });
                    } else if w != parent {
                        // Back edge.
                        self.low[v] = self.low[v].min(self.disc[w]);
                    }
                }
                None => {
                    let finished = path.pop().expect("the active path is non-empty");
                    if let Some(up) = path.last_mut() {
                        let p = up.vertex;
                        self.low[p] = self.low[p].min(self.low[v]);
                        if self.low[v] >= self.disc[p] {
                            // Nothing below v reaches above p, so p closes a
                            // block: the still-open subtree of v, plus p.
                            let mut block = vec![p];
                            loop {
                                let u = self.open.pop().expect("subtree vertices are still open");
                                block.push(u);
                                if u == v {
                                    break;
                                }
                            }
                            self.blocks.push(block);
                            if up.parent != usize::MAX {
                                self.is_cut[p] = true;
                            }
                        }
                    } else {
                        // v is the root of this component's search tree. All
                        // blocks through it are closed; it is a cut vertex
                        // exactly if the tree branches more than once.
                        let popped = self.open.pop();
                        debug_assert_eq!(popped, Some(v));
                        if finished.tree_children == 0 {
                            self.blocks.push(vec![v]);
                        }
                        if finished.tree_children >= 2 {
                            self.is_cut[v] = true;
                        }
                    }
                }
            }
        }
    }

    fn finish(self) -> BlockCutDecomposition<G::NodeId> {
        let graph = self.graph;
        let blocks = self
            .blocks
            .into_iter()
            .map(|block| block.into_iter().map(|v| graph.from_index(v)).collect())
            .collect();
        let cut_vertices = self
            .is_cut
            .iter()
            .enumerate()
            .filter(|(_, &cut)| cut)
            .map(|(v, _)| graph.from_index(v))
            .collect();
        BlockCutDecomposition { blocks, cut_vertices }
    }
}
