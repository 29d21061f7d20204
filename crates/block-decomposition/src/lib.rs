//! This is a library to compute the [block-cut decomposition](https://en.wikipedia.org/wiki/Biconnected_component)
//! and coarsest [equitable partitions](https://en.wikipedia.org/wiki/Partition_refinement)
//! of a simple, undirected graph.
//!
//! A *block* (biconnected component) is a maximal subgraph without a cut
//! vertex. A partition of the vertex set is *equitable* if for every pair of
//! cells *C1*, *C2*, all vertices of *C1* have the same number of neighbors in
//! *C2*. Both are classic building blocks for connectivity analysis and
//! canonical labeling.
//!
//! # Examples
//!
//! Two triangles glued at a single vertex have two blocks and one cut vertex.
//! ```rust
//! use petgraph::graph::{NodeIndex, UnGraph};
//! use block_decomposition::blocks_and_cut_vertices;
//!
//! let graph = UnGraph::<(), ()>::from_edges([(0, 1), (1, 2), (2, 0), (2, 3), (3, 4), (4, 2)]);
//! let decomposition = blocks_and_cut_vertices(&graph);
//!
//! assert_eq!(decomposition.block_count(), 2);
//! assert_eq!(decomposition.cut_vertices(), [NodeIndex::new(2)]);
//! ```
//!
//! Refining the single-cell partition of a path graph separates the end
//! vertices from the inner ones.
//! ```rust
//! # use std::error::Error;
//! #
//! # fn main() -> Result<(), Box<dyn Error>> {
//! use petgraph::graph::UnGraph;
//! use block_decomposition::{is_equitable, refine, Partition};
//!
//! // a path graph with 4 nodes
//! let graph = UnGraph::<(), ()>::from_edges([(0, 1), (1, 2), (2, 3)]);
//! let refined = refine(&graph, &Partition::unit(&graph))?;
//!
//! assert_eq!(refined.cell_count(), 2);
//! assert!(is_equitable(&graph, &refined)?);
//! # Ok(())
//! # }
//! ```
//!
//! # Generics
//!
//! The algorithms are implemented for structs that implement the `petgraph`
//! traits `NodeCompactIndexable`, `IntoNeighbors`, and `GraphProp<EdgeType =
//! Undirected>`. The crate also ships its own mutable [Graph] store keyed by
//! arbitrary hashable vertex identifiers, which implements those traits.
//!
//! # References
//! + \[HT73\]: John Hopcroft and Robert Tarjan. “Algorithm 447: Efficient Algorithms for Graph Manipulation”. <https://doi.org/10.1145/362248.362272>.
//! + \[McK81\]: Brendan McKay. “Practical Graph Isomorphism”. Congressus Numerantium 30.

#![forbid(unsafe_code)]
#![doc(test(attr(deny(warnings, rust_2018_idioms), allow(dead_code))))]
#![warn(missing_docs, missing_debug_implementations, rust_2018_idioms, unreachable_pub)]

/// The block-cut-vertex decomposition algorithm.
pub mod blocks;
mod graph;
mod index;
mod partition;
/// Equitable partition refinement.
pub mod refinement;


pub use blocks::{blocks_and_cut_vertices, blocks_and_cut_vertices_from, BlockCutDecomposition, BlockCutNode};
pub use graph::{Graph, InvalidEdgeError, Neighbors, NotFoundError};
pub use partition::{validate, InvalidPartitionError, Partition};
pub use refinement::{degree_to_cell, is_equitable, refine};
