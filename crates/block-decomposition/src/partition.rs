use petgraph::visit::NodeCompactIndexable;
use thiserror::Error;

/// An ordered partition of a graph's vertex set into non-empty cells.
///
/// Partitions are plain values: refinement never mutates its input but
/// returns a new, finer partition. Whether a partition actually covers the
/// vertex set of a particular graph is checked by [validate], which both
/// [refine](crate::refine) and [is_equitable](crate::is_equitable) call
/// before doing any work.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Partition<NodeId> {
    cells: Vec<Vec<NodeId>>,
}

impl<NodeId: Copy + PartialEq> Partition<NodeId> {
    /// Creates a partition from a list of cells.
    pub fn new(cells: impl IntoIterator<Item = impl IntoIterator<Item = NodeId>>) -> Self {
        Self { cells: cells.into_iter().map(|cell| cell.into_iter().collect()).collect() }
    }

    /// The coarsest partition of the graph's vertex set: a single cell with
    /// every vertex, or no cell at all for the empty graph.
    pub fn unit<G>(graph: G) -> Self
    where
        G: NodeCompactIndexable<NodeId = NodeId>,
    {
        let cell: Vec<_> = (0..graph.node_bound()).map(|i| graph.from_index(i)).collect();
        Self { cells: if cell.is_empty() { Vec::new() } else { vec![cell] } }
    }

    /// The finest partition of the graph's vertex set: one singleton cell per
    /// vertex.
    pub fn discrete<G>(graph: G) -> Self
    where
        G: NodeCompactIndexable<NodeId = NodeId>,
    {
        Self { cells: (0..graph.node_bound()).map(|i| vec![graph.from_index(i)]).collect() }
    }

    /// Returns the cells in order.
    pub fn cells(&self) -> &[Vec<NodeId>] {
        &self.cells
    }

    /// Returns the number of cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Returns whether the partition has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Consumes the partition and returns its cells.
    pub fn into_cells(self) -> Vec<Vec<NodeId>> {
        self.cells
    }
}

impl<NodeId> FromIterator<Vec<NodeId>> for Partition<NodeId> {
    fn from_iter<I: IntoIterator<Item = Vec<NodeId>>>(iter: I) -> Self {
        Self { cells: iter.into_iter().collect() }
    }
}

/// Checks that `partition` partitions the vertex set of `graph`: no cell is
/// empty, no vertex occurs twice, every cell member is a graph vertex, and no
/// graph vertex is missing.
///
/// # Errors
///
/// Returns the first [InvalidPartitionError] found, in the order listed
/// above.
pub fn validate<G>(graph: G, partition: &Partition<G::NodeId>) -> Result<(), InvalidPartitionError>
where
    G: NodeCompactIndexable,
{
    let n = graph.node_bound();
    let mut seen = vec![false; n];
    let mut covered = 0_usize;
    for cell in partition.cells() {
        if cell.is_empty() {
            return Err(InvalidPartitionError::EmptyCell);
        }
        for &v in cell {
            let i = graph.to_index(v);
            if i >= n {
                return Err(InvalidPartitionError::UnknownVertex);
            }
            if seen[i] {
                return Err(InvalidPartitionError::DuplicateVertex);
            }
            seen[i] = true;
            covered += 1;
        }
    }
    if covered != n {
        return Err(InvalidPartitionError::MissingVertex);
    }
    Ok(())
}

/// The partition does not partition the graph's vertex set.
#[derive(Error, Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum InvalidPartitionError {
    /// A cell with no members.
    #[error("partition contains an empty cell")]
    EmptyCell,
    /// A vertex that is a member of more than one cell.
    #[error("a vertex appears in more than one cell")]
    DuplicateVertex,
    /// A cell member that is not a vertex of the graph.
    #[error("a cell contains a vertex that is not part of the graph")]
    UnknownVertex,
    /// A graph vertex that is a member of no cell.
    #[error("a graph vertex is missing from the partition")]
    MissingVertex,
}
