use std::collections::BTreeMap;

use petgraph::visit::{GraphProp, IntoNeighbors, NodeCompactIndexable};
use petgraph::Undirected;
use tracing::{info, instrument};

use crate::partition::{validate, InvalidPartitionError, Partition};

/// Computes the coarsest equitable refinement of `partition`.
///
/// The result refines the input (every output cell is a subset of an input
/// cell) and is equitable: for every pair of cells *C1*, *C2*, all vertices
/// of *C1* have the same number of neighbors in *C2*. It is the unique
/// coarsest such partition, so refining an already equitable partition
/// returns it unchanged and `refine` is idempotent.
///
/// Cells are split repeatedly by the vector of neighbor counts into the
/// current cells. Each round either splits at least one cell or reaches the
/// fixed point, so there are at most |V| rounds.
///
/// # Errors
///
/// Returns an [InvalidPartitionError] before any refinement work if
/// `partition` does not partition the graph's vertex set.
#[instrument(skip_all)]
pub fn refine<G>(graph: G, partition: &Partition<G::NodeId>) -> Result<Partition<G::NodeId>, InvalidPartitionError>
where
    G: NodeCompactIndexable + IntoNeighbors + GraphProp<EdgeType = Undirected>,
{
    validate(graph, partition)?;

    let n = graph.node_bound();
    // Work on dense indices; translate back to identifiers only in the
    // output. Cells are kept sorted so the fixed point is reached with a
    // structurally identical partition.
    let mut cells: Vec<Vec<usize>> = partition
        .cells()
        .iter()
        .map(|cell| {
            let mut cell: Vec<usize> = cell.iter().map(|&v| graph.to_index(v)).collect();
            cell.sort_unstable();
            cell
        })
        .collect();
    let mut cell_of = vec![0_u32; n];

    loop {
        for (i, cell) in cells.iter().enumerate() {
            for &v in cell {
                cell_of[v] = i as u32;
            }
        }

        let mut next = Vec::with_capacity(cells.len());
        let mut changed = false;
        for cell in &cells {
            if cell.len() == 1 {
                next.push(cell.clone());
                continue;
            }
            // Group the cell by the count vector; sub-cells come out ordered
            // by their signature, members ordered by index.
            let mut groups: BTreeMap<Vec<(u32, u32)>, Vec<usize>> = BTreeMap::new();
            for &v in cell {
                groups.entry(signature(graph, &cell_of, v)).or_default().push(v);
            }
            changed |= groups.len() > 1;
            next.extend(groups.into_values());
        }
        cells = next;
        if !changed {
            break;
        }
    }

    let result: Partition<G::NodeId> =
        cells.iter().map(|cell| cell.iter().map(|&v| graph.from_index(v)).collect()).collect();
    info!(cells_in = partition.cell_count(), cells_out = result.cell_count());
    Ok(result)
}

/// Returns whether `partition` is equitable on `graph`: for every pair of
/// cells, all vertices of the first cell have the same number of neighbors
/// in the second.
///
/// # Errors
///
/// Returns an [InvalidPartitionError], as distinct from `Ok(false)`, if
/// `partition` does not partition the graph's vertex set.
pub fn is_equitable<G>(graph: G, partition: &Partition<G::NodeId>) -> Result<bool, InvalidPartitionError>
where
    G: NodeCompactIndexable + IntoNeighbors + GraphProp<EdgeType = Undirected>,
{
    validate(graph, partition)?;

    let n = graph.node_bound();
    let mut cell_of = vec![0_u32; n];
    for (i, cell) in partition.cells().iter().enumerate() {
        for &v in cell {
            cell_of[graph.to_index(v)] = i as u32;
        }
    }

    for cell in partition.cells() {
        let mut expected = None;
        for &v in cell {
            let sig = signature(graph, &cell_of, graph.to_index(v));
            match &expected {
                None => expected = Some(sig),
                Some(first) => {
                    if *first != sig {
                        return Ok(false);
                    }
                }
            }
        }
    }
    Ok(true)
}

/// Counts the neighbors of `v` that lie in `cell`.
///
/// Linear in the neighborhood and cell sizes; the refinement itself uses
/// per-cell counting instead.
pub fn degree_to_cell<G>(graph: G, v: G::NodeId, cell: &[G::NodeId]) -> usize
where
    G: IntoNeighbors,
{
    graph.neighbors(v).filter(|w| cell.contains(w)).count()
}

/// The sorted vector of (cell, neighbor count) pairs for `v`, omitting cells
/// with no neighbors of `v`.
fn signature<G>(graph: G, cell_of: &[u32], v: usize) -> Vec<(u32, u32)>
where
    G: NodeCompactIndexable + IntoNeighbors + GraphProp<EdgeType = Undirected>,
{
    let mut counts: BTreeMap<u32, u32> = BTreeMap::new();
    for w in graph.neighbors(graph.from_index(v)) {
        *counts.entry(cell_of[graph.to_index(w)]).or_insert(0) += 1;
    }
    counts.into_iter().collect()
}

#[cfg(test)]
mod test {
    use std::collections::BTreeSet;

    use petgraph::graph::{NodeIndex, UnGraph};
    use petgraph::visit::NodeIndexable;

    use crate::partition::InvalidPartitionError;
    use crate::tests;

    use super::{degree_to_cell, is_equitable, refine, Partition};

    fn cell_sets(partition: &Partition<NodeIndex>) -> BTreeSet<BTreeSet<usize>> {
        partition.cells().iter().map(|cell| cell.iter().map(|v| v.index()).collect()).collect()
    }

    #[test]
    fn path_unit_partition_splits_ends_from_inner_vertices() {
        let graph = tests::path_graph(4);
        let refined = refine(&graph, &Partition::unit(&graph)).unwrap();
        let expected: BTreeSet<BTreeSet<usize>> =
            [[0, 3].into_iter().collect(), [1, 2].into_iter().collect()].into_iter().collect();
        assert_eq!(cell_sets(&refined), expected);
        assert!(is_equitable(&graph, &refined).unwrap());
    }

    #[test]
    fn longer_path_splits_by_distance_to_the_ends() {
        let graph = tests::path_graph(5);
        let refined = refine(&graph, &Partition::unit(&graph)).unwrap();
        let expected: BTreeSet<BTreeSet<usize>> = [
            [0, 4].into_iter().collect(),
            [1, 3].into_iter().collect(),
            [2].into_iter().collect(),
        ]
        .into_iter()
        .collect();
        assert_eq!(cell_sets(&refined), expected);
    }

    #[test]
    fn regular_graphs_stay_coarse() {
        for graph in [tests::cycle_graph(6), tests::complete_graph(5)] {
            let unit = Partition::unit(&graph);
            let refined = refine(&graph, &unit).unwrap();
            assert_eq!(refined.cell_count(), 1);
            assert!(is_equitable(&graph, &unit).unwrap());
        }
    }

    #[test]
    fn star_unit_partition_separates_the_center() {
        let graph = tests::star_graph(4);
        let refined = refine(&graph, &Partition::unit(&graph)).unwrap();
        let expected: BTreeSet<BTreeSet<usize>> =
            [[0].into_iter().collect(), [1, 2, 3, 4].into_iter().collect()].into_iter().collect();
        assert_eq!(cell_sets(&refined), expected);
    }

    #[test]
    fn refinement_is_idempotent() {
        for graph in [tests::path_graph(7), tests::star_graph(5), tests::cycle_graph(8)] {
            let refined = refine(&graph, &Partition::unit(&graph)).unwrap();
            let twice = refine(&graph, &refined).unwrap();
            assert_eq!(twice, refined);
        }
    }

    #[test]
    fn refinement_is_equitable_and_refines_the_input() {
        let graph = UnGraph::<(), ()>::from_edges([(0, 1), (1, 2), (2, 3), (3, 0), (0, 4), (4, 5)]);
        let partition =
            Partition::new([vec![NodeIndex::new(0), NodeIndex::new(1), NodeIndex::new(2)], (3..6).map(NodeIndex::new).collect()]);
        let refined = refine(&graph, &partition).unwrap();

        assert!(is_equitable(&graph, &refined).unwrap());
        for cell in refined.cells() {
            let inside_some_input_cell = partition
                .cells()
                .iter()
                .any(|input| cell.iter().all(|v| input.contains(v)));
            assert!(inside_some_input_cell);
        }
    }

    #[test]
    fn discrete_partitions_are_fixed_points() {
        let graph = tests::path_graph(5);
        let discrete = Partition::discrete(&graph);
        assert!(is_equitable(&graph, &discrete).unwrap());
        assert_eq!(refine(&graph, &discrete).unwrap(), discrete);
    }

    #[test]
    fn inequitable_partition_is_detected() {
        let graph = tests::cycle_graph(4);
        // vertex 1 has a neighbor in the first cell, vertex 2 has none
        let partition = Partition::new([vec![NodeIndex::new(0)], (1..4).map(NodeIndex::new).collect()]);
        assert_eq!(is_equitable(&graph, &partition), Ok(false));
    }

    #[test]
    fn malformed_partitions_fail_in_both_entry_points() {
        let graph = tests::path_graph(3);
        let missing = Partition::new([vec![NodeIndex::new(0), NodeIndex::new(1)]]);
        assert_eq!(refine(&graph, &missing), Err(InvalidPartitionError::MissingVertex));
        assert_eq!(is_equitable(&graph, &missing), Err(InvalidPartitionError::MissingVertex));
    }

    #[test]
    fn unknown_graph_store_vertices_are_rejected() {
        let graph = crate::Graph::<char>::from_edges([('a', 'b')]).unwrap();
        let partition = Partition::new([vec!['a', 'b', 'z']]);
        assert_eq!(refine(&graph, &partition), Err(InvalidPartitionError::UnknownVertex));
        assert_eq!(is_equitable(&graph, &partition), Err(InvalidPartitionError::UnknownVertex));
    }

    #[test]
    fn degree_to_cell_sums_to_the_degree() {
        let graph = tests::complete_graph(5);
        let refined = refine(&graph, &Partition::unit(&graph)).unwrap();
        for i in 0..graph.node_bound() {
            let v = NodeIndex::new(i);
            let total: usize = refined.cells().iter().map(|cell| degree_to_cell(&graph, v, cell)).sum();
            assert_eq!(total, graph.neighbors(v).count());
        }
    }
}
