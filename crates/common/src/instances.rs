//! Named graph instances for experiments and benchmarks.

use clap::ValueEnum;
use petgraph::graph::UnGraph;

/// Graph families selectable on the command line, parametrized by a size.
#[derive(Debug, Clone, Eq, PartialEq, ValueEnum)]
pub enum InstanceType {
    /// `n` vertices and no edges.
    Empty,
    /// The path on `n` vertices.
    Path,
    /// The cycle on `n` vertices.
    Cycle,
    /// The complete graph on `n` vertices.
    Complete,
    /// A star with `n - 1` leaves.
    Star,
    /// A complete graph on `n / 2` vertices with a path on the remaining
    /// vertices attached to it.
    Lollipop,
}

impl InstanceType {
    pub fn create(&self, n: usize) -> UnGraph<(), ()> {
        match self {
            InstanceType::Empty => empty_graph(n),
            InstanceType::Path => path_graph(n),
            InstanceType::Cycle => cycle_graph(n),
            InstanceType::Complete => complete_graph(n),
            InstanceType::Star => star_graph(n),
            InstanceType::Lollipop => lollipop_graph(n),
        }
    }
}

pub fn empty_graph(n: usize) -> UnGraph<(), ()> {
    let mut graph = UnGraph::new_undirected();
    for _ in 0..n {
        graph.add_node(());
    }
    graph
}

pub fn path_graph(n: usize) -> UnGraph<(), ()> {
    let mut graph = empty_graph(n);
    for u in 1..n {
        graph.add_edge(((u - 1) as u32).into(), (u as u32).into(), ());
    }
    graph
}

pub fn cycle_graph(n: usize) -> UnGraph<(), ()> {
    let mut graph = path_graph(n);
    if n >= 3 {
        graph.add_edge(((n - 1) as u32).into(), 0.into(), ());
    }
    graph
}

pub fn complete_graph(n: usize) -> UnGraph<(), ()> {
    let mut graph = empty_graph(n);
    for u in 0..n {
        for v in u + 1..n {
            graph.add_edge((u as u32).into(), (v as u32).into(), ());
        }
    }
    graph
}

/// A star on `n` vertices with center `0`.
pub fn star_graph(n: usize) -> UnGraph<(), ()> {
    let mut graph = empty_graph(n);
    for u in 1..n {
        graph.add_edge(0.into(), (u as u32).into(), ());
    }
    graph
}

/// A complete graph on `n / 2` vertices with a path on the remaining vertices
/// attached to vertex `0`. Every path vertex is a cut vertex, which makes the
/// family a useful stress test for the block decomposition.
pub fn lollipop_graph(n: usize) -> UnGraph<(), ()> {
    let k = n / 2;
    let mut graph = complete_graph(k);
    for _ in k..n {
        graph.add_node(());
    }
    if k > 0 {
        for u in k..n {
            let prev = if u == k { 0 } else { u - 1 };
            graph.add_edge((prev as u32).into(), (u as u32).into(), ());
        }
    }
    graph
}
