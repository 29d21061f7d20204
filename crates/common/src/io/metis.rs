use petgraph::graph::{NodeIndex, UnGraph};
use std::cmp::Ordering;
use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::num::ParseIntError;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReadMetisError {
    #[error("missing header")]
    MissingHeader,
    #[error("invalid header (expected '(n) (m)', got {0})")]
    InvalidHeader(String),
    #[error("adjacency lines for {actual} vertices, but header gives n = {expected}")]
    WrongVertexCount { expected: usize, actual: usize },
    #[error("{actual} edges, but header gives m = {expected}")]
    WrongEdgeCount { expected: usize, actual: usize },
    #[error("found zero index (metis indices start at 1)")]
    ZeroIndex,
    #[error("found self-loop on vertex {0}")]
    SelfLoop(usize),
    #[error("parse error")]
    ParseInt(#[from] ParseIntError),
    #[error("io error")]
    IoError(#[from] std::io::Error),
}

/// Reads the unweighted subset of the metis graph format. See [metis].
///
/// The file starts with a '(n) (m)' header and has one adjacency line per
/// vertex, listing the 1-based indices of its neighbors. Each edge appears on
/// the lines of both of its endpoints. Comment lines start with '%'. Vertex
/// and edge weights are not supported, nor are self-loops.
///
/// [metis]: https://people.sc.fsu.edu/~jburkardt/data/metis_graph/metis_graph.html
pub fn read_metis<P>(path: P) -> Result<UnGraph<(), ()>, ReadMetisError>
where
    P: AsRef<Path>,
{
    let file = File::open(path)?;
    let mut lines = std::io::BufReader::new(file)
        .lines()
        .filter(|line| !matches!(line, Ok(line) if line.starts_with('%')));

    let header = lines.next().ok_or(ReadMetisError::MissingHeader)??;
    let (n, m) = {
        let err = || ReadMetisError::InvalidHeader(header.clone());
        let mut tokens = header.split_ascii_whitespace();
        let n: usize = tokens.next().ok_or_else(err)?.parse().map_err(|_| err())?;
        let m: usize = tokens.next().ok_or_else(err)?.parse().map_err(|_| err())?;
        if tokens.next().is_some() {
            return Err(err());
        }
        (n, m)
    };

    let mut graph = UnGraph::with_capacity(n, m);
    for _ in 0..n {
        graph.add_node(());
    }

    let mut num_lines = 0;
    for line in lines {
        let line = line?;
        let u = NodeIndex::new(num_lines);
        num_lines += 1;
        for v in line.split_ascii_whitespace() {
            let v: usize = v.parse()?;
            if v == 0 {
                return Err(ReadMetisError::ZeroIndex);
            }
            let v = NodeIndex::new(v - 1);
            // each edge is listed twice; add it when scanning its lower endpoint
            match u.cmp(&v) {
                Ordering::Less => {
                    graph.add_edge(u, v, ());
                }
                Ordering::Equal => return Err(ReadMetisError::SelfLoop(u.index() + 1)),
                Ordering::Greater => {}
            }
        }
    }

    if num_lines != n {
        return Err(ReadMetisError::WrongVertexCount { actual: num_lines, expected: n });
    }
    if graph.edge_count() != m {
        return Err(ReadMetisError::WrongEdgeCount { actual: graph.edge_count(), expected: m });
    }

    Ok(graph)
}

#[derive(Error, Debug)]
pub enum WriteMetisError {
    #[error("io error")]
    IoError(#[from] std::io::Error),
}

pub fn write_metis<P>(path: P, graph: &UnGraph<(), ()>) -> Result<(), WriteMetisError>
where
    P: AsRef<Path>,
{
    let file = File::create(path)?;
    let mut file = BufWriter::new(file);

    writeln!(file, "{} {}", graph.node_count(), graph.edge_count())?;
    for u in graph.node_indices() {
        let mut neighbors: Vec<_> = graph.neighbors(u).map(|v| v.index() + 1).collect();
        neighbors.sort_unstable();
        let line = neighbors.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(" ");
        writeln!(file, "{line}")?;
    }
    file.flush()?;
    Ok(())
}
