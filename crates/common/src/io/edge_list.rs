use petgraph::graph::UnGraph;
use std::fs::File;
use std::io::BufRead;
use std::num::ParseIntError;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReadEdgeListError {
    #[error("line {0}: expected two vertex indices")]
    InvalidLine(usize),
    #[error("parse int error")]
    ParseInt(#[from] ParseIntError),
    #[error("io error")]
    IoError(#[from] std::io::Error),
}

/// Reads a whitespace-separated edge list with one edge per line. Vertex
/// indices start at 0; blank lines and lines starting with '#' are skipped.
pub fn read_edge_list<P>(path: P) -> Result<UnGraph<(), ()>, ReadEdgeListError>
where
    P: AsRef<Path>,
{
    let file = File::open(path)?;

    let mut edges = vec![];
    for (line_idx, line) in std::io::BufReader::new(file).lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut tokens = line.split_ascii_whitespace();
        let (Some(a), Some(b), None) = (tokens.next(), tokens.next(), tokens.next()) else {
            return Err(ReadEdgeListError::InvalidLine(line_idx + 1));
        };

        let u: u32 = a.parse()?;
        let v: u32 = b.parse()?;
        edges.push((u, v));
    }

    let mut graph = UnGraph::with_capacity(0, edges.len());
    graph.extend_with_edges(edges);
    Ok(graph)
}
