use std::error::Error;
use std::path::PathBuf;
use std::time::Instant;

use block_decomposition::{blocks_and_cut_vertices, refine, Partition};
use clap::Parser;
use common::instances::InstanceType;
use common::io::GraphFileType;
use petgraph::graph::UnGraph;
use tracing::info;

#[derive(Parser, Debug)]
#[command(about = "Runs the block-cut-vertex decomposition and the equitable refinement on a graph and reports sizes and timings.")]
struct Args {
    /// Path of the input graph.
    #[arg(long, requires = "input_type", conflicts_with_all = ["instance", "n"])]
    input: Option<PathBuf>,
    /// File format of the input graph.
    #[arg(long)]
    input_type: Option<GraphFileType>,
    /// Generated instance to use instead of an input file.
    #[arg(long, requires = "n")]
    instance: Option<InstanceType>,
    /// Number of vertices of the generated instance.
    #[arg(long)]
    n: Option<usize>,
}

fn read_graph(args: &Args) -> Result<UnGraph<(), ()>, Box<dyn Error>> {
    match (&args.input, &args.input_type, &args.instance, args.n) {
        (Some(path), Some(GraphFileType::Metis), _, _) => Ok(common::io::read_metis(path)?),
        (Some(path), Some(GraphFileType::EdgeList), _, _) => Ok(common::io::read_edge_list(path)?),
        (_, _, Some(instance), Some(n)) => Ok(instance.create(n)),
        _ => Err("expected either --input and --input-type or --instance and --n".into()),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let start = Instant::now();
    let graph = read_graph(&args)?;
    let t_read = start.elapsed();
    info!(n = graph.node_count(), m = graph.edge_count(), "input graph");

    let start = Instant::now();
    let decomposition = blocks_and_cut_vertices(&graph);
    let t_blocks = start.elapsed();

    let unit = Partition::unit(&graph);
    let start = Instant::now();
    let refined = refine(&graph, &unit)?;
    let t_refine = start.elapsed();

    println!(
        "n {:8} m {:8}  read {:9} μs  blocks {:9} μs ({} blocks, {} cut vertices)  refine {:9} μs ({} cells)",
        graph.node_count(),
        graph.edge_count(),
        t_read.as_micros(),
        t_blocks.as_micros(),
        decomposition.block_count(),
        decomposition.cut_vertices().len(),
        t_refine.as_micros(),
        refined.cell_count(),
    );
    Ok(())
}
