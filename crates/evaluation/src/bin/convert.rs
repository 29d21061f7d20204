use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use common::io::{read_edge_list, read_metis, write_metis, GraphFileType};

#[derive(Parser, Debug)]
#[command(about = "Converts a graph file to the metis format.")]
struct Args {
    #[arg(long)]
    input: PathBuf,
    #[arg(long)]
    input_type: GraphFileType,
    #[arg(long)]
    output: PathBuf,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let graph = match args.input_type {
        GraphFileType::Metis => read_metis(&args.input)?,
        GraphFileType::EdgeList => read_edge_list(&args.input)?,
    };
    write_metis(&args.output, &graph)?;
    Ok(())
}
