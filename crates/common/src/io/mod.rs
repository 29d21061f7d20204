mod edge_list;
mod metis;

use clap::ValueEnum;
pub use edge_list::read_edge_list;
pub use edge_list::ReadEdgeListError;
pub use metis::read_metis;
pub use metis::write_metis;
pub use metis::ReadMetisError;
pub use metis::WriteMetisError;

#[derive(Debug, Clone, Eq, PartialEq, ValueEnum)]
pub enum GraphFileType {
    Metis,
    EdgeList,
}
