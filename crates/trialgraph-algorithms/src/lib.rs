pub mod common;
pub mod louvain;

pub use common::GraphView;
pub use louvain::{louvain, modularity, LouvainConfig, LouvainResult};
