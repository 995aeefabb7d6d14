pub mod config;
pub mod error;
pub mod graph;

pub use config::Config;
pub use error::{PathfinderError, Result};
pub use graph::{find_path, find_path_within, Graph, LoadReport, MalformedLinePolicy, Route};
