mod allocator;
mod registry;
mod tree;

pub use allocator::{AllocatedNode, Allocation, POINTS_PER_COLUMN};
pub use registry::{DirTreeFetcher, TalentTreeCache, TreeFetcher};
pub use tree::{NodeType, Position, TalentNodeData, TalentTreeData, TreeName};

use std::path::PathBuf;
use thiserror::Error;

/// Error loading a talent tree layout
#[derive(Debug, Error)]
pub enum TreeLoadError {
    #[error("IO error reading '{path:?}': {error}")]
    Io {
        error: std::io::Error,
        path: PathBuf,
    },
    #[error("Parse error in '{path}': {error}")]
    Parse {
        error: serde_json::Error,
        path: PathBuf,
    },
    #[error("Invalid tree '{tree}': {message}")]
    Invalid { tree: TreeName, message: String },
    #[error("Failed to fetch tree '{tree}': {message}")]
    Fetch { tree: TreeName, message: String },
}
