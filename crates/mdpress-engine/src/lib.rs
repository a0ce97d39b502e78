pub mod block;
pub mod parsing;

// Re-export key types for easier usage
pub use block::{Block, BlockKind};
pub use parsing::parse;
