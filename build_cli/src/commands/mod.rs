mod evaluate;
mod parse_affix;
mod tree;

pub use evaluate::Evaluate;
pub use parse_affix::ParseAffix;
pub use tree::Tree;
