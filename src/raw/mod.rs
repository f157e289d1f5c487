mod layout;
mod node;
mod path;
mod tree;

pub(crate) use path::Path;
pub(crate) use tree::RawBPTree;
