mod loader;
mod merge;

pub use loader::{LoadError, Store};
pub use merge::Merge;
