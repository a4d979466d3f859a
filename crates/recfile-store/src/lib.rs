mod collection;
mod file;

pub use collection::*;
pub use file::*;
