mod dispatch;
mod flags;
mod output;
mod profiling;

pub use dispatch::*;
pub use flags::*;
pub use output::*;
pub use profiling::*;
