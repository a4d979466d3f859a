mod operation;
mod record;
mod request;

pub use operation::*;
pub use record::*;
pub use request::*;

pub const OPERATION_FLAG: &str = "operation";
pub const FILE_NAME_FLAG: &str = "fileName";
pub const ITEM_FLAG: &str = "item";
pub const ID_FLAG: &str = "id";

/// Every flag the command line understands, in validation order.
pub const FLAG_NAMES: [&str; 4] = [OPERATION_FLAG, FILE_NAME_FLAG, ITEM_FLAG, ID_FLAG];
