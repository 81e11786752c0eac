pub mod dispatcher;
pub mod normalize;
pub mod registry;

pub use dispatcher::Dispatcher;
pub use registry::{AliasTable, Registry};
