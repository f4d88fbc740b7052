// Domain value objects
pub mod event_kind;
pub mod identifiers;
pub mod storage_backend;

pub use event_kind::*;
pub use identifiers::*;
pub use storage_backend::*;
