// Domain entities
pub mod combat_match;
pub mod config;
pub mod event;
pub mod report;

pub use combat_match::*;
pub use config::*;
pub use event::*;
pub use report::*;
