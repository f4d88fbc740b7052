// Domain services
pub mod aggregation;
pub mod parser;

pub use aggregation::*;
pub use parser::*;
