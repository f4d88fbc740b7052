pub mod clickhouse_repo;
pub mod log_directory;
pub mod memory;

pub use clickhouse_repo::*;
pub use log_directory::*;
pub use memory::*;
