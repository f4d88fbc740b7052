// Repository and Service Port Traits (Interfaces)
// Define what the domain needs from infrastructure

pub mod repositories;
pub mod services;
pub mod sources;

pub use repositories::*;
pub use services::*;
pub use sources::*;
