pub mod bulk_load_commands;
pub mod ingest_commands;
