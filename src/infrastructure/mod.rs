pub mod ingest;
pub mod input;
pub mod rendering;
pub mod scheduling;
pub mod services;
