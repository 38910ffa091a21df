// Engine library root: loading, normalizing and summarizing the rental sheet.

pub mod analysis;
pub mod config;
pub mod data;
pub mod error;
pub mod services;

pub use error::EngineError;
pub use services::RentalStatusService;
