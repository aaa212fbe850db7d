pub mod config;
pub mod errors;
pub mod models;
pub mod orders;
pub mod store;
