pub mod config;
pub mod errors;
pub mod query;
pub mod request;
pub mod runner;
