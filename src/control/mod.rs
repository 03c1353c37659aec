pub mod config;
pub mod driver;
pub mod engine;
pub mod environment;
