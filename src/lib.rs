pub mod client;
pub mod config;
pub mod console;
pub mod models;
