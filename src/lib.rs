pub mod config;
pub mod models;
pub mod search;
pub mod utils;
