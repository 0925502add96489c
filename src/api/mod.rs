pub mod auth;
pub mod files;
pub mod papers;
pub mod server;
pub mod upload;
