pub mod client;
pub mod cloud;
pub mod config;
pub mod error;
