pub mod factory;
pub mod service;
pub mod triggers;
