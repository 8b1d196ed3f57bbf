pub mod constant;
pub mod event;
pub mod notification;
pub mod params;
pub mod queue;
