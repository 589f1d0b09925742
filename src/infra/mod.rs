pub mod ai;
pub mod factory;
pub mod messaging;
pub mod repositories;
