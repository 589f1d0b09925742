pub mod assistant;
pub mod availability;
pub mod booking;
