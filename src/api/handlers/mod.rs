pub mod appointment;
pub mod health;
pub mod holiday;
pub mod lead;
pub mod professional;
pub mod service;
pub mod webhook;
