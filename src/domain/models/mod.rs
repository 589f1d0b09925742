pub mod appointment;
pub mod crm;
pub mod holiday;
pub mod lead;
pub mod professional;
pub mod schedule;
pub mod service;
