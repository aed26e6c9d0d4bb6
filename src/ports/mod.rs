//! Port traits for the hexagonal boundary.

pub mod data_port;
pub mod observer_port;
