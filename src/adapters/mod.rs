//! Concrete adapter implementations for ports.

pub mod csv_dataset_adapter;
pub mod file_config_adapter;
pub mod json_dataset_adapter;
pub mod trace_observer;
