//! Core domain types and logic.

pub mod candle;
pub mod config;
pub mod indicator;
pub mod strategy;
pub mod simulation;
pub mod trade;
pub mod error;
