//! Data models shared across the pipeline.

pub mod booking;
pub mod config;
