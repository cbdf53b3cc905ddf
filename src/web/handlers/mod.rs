//! HTTP handlers for the telemetry API

pub mod health;
pub mod status;
