//! HTTP Routes

pub mod alerts;
pub mod health;
pub mod prometheus;
