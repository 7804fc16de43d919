//! Calorie intake tracking service.
//!
//! Logs food entries with a calorie estimate derived from an external
//! nutrition source, answers history queries, and computes a daily calorie
//! goal from the user's biometrics.

pub mod config;
pub mod db;
pub mod error;
pub mod intake;
pub mod models;
pub mod nutrition;
pub mod server;
pub mod service;

#[cfg(test)]
mod testing;

pub use error::IntakeError;
pub use service::{CalorieService, NewEntry};
