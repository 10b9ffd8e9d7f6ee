//! Interactive special-relativity explorer.
//!
//! [`relativity`] holds the pure kinematics every screen is computed from;
//! the remaining modules present it as a terminal UI, CSV/PNG metrics and a
//! quiz.

pub mod config;
pub mod error;
pub mod logger;
pub mod metrics;
pub mod narration;
pub mod quiz;
pub mod relativity;
pub mod theory;
pub mod tui;

pub use config::SimConfig;
pub use error::{KinematicsError, RelvizError, Result};
