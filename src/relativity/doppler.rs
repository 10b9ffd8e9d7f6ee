//! Relativistic Doppler shift for a source moving along the line of sight.
//!
//! Positive velocities mean source and observer are closing the distance.

use super::special::Velocity;
use crate::error::{KinematicsError, positive};

/// Rest wavelength of the reference star (green light), in nm.
pub const REST_WAVELENGTH_NM: f64 = 550.0;

/// Below this speed the shift is treated as negligible when narrating.
pub const STATIONARY_THRESHOLD: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shift {
    Blue,
    Red,
    None,
}

impl Shift {
    pub fn of(v: Velocity) -> Self {
        if v.beta() > 0.0 {
            Shift::Blue
        } else if v.beta() < 0.0 {
            Shift::Red
        } else {
            Shift::None
        }
    }
}

/// sqrt((1 - β) / (1 + β)), the factor applied to the rest wavelength.
pub fn doppler_factor(v: Velocity) -> f64 {
    let beta = v.beta();
    ((1.0 - beta) / (1.0 + beta)).sqrt()
}

pub fn observed_wavelength(rest_wavelength: f64, v: f64) -> Result<f64, KinematicsError> {
    let rest_wavelength = positive("rest wavelength", rest_wavelength)?;
    Ok(rest_wavelength * doppler_factor(Velocity::new(v)?))
}
