use thiserror::Error;

/// Inputs the kinematics functions refuse to evaluate.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum KinematicsError {
    #[error("velocity {0} is not finite")]
    NotFinite(f64),

    #[error("velocity {0}c is not below the speed of light (|v| must be < 1)")]
    Superluminal(f64),

    #[error("{name} must be finite and non-negative, got {value}")]
    InvalidMagnitude { name: &'static str, value: f64 },

    #[error("{name} must be finite and positive, got {value}")]
    NonPositive { name: &'static str, value: f64 },

    #[error("rod speed {rod_speed} must be slower than light speed {light_speed}")]
    RodOutrunsLight { rod_speed: f64, light_speed: f64 },

    #[error("Lorentz factor {0} is below 1")]
    GammaBelowOne(f64),

    #[error("a {distance} light-year trip at {speed}c never returns")]
    EndlessTrip { distance: f64, speed: f64 },
}

#[derive(Error, Debug)]
pub enum RelvizError {
    #[error("Kinematics error: {0}")]
    Kinematics(#[from] KinematicsError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfig { field: String, message: String },

    #[error("Quiz error: {0}")]
    Quiz(String),
}

pub type Result<T> = std::result::Result<T, RelvizError>;

/// Checks that a length or duration is usable as a physical magnitude.
pub(crate) fn non_negative(name: &'static str, value: f64) -> std::result::Result<f64, KinematicsError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(KinematicsError::InvalidMagnitude { name, value })
    }
}

pub(crate) fn positive(name: &'static str, value: f64) -> std::result::Result<f64, KinematicsError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(KinematicsError::NonPositive { name, value })
    }
}
