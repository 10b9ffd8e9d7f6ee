//! Special-relativity kinematics shared by every experiment screen.
//!
//! All functions are pure. Velocities are fractions of c and must satisfy
//! |v| < 1; anything else is reported as a [`KinematicsError`].

pub mod doppler;
pub mod simultaneity;
pub mod special;
pub mod spectrum;
pub mod train_tunnel;
pub mod twin;

pub use crate::error::KinematicsError;
pub use doppler::{REST_WAVELENGTH_NM, Shift, observed_wavelength};
pub use special::{
    C, Velocity, length_contraction, lorentz_factor, relativistic_mass, time_dilation, velocity_for_gamma,
};
pub use spectrum::{Band, Rgb, is_invisible, wavelength_to_rgb};
