use crate::error::{KinematicsError, non_negative};

/// Speed of light in m/s.
pub const C: f64 = 299_792_458.0;

/// A velocity expressed as a fraction of c, always strictly inside (-1, 1).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Velocity(f64);

impl Velocity {
    pub const REST: Velocity = Velocity(0.0);

    pub fn new(beta: f64) -> Result<Self, KinematicsError> {
        if !beta.is_finite() {
            return Err(KinematicsError::NotFinite(beta));
        }
        if beta.abs() >= 1.0 {
            return Err(KinematicsError::Superluminal(beta));
        }
        Ok(Self(beta))
    }

    /// Clamps `beta` into `[-limit, limit]` before validating.
    ///
    /// Sliders use this so user input can never reach the light barrier.
    /// `limit` itself must be below 1; NaN input clamps to rest.
    pub fn clamped(beta: f64, limit: f64) -> Result<Self, KinematicsError> {
        let limit = Self::new(limit)?.0.abs();
        if beta.is_nan() {
            return Ok(Self::REST);
        }
        Self::new(beta.clamp(-limit, limit))
    }

    pub fn from_meters_per_second(v: f64) -> Result<Self, KinematicsError> {
        Self::new(v / C)
    }

    pub fn beta(self) -> f64 {
        self.0
    }

    pub fn meters_per_second(self) -> f64 {
        self.0 * C
    }

    /// Lorentz factor γ = 1 / sqrt(1 - β²). Never fails once validated.
    pub fn gamma(self) -> f64 {
        1.0 / (1.0 - self.0 * self.0).sqrt()
    }

    pub fn reversed(self) -> Self {
        Self(-self.0)
    }
}

/// Lorentz factor γ = 1 / sqrt(1 - v²) for `v` as a fraction of c.
pub fn lorentz_factor(v: f64) -> Result<f64, KinematicsError> {
    Ok(Velocity::new(v)?.gamma())
}

/// Time dilation: Δt = Δτ · γ
pub fn time_dilation(proper_time: f64, v: f64) -> Result<f64, KinematicsError> {
    let proper_time = non_negative("proper time", proper_time)?;
    Ok(proper_time * lorentz_factor(v)?)
}

/// Length contraction: L = L0 / γ
pub fn length_contraction(proper_length: f64, v: f64) -> Result<f64, KinematicsError> {
    let proper_length = non_negative("proper length", proper_length)?;
    Ok(proper_length / lorentz_factor(v)?)
}

/// Relativistic mass: m = γ · m0
pub fn relativistic_mass(rest_mass: f64, v: f64) -> Result<f64, KinematicsError> {
    let rest_mass = non_negative("rest mass", rest_mass)?;
    Ok(rest_mass * lorentz_factor(v)?)
}

/// Non-negative speed that produces the given Lorentz factor.
pub fn velocity_for_gamma(gamma: f64) -> Result<Velocity, KinematicsError> {
    if !gamma.is_finite() {
        return Err(KinematicsError::NotFinite(gamma));
    }
    if gamma < 1.0 {
        return Err(KinematicsError::GammaBelowOne(gamma));
    }
    Velocity::new((1.0 - 1.0 / (gamma * gamma)).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_gamma_at_rest_is_exactly_one() {
        assert_eq!(lorentz_factor(0.0).unwrap(), 1.0);
        assert_eq!(Velocity::REST.gamma(), 1.0);
    }

    #[test]
    fn test_gamma_known_value() {
        assert_relative_eq!(lorentz_factor(0.6).unwrap(), 1.25, epsilon = 1e-12);
        assert_relative_eq!(lorentz_factor(0.8).unwrap(), 5.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_gamma_symmetric_and_increasing() {
        let mut previous = 1.0;
        for i in 1..100 {
            let v = i as f64 / 100.0;
            let g = lorentz_factor(v).unwrap();
            assert_eq!(g, lorentz_factor(-v).unwrap());
            assert!(g > previous, "gamma must grow with |v| (v = {v})");
            previous = g;
        }
    }

    #[test]
    fn test_light_speed_rejected() {
        assert_eq!(lorentz_factor(1.0), Err(KinematicsError::Superluminal(1.0)));
        assert_eq!(lorentz_factor(-1.0), Err(KinematicsError::Superluminal(-1.0)));
        assert!(lorentz_factor(1.5).is_err());
        assert!(matches!(lorentz_factor(f64::NAN), Err(KinematicsError::NotFinite(_))));
        assert!(lorentz_factor(f64::INFINITY).is_err());
    }

    #[test]
    fn test_dilation_and_contraction() {
        assert_relative_eq!(time_dilation(10.0, 0.6).unwrap(), 12.5, epsilon = 1e-12);
        assert_relative_eq!(length_contraction(100.0, 0.6).unwrap(), 80.0, epsilon = 1e-12);
        assert_eq!(length_contraction(100.0, 0.0).unwrap(), 100.0);
        assert!(length_contraction(100.0, 0.999).unwrap() < 5.0);
        assert!(time_dilation(-1.0, 0.5).is_err());
        assert!(length_contraction(f64::NAN, 0.5).is_err());
    }

    #[test]
    fn test_relativistic_mass() {
        assert_eq!(relativistic_mass(1.0, 0.0).unwrap(), 1.0);
        assert_relative_eq!(relativistic_mass(2.0, 0.8).unwrap(), 10.0 / 3.0, epsilon = 1e-12);
        assert!(relativistic_mass(-1.0, 0.5).is_err());
        assert!(relativistic_mass(1.0, 1.0).is_err());
    }

    #[test]
    fn test_clamped_velocity() {
        assert_eq!(Velocity::clamped(1.2, 0.99).unwrap().beta(), 0.99);
        assert_eq!(Velocity::clamped(-3.0, 0.9).unwrap().beta(), -0.9);
        assert_eq!(Velocity::clamped(0.3, 0.9).unwrap().beta(), 0.3);
        assert_eq!(Velocity::clamped(f64::NAN, 0.9).unwrap(), Velocity::REST);
        assert!(Velocity::clamped(0.5, 1.0).is_err());
    }

    #[test]
    fn test_si_conversion() {
        let v = Velocity::from_meters_per_second(C / 2.0).unwrap();
        assert_relative_eq!(v.beta(), 0.5);
        assert_relative_eq!(v.meters_per_second(), C / 2.0);
        assert!(Velocity::from_meters_per_second(C).is_err());
    }

    #[test]
    fn test_velocity_for_gamma() {
        assert_relative_eq!(velocity_for_gamma(2.0).unwrap().beta(), 0.866_025_403_784_438_6, epsilon = 1e-12);
        assert_eq!(velocity_for_gamma(1.0).unwrap(), Velocity::REST);
        assert_eq!(velocity_for_gamma(0.5), Err(KinematicsError::GammaBelowOne(0.5)));
    }
}
