//! The train–tunnel (ladder) paradox.
//!
//! Each frame gets its own pair of lengths. Reconciling the two verdicts
//! needs the relativity of simultaneity and is not attempted here.

use super::special::{Velocity, velocity_for_gamma};
use crate::error::{KinematicsError, positive};

pub const REST_TRAIN_LENGTH: f64 = 10.0;
pub const REST_TUNNEL_LENGTH: f64 = 5.0;

/// Relative slack when comparing lengths, so that a train contracted to
/// exactly the tunnel's length still fits despite rounding.
const FIT_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Frame {
    #[default]
    Tunnel,
    Train,
}

impl Frame {
    pub fn toggled(self) -> Self {
        match self {
            Frame::Tunnel => Frame::Train,
            Frame::Train => Frame::Tunnel,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApparentLengths {
    pub train: f64,
    pub tunnel: f64,
}

impl ApparentLengths {
    /// Whether the train fits inside the tunnel as measured in this frame.
    pub fn train_fits(&self) -> bool {
        self.train <= self.tunnel * (1.0 + FIT_TOLERANCE)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainTunnel {
    train_rest: f64,
    tunnel_rest: f64,
}

impl Default for TrainTunnel {
    fn default() -> Self {
        Self {
            train_rest: REST_TRAIN_LENGTH,
            tunnel_rest: REST_TUNNEL_LENGTH,
        }
    }
}

impl TrainTunnel {
    pub fn new(train_rest: f64, tunnel_rest: f64) -> Result<Self, KinematicsError> {
        Ok(Self {
            train_rest: positive("train rest length", train_rest)?,
            tunnel_rest: positive("tunnel rest length", tunnel_rest)?,
        })
    }

    pub fn train_rest(&self) -> f64 {
        self.train_rest
    }

    pub fn tunnel_rest(&self) -> f64 {
        self.tunnel_rest
    }

    /// Speed at which, seen from the tunnel, the train contracts to exactly
    /// the tunnel's rest length (γ = train / tunnel).
    ///
    /// Fails when the train is already shorter than the tunnel at rest.
    pub fn matching_velocity(&self) -> Result<Velocity, KinematicsError> {
        velocity_for_gamma(self.train_rest / self.tunnel_rest)
    }

    pub fn apparent_lengths(&self, frame: Frame, v: f64) -> Result<ApparentLengths, KinematicsError> {
        let gamma = Velocity::new(v)?.gamma();
        Ok(match frame {
            Frame::Tunnel => ApparentLengths {
                train: self.train_rest / gamma,
                tunnel: self.tunnel_rest,
            },
            Frame::Train => ApparentLengths {
                train: self.train_rest,
                tunnel: self.tunnel_rest / gamma,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_train_fits_exactly_at_matching_velocity() {
        let scene = TrainTunnel::default();
        let v = scene.matching_velocity().unwrap();
        assert_relative_eq!(v.gamma(), 2.0, epsilon = 1e-12);

        let tunnel_view = scene.apparent_lengths(Frame::Tunnel, v.beta()).unwrap();
        assert!(tunnel_view.train_fits());

        let slower = scene.apparent_lengths(Frame::Tunnel, v.beta() - 0.01).unwrap();
        assert!(!slower.train_fits());
    }

    #[test]
    fn test_short_train_has_no_matching_velocity() {
        let scene = TrainTunnel::new(4.0, 5.0).unwrap();
        assert!(matches!(scene.matching_velocity(), Err(KinematicsError::GammaBelowOne(_))));
        assert!(scene.apparent_lengths(Frame::Tunnel, 0.0).unwrap().train_fits());
    }

    #[test]
    fn test_gamma_two_lengths() {
        let v = velocity_for_gamma(2.0).unwrap().beta();
        let scene = TrainTunnel::default();

        let tunnel_view = scene.apparent_lengths(Frame::Tunnel, v).unwrap();
        assert_relative_eq!(tunnel_view.train, 5.0, epsilon = 1e-9);
        assert_eq!(tunnel_view.tunnel, 5.0);

        let train_view = scene.apparent_lengths(Frame::Train, v).unwrap();
        assert_eq!(train_view.train, 10.0);
        assert_relative_eq!(train_view.tunnel, 2.5, epsilon = 1e-9);
        assert!(!train_view.train_fits());
    }

    #[test]
    fn test_at_rest_nothing_contracts() {
        let scene = TrainTunnel::new(10.0, 5.0).unwrap();
        for frame in [Frame::Tunnel, Frame::Train] {
            let lengths = scene.apparent_lengths(frame, 0.0).unwrap();
            assert_eq!(lengths, ApparentLengths { train: 10.0, tunnel: 5.0 });
        }
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(TrainTunnel::new(0.0, 5.0).is_err());
        assert!(TrainTunnel::new(10.0, f64::NAN).is_err());
        assert!(TrainTunnel::default().apparent_lengths(Frame::Train, 1.0).is_err());
    }
}
