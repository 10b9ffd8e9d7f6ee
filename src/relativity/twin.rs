//! Round trip of the travelling twin, measured from Earth.

use super::special::Velocity;
use crate::error::{KinematicsError, positive};

/// Age of both twins when the ship departs, in years.
pub const DEPARTURE_AGE: f64 = 20.0;
pub const DEFAULT_DISTANCE_LY: f64 = 5.0;
pub const DEFAULT_VELOCITY: f64 = 0.8;
/// Trip progress runs 0..1 outbound and 1..2 on the way back.
pub const ROUND_TRIP: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Leg {
    Outbound,
    Return,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ages {
    pub earth: f64,
    pub ship: f64,
}

impl Ages {
    pub fn gap(&self) -> f64 {
        self.earth - self.ship
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifeStage {
    Baby,
    Child,
    YoungAdult,
    Adult,
    Elderly,
    Deceased,
}

impl LifeStage {
    pub fn of(age: f64) -> Self {
        match age {
            a if a < 6.0 => LifeStage::Baby,
            a if a < 19.0 => LifeStage::Child,
            a if a < 31.0 => LifeStage::YoungAdult,
            a if a < 66.0 => LifeStage::Adult,
            a if a < 110.0 => LifeStage::Elderly,
            _ => LifeStage::Deceased,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LifeStage::Baby => "Baby",
            LifeStage::Child => "Child",
            LifeStage::YoungAdult => "Young Adult",
            LifeStage::Adult => "Adult",
            LifeStage::Elderly => "Elderly",
            LifeStage::Deceased => "Deceased",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwinTrip {
    distance: f64,
    velocity: Velocity,
    departure_age: f64,
}

impl TwinTrip {
    /// `distance` in light-years to the turnaround point, `v` as a fraction of c.
    pub fn new(distance: f64, v: f64) -> Result<Self, KinematicsError> {
        let distance = positive("distance", distance)?;
        let velocity = Velocity::new(v)?;
        positive("trip speed", velocity.beta())?;
        let trip = Self { distance, velocity, departure_age: DEPARTURE_AGE };
        if !trip.earth_duration().is_finite() {
            return Err(KinematicsError::EndlessTrip { distance, speed: v });
        }
        Ok(trip)
    }

    pub fn with_departure_age(mut self, age: f64) -> Result<Self, KinematicsError> {
        self.departure_age = crate::error::non_negative("departure age", age)?;
        Ok(self)
    }

    pub fn velocity(&self) -> Velocity {
        self.velocity
    }

    /// Years elapsed on Earth for the whole round trip: 2d / v.
    pub fn earth_duration(&self) -> f64 {
        ROUND_TRIP * self.distance / self.velocity.beta()
    }

    /// Proper time aboard the ship for the whole round trip.
    pub fn ship_duration(&self) -> f64 {
        self.earth_duration() / self.velocity.gamma()
    }

    pub fn leg(progress: f64) -> Leg {
        if progress <= 1.0 { Leg::Outbound } else { Leg::Return }
    }

    pub fn ages_at(&self, progress: f64) -> Ages {
        let ratio = progress.clamp(0.0, ROUND_TRIP) / ROUND_TRIP;
        let earth_elapsed = ratio * self.earth_duration();
        Ages {
            earth: self.departure_age + earth_elapsed,
            ship: self.departure_age + earth_elapsed / self.velocity.gamma(),
        }
    }

    pub fn reunion_ages(&self) -> Ages {
        self.ages_at(ROUND_TRIP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_trip() {
        let trip = TwinTrip::new(DEFAULT_DISTANCE_LY, DEFAULT_VELOCITY).unwrap();
        assert_relative_eq!(trip.earth_duration(), 12.5, epsilon = 1e-12);
        assert_relative_eq!(trip.ship_duration(), 7.5, epsilon = 1e-12);

        let reunion = trip.reunion_ages();
        assert_relative_eq!(reunion.earth, 32.5, epsilon = 1e-12);
        assert_relative_eq!(reunion.ship, 27.5, epsilon = 1e-12);
        assert_relative_eq!(reunion.gap(), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_vanishing_speed_is_rejected() {
        assert!(matches!(
            TwinTrip::new(5.0, 1e-320),
            Err(KinematicsError::EndlessTrip { .. })
        ));
        assert!(TwinTrip::new(f64::MAX, 0.5).is_err());
        assert!(TwinTrip::new(5.0, 0.0).is_err());
    }

    #[test]
    fn test_progress_is_clamped() {
        let trip = TwinTrip::new(5.0, 0.8).unwrap();
        assert_eq!(trip.ages_at(-1.0), Ages { earth: 20.0, ship: 20.0 });
        assert_eq!(trip.ages_at(3.0), trip.reunion_ages());
        assert_relative_eq!(trip.ages_at(1.0).earth, 26.25, epsilon = 1e-12);
        assert_eq!(TwinTrip::leg(0.5), Leg::Outbound);
        assert_eq!(TwinTrip::leg(1.5), Leg::Return);
    }

    #[test]
    fn test_rejects_stationary_or_backward_ship() {
        assert!(TwinTrip::new(5.0, 0.0).is_err());
        assert!(TwinTrip::new(5.0, -0.5).is_err());
        assert!(TwinTrip::new(5.0, 1.0).is_err());
        assert!(TwinTrip::new(0.0, 0.5).is_err());
    }

    #[test]
    fn test_life_stages() {
        assert_eq!(LifeStage::of(3.0), LifeStage::Baby);
        assert_eq!(LifeStage::of(20.0), LifeStage::YoungAdult);
        assert_eq!(LifeStage::of(40.0), LifeStage::Adult);
        assert_eq!(LifeStage::of(80.0), LifeStage::Elderly);
        assert_eq!(LifeStage::of(120.0).label(), "Deceased");
    }
}
