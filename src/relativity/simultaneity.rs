//! Light pulse fired from the midpoint of a moving rod.
//!
//! Units are simulation units: `light_speed` need not be 1. The rod moves
//! along +x when `rod_speed > 0`, which makes the left end the trailing one.

use crate::error::{KinematicsError, positive};

pub const SIM_LIGHT_SPEED: f64 = 5.0;
pub const SIM_ROD_SPEED: f64 = 2.5;
pub const SIM_HALF_LENGTH: f64 = 5.0;
/// Length of one playback of the experiment, in simulation seconds.
pub const SIM_DURATION: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Frame {
    /// The rod is at rest; the light source sits still at its midpoint.
    #[default]
    Rod,
    /// The rod moves at `rod_speed`; the light front expands from the fixed
    /// point where the midpoint was at emission.
    Observer,
}

impl Frame {
    pub fn toggled(self) -> Self {
        match self {
            Frame::Rod => Frame::Observer,
            Frame::Observer => Frame::Rod,
        }
    }
}

/// When the light front reaches each end of the rod.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitTimes {
    pub left: f64,
    pub right: f64,
    rod_speed: f64,
}

impl HitTimes {
    pub fn trailing(&self) -> f64 {
        if self.rod_speed < 0.0 { self.right } else { self.left }
    }

    pub fn leading(&self) -> f64 {
        if self.rod_speed < 0.0 { self.left } else { self.right }
    }

    pub fn is_simultaneous(&self) -> bool {
        self.left == self.right
    }

    /// How long after the first hit the second one lands.
    pub fn gap(&self) -> f64 {
        (self.right - self.left).abs()
    }
}

/// Which ends have been struck at a given instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot {
    pub time: f64,
    pub light_radius: f64,
    pub rod_offset: f64,
    pub left_hit: bool,
    pub right_hit: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimultaneityExperiment {
    half_length: f64,
    light_speed: f64,
    rod_speed: f64,
}

impl Default for SimultaneityExperiment {
    fn default() -> Self {
        Self {
            half_length: SIM_HALF_LENGTH,
            light_speed: SIM_LIGHT_SPEED,
            rod_speed: SIM_ROD_SPEED,
        }
    }
}

impl SimultaneityExperiment {
    pub fn new(half_length: f64, light_speed: f64, rod_speed: f64) -> Result<Self, KinematicsError> {
        let half_length = positive("half length", half_length)?;
        let light_speed = positive("light speed", light_speed)?;
        if !rod_speed.is_finite() {
            return Err(KinematicsError::NotFinite(rod_speed));
        }
        if rod_speed.abs() >= light_speed {
            return Err(KinematicsError::RodOutrunsLight { rod_speed, light_speed });
        }
        Ok(Self { half_length, light_speed, rod_speed })
    }

    pub fn half_length(&self) -> f64 {
        self.half_length
    }

    pub fn light_speed(&self) -> f64 {
        self.light_speed
    }

    pub fn rod_speed(&self) -> f64 {
        self.rod_speed
    }

    /// Both ends are equidistant and stationary: t = L / c.
    pub fn rod_frame_hits(&self) -> HitTimes {
        let t = self.half_length / self.light_speed;
        HitTimes { left: t, right: t, rod_speed: 0.0 }
    }

    /// Left end meets the light at L / (c + v), right end at L / (c - v).
    pub fn observer_frame_hits(&self) -> HitTimes {
        let (l, c, v) = (self.half_length, self.light_speed, self.rod_speed);
        HitTimes {
            left: l / (c + v),
            right: l / (c - v),
            rod_speed: v,
        }
    }

    pub fn hits(&self, frame: Frame) -> HitTimes {
        match frame {
            Frame::Rod => self.rod_frame_hits(),
            Frame::Observer => self.observer_frame_hits(),
        }
    }

    /// State of the experiment `time` units after emission (negative clamps to 0).
    pub fn snapshot(&self, frame: Frame, time: f64) -> Snapshot {
        let time = time.max(0.0);
        let hits = self.hits(frame);
        let rod_offset = match frame {
            Frame::Rod => 0.0,
            Frame::Observer => self.rod_speed * time,
        };
        Snapshot {
            time,
            light_radius: self.light_speed * time,
            rod_offset,
            left_hit: time >= hits.left,
            right_hit: time >= hits.right,
        }
    }
}
